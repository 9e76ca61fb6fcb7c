//! Android build automation
//!
//! This module runs the native template's Gradle build to produce an unsigned
//! debug APK and AAB for the `appstore` flavor, then copies them out of the
//! Gradle output tree under release-numbered names.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::builders::common::execute;
use crate::types::{BuildArtifacts, BuildError};

/// Gradle task producing the debug APK.
pub const ASSEMBLE_TASK: &str = "assembleAppstoreDebug";
/// Gradle task producing the debug AAB.
pub const BUNDLE_TASK: &str = "bundleAppstoreDebug";

const APK_NAME: &str = "app-appstore-debug.apk";
const AAB_NAME: &str = "app-appstore-debug.aab";

/// Android builder that drives Gradle inside a native template checkout
pub struct AndroidBuilder {
    /// The native template's `android/` directory
    android_dir: PathBuf,
    /// Whether to use verbose output
    verbose: bool,
    dry_run: bool,
}

impl AndroidBuilder {
    /// Creates a new Android builder
    ///
    /// # Arguments
    ///
    /// * `template_dir` - Root of the extracted native template (contains `android/`)
    pub fn new(template_dir: impl AsRef<Path>) -> Self {
        Self {
            android_dir: template_dir.as_ref().join("android"),
            verbose: false,
            dry_run: false,
        }
    }

    /// Enables verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Prints commands instead of running them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Path of the Gradle wrapper script.
    pub fn gradle_wrapper(&self) -> PathBuf {
        let script = if cfg!(target_os = "windows") {
            "gradlew.bat"
        } else {
            "gradlew"
        };
        self.android_dir.join(script)
    }

    /// Gradle command running `task` in the `android/` directory.
    pub fn gradle_command(&self, task: &str) -> Command {
        let mut cmd = Command::new(self.gradle_wrapper());
        cmd.arg(task).current_dir(&self.android_dir);
        if self.verbose {
            cmd.arg("--info");
        }
        cmd
    }

    /// Where Gradle leaves the debug APK.
    pub fn apk_path(&self) -> PathBuf {
        self.android_dir
            .join("app/build/outputs/apk/appstore/debug")
            .join(APK_NAME)
    }

    /// Where Gradle leaves the debug AAB.
    pub fn aab_path(&self) -> PathBuf {
        self.android_dir
            .join("app/build/outputs/bundle/appstoreDebug")
            .join(AAB_NAME)
    }

    /// Builds the debug APK and AAB.
    ///
    /// This performs the following steps:
    /// 1. `gradlew assembleAppstoreDebug`
    /// 2. `gradlew bundleAppstoreDebug`
    pub fn build(&self) -> Result<(), BuildError> {
        if !self.dry_run && !self.android_dir.exists() {
            return Err(BuildError::Build(format!(
                "Android project not found at {:?}",
                self.android_dir
            )));
        }

        println!("Building Android APK with Gradle...");
        execute(
            self.gradle_command(ASSEMBLE_TASK),
            "Gradle assemble",
            self.verbose,
            self.dry_run,
        )?;
        println!("Build APK: Done!");

        println!("Building Android App Bundle with Gradle...");
        execute(
            self.gradle_command(BUNDLE_TASK),
            "Gradle bundle",
            self.verbose,
            self.dry_run,
        )?;
        println!("Build AAB: Done!");
        Ok(())
    }

    /// Copies the built APK and AAB into `output_dir`, suffixed with `release`.
    ///
    /// `app-appstore-debug.apk` becomes `app-appstore-debug-<release>.apk`.
    /// Existing files are overwritten. An artifact Gradle did not produce is
    /// skipped with a warning.
    pub fn relocate_artifacts(
        &self,
        output_dir: &Path,
        release: &str,
    ) -> Result<BuildArtifacts, BuildError> {
        Ok(BuildArtifacts {
            apk: self.relocate(&self.apk_path(), output_dir, release)?,
            aab: self.relocate(&self.aab_path(), output_dir, release)?,
        })
    }

    fn relocate(
        &self,
        src: &Path,
        output_dir: &Path,
        release: &str,
    ) -> Result<Option<PathBuf>, BuildError> {
        let dest = output_dir.join(release_file_name(src, release));
        if self.dry_run {
            println!("  [dry-run] copy {} -> {}", src.display(), dest.display());
            return Ok(None);
        }
        if !src.exists() {
            tracing::warn!("artifact not found at {}, skipping", src.display());
            println!("  Warning: {} not found, skipping", src.display());
            return Ok(None);
        }
        fs::copy(src, &dest).map_err(|e| {
            BuildError::Build(format!(
                "Failed to copy {} to {}: {}",
                src.display(),
                dest.display(),
                e
            ))
        })?;
        Ok(Some(dest))
    }
}

/// `app-appstore-debug.apk` + `1.2.0` -> `app-appstore-debug-1.2.0.apk`
fn release_file_name(src: &Path, release: &str) -> String {
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match src.extension() {
        Some(ext) => format!("{}-{}.{}", stem, release, ext.to_string_lossy()),
        None => format!("{}-{}", stem, release),
    }
}
