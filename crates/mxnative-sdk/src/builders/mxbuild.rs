//! MxBuild invocation.
//!
//! MxBuild compiles the Mendix project. With `--native-packager` it also
//! produces the JavaScript bundle and assets for the native app under
//! `<project>/deployment/native/bundle/<platform>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::builders::common::{copy_dir_merge, execute};
use crate::toolchain::Toolchain;
use crate::types::BuildError;

/// Runs MxBuild for a project and stages its Android bundle.
pub struct MxBuildBuilder {
    mxbuild_exe: PathBuf,
    java_home: PathBuf,
    java_exe: PathBuf,
    verbose: bool,
    dry_run: bool,
}

impl MxBuildBuilder {
    /// Creates a builder using the toolchain's MxBuild and JDK.
    pub fn new(toolchain: &Toolchain) -> Self {
        Self {
            mxbuild_exe: toolchain.mxbuild_exe.clone(),
            java_home: toolchain.java_home.clone(),
            java_exe: toolchain.java_exe.clone(),
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

    /// The MxBuild command line for `project_file`, run from the project directory.
    pub fn command(&self, project_file: &Path) -> Command {
        let mut java_home_arg = std::ffi::OsString::from("--java-home=");
        java_home_arg.push(&self.java_home);
        let mut java_exe_arg = std::ffi::OsString::from("--java-exe-path=");
        java_exe_arg.push(&self.java_exe);

        let mut cmd = Command::new(&self.mxbuild_exe);
        cmd.arg(java_home_arg)
            .arg(java_exe_arg)
            .arg("--target=deploy")
            .arg("--native-packager")
            .arg("--loose-version-check")
            .arg(project_file);
        if let Some(dir) = project_file.parent() {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Compiles the project and deploys the native bundle.
    pub fn build(&self, project_file: &Path) -> Result<(), BuildError> {
        execute(
            self.command(project_file),
            "MxBuild",
            self.verbose,
            self.dry_run,
        )
    }

    /// Copies MxBuild's Android bundle into the native template's `app/src/main`.
    ///
    /// Returns the number of files copied (zero in dry-run mode).
    pub fn stage_android_bundle(
        &self,
        bundle_dir: &Path,
        template_dir: &Path,
    ) -> Result<u64, BuildError> {
        let dest = android_main_dir(template_dir);
        if self.dry_run {
            println!(
                "  [dry-run] copy {} -> {}",
                bundle_dir.display(),
                dest.display()
            );
            return Ok(0);
        }
        if !bundle_dir.is_dir() {
            return Err(BuildError::Build(format!(
                "MxBuild did not produce an Android bundle at {}.\n\n\
                 Ensure the project has a native profile and MxBuild ran with --native-packager.",
                bundle_dir.display()
            )));
        }
        let copied = copy_dir_merge(bundle_dir, &dest)?;
        if self.verbose {
            println!("  Copied {} files into {}", copied, dest.display());
        }
        Ok(copied)
    }
}

/// `android/app/src/main` inside the native template.
pub fn android_main_dir(template_dir: &Path) -> PathBuf {
    template_dir
        .join("android")
        .join("app")
        .join("src")
        .join("main")
}
