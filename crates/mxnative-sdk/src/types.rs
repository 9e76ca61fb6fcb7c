//! Core types for mxnative-sdk.
//!
//! This module defines the fundamental types used throughout the SDK:
//!
//! - [`BuildError`] - Error types for build operations
//! - [`AppSettings`] - The values substituted into the app config template
//! - [`BuildPlan`] - Every path and version a build needs, resolved up front
//! - [`BuildArtifacts`] / [`BuildSummary`] - Output from a finished build

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::template::TemplateError;

/// Error types for mxnative-sdk operations.
///
/// # Example
///
/// ```ignore
/// use mxnative_sdk::{BuildError, TemplateError};
///
/// match pipeline.run() {
///     Ok(artifacts) => println!("APK: {:?}", artifacts.apk),
///     Err(BuildError::Template(TemplateError::NotFound { path, .. })) => {
///         eprintln!("Config template {:?} is missing", path);
///     }
///     Err(e) => eprintln!("Build failed: {}", e),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Rendering the app config template failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A required environment variable or executable is missing.
    ///
    /// Raised before any external tool runs, so nothing has been modified yet.
    #[error("environment error: {0}")]
    Environment(String),

    /// Downloading the native template archive failed.
    #[error("download error: {0}")]
    Download(String),

    /// An I/O error occurred.
    ///
    /// Common causes include missing files, permission issues, or
    /// disk space problems while preparing the working directory.
    #[error("I/O error: {0}. Check file paths and permissions")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed while writing the build summary.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid or missing build input (project file, output folder, ...).
    #[error("configuration error: {0}. Check mxnative.toml or CLI flags")]
    Config(String),

    /// An external build step failed.
    ///
    /// This covers MxBuild, npm, Gradle and archive extraction. The message
    /// carries the exit status and captured output of the failing command.
    #[error("build error: {0}")]
    Build(String),
}

/// Values substituted into the app config template.
///
/// These are the five settings the native template's `npm run configure`
/// step reads from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Android application id (e.g. `myapp.nativeapp02`).
    pub app_identifier: String,
    /// Display name of the app.
    pub app_name: String,
    /// User-visible version string (e.g. `1.0.0`).
    pub app_version: String,
    /// Monotonic build number (Android `versionCode`).
    pub build_number: u32,
    /// URL of the Mendix runtime the app connects to.
    pub runtime_url: String,
}

/// Default Mendix runtime URL used when none is configured.
pub const DEFAULT_RUNTIME_URL: &str = "http://localhost:8080";

impl AppSettings {
    /// Derives settings from the project file name.
    ///
    /// `NativeApp02.mpr` with version `1.0.0` yields app name `NativeApp02`,
    /// identifier `com.mendix.nativeapp02`, build number 1 and the default
    /// runtime URL.
    pub fn for_project(project_file: &Path, app_version: &str) -> Self {
        let stem = project_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "app".to_string());
        Self {
            app_identifier: format!("com.mendix.{}", sanitize_identifier_component(&stem)),
            app_name: stem,
            app_version: app_version.to_string(),
            build_number: 1,
            runtime_url: DEFAULT_RUNTIME_URL.to_string(),
        }
    }
}

/// Sanitizes a string for use as one segment of an Android application id.
///
/// Keeps ASCII alphanumerics only, lowercased. Falls back to `app` when
/// nothing remains.
pub fn sanitize_identifier_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.is_empty() {
        "app".to_string()
    } else {
        cleaned
    }
}

/// Everything a build needs, resolved to absolute paths before the first step.
///
/// The pipeline never changes the process working directory; each external
/// command receives one of these directories as its explicit `current_dir`.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// The Mendix project file (`.mpr`).
    pub project_file: PathBuf,
    /// Directory containing the project file.
    pub project_dir: PathBuf,
    /// Scratch directory (`<project>/build`), recreated for every build.
    pub working_dir: PathBuf,
    /// MxBuild's output directory (`<project>/deployment`).
    pub deployment_dir: PathBuf,
    /// Where renamed APK/AAB files are placed.
    pub output_dir: PathBuf,
    /// The app config template rendered into `config.json`.
    pub config_template: PathBuf,
    /// Mendix version, selects `$MENDIX_HOME/<version>/modeler/mxbuild`.
    pub mx_version: String,
    /// Native template git tag (e.g. `v6.3.5`).
    pub template_version: String,
    /// Suffix for the relocated artifact file names.
    pub release_number: String,
    /// Values for the config template.
    pub app: AppSettings,
}

/// Mendix version used when none is given.
pub const DEFAULT_MX_VERSION: &str = "9.18.5.3736";
/// Native template tag used when none is given.
pub const DEFAULT_TEMPLATE_VERSION: &str = "v6.3.5";
/// Release number used when none is given.
pub const DEFAULT_RELEASE_NUMBER: &str = "1.0.0";

impl BuildPlan {
    /// Creates a plan for the given project file.
    ///
    /// Working and deployment directories are derived from the project
    /// directory; the output directory defaults to the project directory.
    pub fn new(project_file: impl Into<PathBuf>, config_template: impl Into<PathBuf>) -> Self {
        let project_file = project_file.into();
        let project_dir = project_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let app = AppSettings::for_project(&project_file, DEFAULT_RELEASE_NUMBER);
        Self {
            working_dir: project_dir.join("build"),
            deployment_dir: project_dir.join("deployment"),
            output_dir: project_dir.clone(),
            project_dir,
            project_file,
            config_template: config_template.into(),
            mx_version: DEFAULT_MX_VERSION.to_string(),
            template_version: DEFAULT_TEMPLATE_VERSION.to_string(),
            release_number: DEFAULT_RELEASE_NUMBER.to_string(),
            app,
        }
    }

    /// Sets the output directory for relocated artifacts.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the Mendix version.
    pub fn mx_version(mut self, version: impl Into<String>) -> Self {
        self.mx_version = version.into();
        self
    }

    /// Sets the native template tag.
    pub fn template_version(mut self, version: impl Into<String>) -> Self {
        self.template_version = version.into();
        self
    }

    /// Sets the release number used for artifact names.
    pub fn release_number(mut self, release: impl Into<String>) -> Self {
        self.release_number = release.into();
        self
    }

    /// Sets the config template values.
    pub fn app(mut self, app: AppSettings) -> Self {
        self.app = app;
        self
    }

    /// Directory the native template archive extracts into.
    ///
    /// GitHub names the top-level folder of a tag archive after the tag with
    /// the leading `v` removed: `v6.3.5` becomes `native-template-6.3.5`.
    pub fn template_dir(&self) -> PathBuf {
        self.working_dir.join(format!(
            "native-template-{}",
            self.template_version.trim_start_matches('v')
        ))
    }

    /// Where the native template archive is downloaded to.
    pub fn template_archive(&self) -> PathBuf {
        self.working_dir
            .join(format!("{}.zip", self.template_version))
    }

    /// Android bundle produced by MxBuild's native packager.
    pub fn android_bundle_dir(&self) -> PathBuf {
        self.deployment_dir.join("native").join("bundle").join("android")
    }
}

/// Artifacts produced by a build, after relocation to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifacts {
    /// The renamed debug APK, if Gradle produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apk: Option<PathBuf>,
    /// The renamed debug AAB, if Gradle produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aab: Option<PathBuf>,
}

impl BuildArtifacts {
    /// Returns true when neither artifact was found.
    pub fn is_empty(&self) -> bool {
        self.apk.is_none() && self.aab.is_none()
    }
}

/// Serializable record of a finished build, written as `build-summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub project_file: PathBuf,
    pub mx_version: String,
    pub template_version: String,
    pub release_number: String,
    pub app: AppSettings,
    pub artifacts: BuildArtifacts,
    /// RFC 3339 completion time.
    pub finished_at: String,
    pub elapsed_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier_component() {
        assert_eq!(sanitize_identifier_component("NativeApp02"), "nativeapp02");
        assert_eq!(sanitize_identifier_component("my-app_name"), "myappname");
        assert_eq!(sanitize_identifier_component("---"), "app");
    }

    #[test]
    fn test_app_settings_for_project() {
        let app = AppSettings::for_project(Path::new("/work/NativeApp02/NativeApp02.mpr"), "2.1.0");
        assert_eq!(app.app_name, "NativeApp02");
        assert_eq!(app.app_identifier, "com.mendix.nativeapp02");
        assert_eq!(app.app_version, "2.1.0");
        assert_eq!(app.build_number, 1);
        assert_eq!(app.runtime_url, DEFAULT_RUNTIME_URL);
    }

    #[test]
    fn test_build_plan_paths() {
        let plan = BuildPlan::new("/work/App/App.mpr", "/work/App/template_config.json")
            .template_version("v7.0.0");
        assert_eq!(plan.project_dir, PathBuf::from("/work/App"));
        assert_eq!(plan.working_dir, PathBuf::from("/work/App/build"));
        assert_eq!(plan.deployment_dir, PathBuf::from("/work/App/deployment"));
        assert_eq!(plan.output_dir, PathBuf::from("/work/App"));
        assert_eq!(
            plan.template_dir(),
            PathBuf::from("/work/App/build/native-template-7.0.0")
        );
        assert_eq!(
            plan.template_archive(),
            PathBuf::from("/work/App/build/v7.0.0.zip")
        );
        assert_eq!(
            plan.android_bundle_dir(),
            PathBuf::from("/work/App/deployment/native/bundle/android")
        );
    }

    #[test]
    fn test_template_dir_without_v_prefix() {
        let plan = BuildPlan::new("/p/App.mpr", "/p/t.json").template_version("6.3.5");
        assert_eq!(plan.template_dir(), PathBuf::from("/p/build/native-template-6.3.5"));
    }

    #[test]
    fn test_build_artifacts_is_empty() {
        assert!(BuildArtifacts::default().is_empty());
        let artifacts = BuildArtifacts {
            apk: Some(PathBuf::from("a.apk")),
            aab: None,
        };
        assert!(!artifacts.is_empty());
    }
}
