//! Configuration file support for mxnative.
//!
//! This module provides support for `mxnative.toml` configuration files that
//! let a project keep its Mendix version, native template version and app
//! settings next to the `.mpr` file instead of repeating CLI flags.
//!
//! ## Configuration File Location
//!
//! The configuration file is searched for in the following order:
//! 1. The project file's directory (`<project>/mxnative.toml`)
//! 2. Parent directories (up to the repository root or filesystem root)
//!
//! Relative paths inside the file are resolved against the file's directory.
//!
//! ## Example Configuration
//!
//! ```toml
//! [project]
//! mx_version = "9.24.0.2965"
//! template_version = "v7.0.0"
//! config_template = "template_config.json"
//! output_dir = "output"
//!
//! [app]
//! app_identifier = "myapp.nativeapp02"
//! app_name = "NativeApp02"
//! app_version = "1.0.0"
//! build_number = 1
//! runtime_url = "http://192.168.0.42:8080"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = "mxnative.toml";

/// Root configuration structure for `mxnative.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MxNativeConfig {
    /// Build-level configuration.
    pub project: ProjectConfig,

    /// Values rendered into the app's `config.json`.
    pub app: AppConfig,
}

/// Build-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Mendix version selecting `$MENDIX_HOME/<version>/modeler/mxbuild`.
    pub mx_version: Option<String>,

    /// Native template git tag (e.g. "v7.0.0").
    pub template_version: Option<String>,

    /// Path of the config template.
    pub config_template: Option<PathBuf>,

    /// Folder receiving the renamed APK and AAB.
    ///
    /// Defaults to the project directory.
    pub output_dir: Option<PathBuf>,
}

/// App settings; every field is optional and falls back to a value derived
/// from the project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_identifier: Option<String>,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub build_number: Option<u32>,
    pub runtime_url: Option<String>,
}

impl MxNativeConfig {
    /// Loads configuration from the specified file path.
    ///
    /// Relative `config_template` and `output_dir` entries are resolved
    /// against the directory containing the file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: MxNativeConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        if let Some(base) = path.parent() {
            config.project.config_template = config
                .project
                .config_template
                .map(|p| resolve_relative(base, p));
            config.project.output_dir = config
                .project
                .output_dir
                .map(|p| resolve_relative(base, p));
        }

        Ok(config)
    }

    /// Attempts to find and load configuration starting from the specified directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Some((config, path)))` - Found and loaded configuration with its path
    /// * `Ok(None)` - No configuration file found
    /// * `Err` - If a config file was found but couldn't be parsed
    pub fn discover_from(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.is_file() {
                let config = Self::load_from_file(&config_path)?;
                return Ok(Some((config, config_path)));
            }

            // Stop at repository root or filesystem root
            if current.join(".git").exists() || !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Generates a starter configuration file as a formatted TOML string.
    ///
    /// This includes helpful comments explaining each configuration option.
    ///
    /// # Arguments
    ///
    /// * `app_name` - Display name of the app, usually the project file stem
    /// * `config_template` - Path to the config template, relative to the file
    pub fn generate_starter_toml(app_name: &str, config_template: &str) -> String {
        let identifier = mxnative_sdk::types::sanitize_identifier_component(app_name);

        format!(
            r#"# mxnative configuration file
# CLI flags override these settings when provided.

[project]
# Mendix version installed under $MENDIX_HOME (default: {mx_version})
mx_version = "{mx_version}"

# Native template release tag (default: {template_version})
template_version = "{template_version}"

# Template rendered into the native template's config.json
config_template = "{config_template}"

# Folder receiving the APK and AAB (default: the project directory)
# output_dir = "output"

[app]
app_identifier = "com.mendix.{identifier}"
app_name = "{app_name}"

# Defaults to the release number given with --release-number
# app_version = "1.0.0"

build_number = 1

# Mendix runtime the app connects to
runtime_url = "{runtime_url}"
"#,
            mx_version = mxnative_sdk::types::DEFAULT_MX_VERSION,
            template_version = mxnative_sdk::types::DEFAULT_TEMPLATE_VERSION,
            config_template = config_template,
            identifier = identifier,
            app_name = app_name,
            runtime_url = mxnative_sdk::types::DEFAULT_RUNTIME_URL,
        )
    }
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Configuration resolver that merges config file values with CLI arguments.
///
/// CLI arguments always take precedence over config file values.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    /// Loaded configuration, if any.
    pub config: Option<MxNativeConfig>,

    /// Path to the loaded config file, if any.
    pub config_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Creates a resolver by discovering configuration from `start_dir` upward.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        match MxNativeConfig::discover_from(start_dir)? {
            Some((config, path)) => Ok(Self {
                config: Some(config),
                config_path: Some(path),
            }),
            None => Ok(Self::default()),
        }
    }

    /// Creates a resolver from an explicit config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            config: Some(MxNativeConfig::load_from_file(path)?),
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Resolves a CLI value, using config as fallback.
    ///
    /// # Returns
    ///
    /// The resolved value, preferring CLI over config over default.
    pub fn resolve<T, F>(&self, cli_value: Option<T>, config_getter: F, default: T) -> T
    where
        F: FnOnce(&MxNativeConfig) -> Option<T>,
    {
        cli_value
            .or_else(|| self.config.as_ref().and_then(config_getter))
            .unwrap_or(default)
    }

    /// Like [`resolve`](Self::resolve) without a default.
    pub fn resolve_opt<T, F>(&self, cli_value: Option<T>, config_getter: F) -> Option<T>
    where
        F: FnOnce(&MxNativeConfig) -> Option<T>,
    {
        cli_value.or_else(|| self.config.as_ref().and_then(config_getter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MxNativeConfig::default();
        assert!(config.project.mx_version.is_none());
        assert!(config.project.config_template.is_none());
        assert!(config.app.build_number.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mxnative.toml");

        let toml_content = r#"
[project]
mx_version = "9.24.0.2965"
template_version = "v7.0.0"
config_template = "template_config.json"
output_dir = "/abs/output"

[app]
app_identifier = "myapp.nativeapp02"
app_name = "NativeApp02"
build_number = 12
runtime_url = "http://192.168.0.42:8080"
"#;

        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = MxNativeConfig::load_from_file(&config_path).unwrap();

        assert_eq!(config.project.mx_version.as_deref(), Some("9.24.0.2965"));
        assert_eq!(config.project.template_version.as_deref(), Some("v7.0.0"));
        assert_eq!(
            config.project.config_template,
            Some(temp_dir.path().join("template_config.json"))
        );
        assert_eq!(config.project.output_dir, Some(PathBuf::from("/abs/output")));
        assert_eq!(config.app.app_identifier.as_deref(), Some("myapp.nativeapp02"));
        assert_eq!(config.app.build_number, Some(12));
        assert!(config.app.app_version.is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mxnative.toml");
        std::fs::write(&config_path, "[app]\nbuild_number = \"one\"\n").unwrap();

        let err = MxNativeConfig::load_from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mxnative.toml");
        std::fs::write(&config_path, "[project]\nmx_version = \"10.6.0\"\n").unwrap();
        let nested = temp_dir.path().join("apps").join("NativeApp02");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = MxNativeConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.project.mx_version.as_deref(), Some("10.6.0"));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_no_config() {
        let temp_dir = TempDir::new().unwrap();
        // Create a .git directory to stop the search
        std::fs::create_dir(temp_dir.path().join(".git")).unwrap();

        let result = MxNativeConfig::discover_from(temp_dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_config_resolver() {
        let mut config = MxNativeConfig::default();
        config.app.build_number = Some(7);
        let resolver = ConfigResolver {
            config: Some(config),
            config_path: None,
        };

        // CLI value takes precedence
        let result = resolver.resolve(Some(9), |c| c.app.build_number, 1);
        assert_eq!(result, 9);

        // Config value used when CLI is None
        let result = resolver.resolve(None, |c| c.app.build_number, 1);
        assert_eq!(result, 7);

        // Default when neither is set
        let result = resolver.resolve(None, |c| c.app.app_name.clone(), "x".to_string());
        assert_eq!(result, "x");
    }

    #[test]
    fn test_generate_starter_toml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mxnative.toml");
        std::fs::write(
            &path,
            MxNativeConfig::generate_starter_toml("NativeApp02", "template_config.json"),
        )
        .unwrap();

        let config = MxNativeConfig::load_from_file(&path).unwrap();
        assert_eq!(config.app.app_identifier.as_deref(), Some("com.mendix.nativeapp02"));
        assert_eq!(config.app.app_name.as_deref(), Some("NativeApp02"));
        assert_eq!(config.app.build_number, Some(1));
        assert_eq!(
            config.project.mx_version.as_deref(),
            Some(mxnative_sdk::types::DEFAULT_MX_VERSION)
        );
        assert_eq!(
            config.project.config_template,
            Some(temp_dir.path().join("template_config.json"))
        );
    }
}
