//! App config templating.
//!
//! The native template's `npm run configure` step reads a `config.json` with
//! the app's identifier, name, version, build number and runtime URL. This
//! module renders that file from a user-supplied template.
//!
//! ## Substitution rules
//!
//! Placeholders are the bare key names, with no delimiters:
//!
//! ```text
//! {"id": "app_identifier", "build": build_number}
//! ```
//!
//! Keys are applied one after another in a fixed order (`app_identifier`,
//! `app_name`, `app_version`, `build_number`, `runtime_url`), each replacing
//! every literal occurrence in the text produced by the previous key. Matching
//! is plain substring matching, so a key embedded in a longer word is replaced
//! too, and values are inserted without escaping.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::AppSettings;

/// Placeholder names, in substitution order.
pub const PLACEHOLDER_KEYS: [&str; 5] = [
    "app_identifier",
    "app_name",
    "app_version",
    "build_number",
    "runtime_url",
];

/// Errors raised while rendering a config template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template file is missing or could not be read.
    #[error("config template not found or unreadable: {path:?}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered document could not be written.
    ///
    /// Typically the destination's parent directory does not exist or is not
    /// writable.
    #[error("failed to write rendered config to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single placeholder and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub key: &'static str,
    pub value: String,
}

impl Substitution {
    fn new(key: &'static str, value: impl Display) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

/// Renders a config template by ordered literal-substring replacement.
///
/// Construction performs no I/O. [`write`](Self::write) may be called any
/// number of times; each call reads the template once and writes the
/// destination once.
///
/// # Example
///
/// ```no_run
/// use mxnative_sdk::template::ConfigTemplateProcessor;
///
/// let processor = ConfigTemplateProcessor::new(
///     "template_config.json",
///     "myapp.nativeapp02",
///     "NativeApp02",
///     "1.0.0",
///     1,
///     "http://192.168.0.42:8080",
/// );
/// processor.write("build/native-template-6.3.5/config.json")?;
/// # Ok::<(), mxnative_sdk::TemplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigTemplateProcessor {
    template_path: PathBuf,
    substitutions: [Substitution; 5],
}

impl ConfigTemplateProcessor {
    /// Creates a processor for the template at `template_path`.
    ///
    /// Values are rendered to text with [`Display`] once, here. The template
    /// path is not checked until [`write`](Self::write).
    pub fn new(
        template_path: impl Into<PathBuf>,
        app_identifier: impl Display,
        app_name: impl Display,
        app_version: impl Display,
        build_number: impl Display,
        runtime_url: impl Display,
    ) -> Self {
        let [identifier_key, name_key, version_key, build_key, url_key] = PLACEHOLDER_KEYS;
        Self {
            template_path: template_path.into(),
            substitutions: [
                Substitution::new(identifier_key, app_identifier),
                Substitution::new(name_key, app_name),
                Substitution::new(version_key, app_version),
                Substitution::new(build_key, build_number),
                Substitution::new(url_key, runtime_url),
            ],
        }
    }

    /// Creates a processor from [`AppSettings`].
    pub fn from_settings(template_path: impl Into<PathBuf>, app: &AppSettings) -> Self {
        Self::new(
            template_path,
            &app.app_identifier,
            &app.app_name,
            &app.app_version,
            app.build_number,
            &app.runtime_url,
        )
    }

    /// Path of the template this processor reads.
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// The ordered substitution mapping.
    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// Applies every substitution, in order, to `template`.
    pub fn render(&self, template: &str) -> String {
        self.substitutions
            .iter()
            .fold(template.to_string(), |text, sub| text.replace(sub.key, &sub.value))
    }

    /// Renders the template into `destination`, truncating any existing file.
    ///
    /// The template is read before the destination is opened, so a missing
    /// template never touches the destination.
    pub fn write(&self, destination: impl AsRef<Path>) -> Result<(), TemplateError> {
        let destination = destination.as_ref();
        let contents =
            fs::read_to_string(&self.template_path).map_err(|source| TemplateError::NotFound {
                path: self.template_path.clone(),
                source,
            })?;

        let rendered = self.render(&contents);

        fs::write(destination, rendered).map_err(|source| TemplateError::Write {
            path: destination.to_path_buf(),
            source,
        })
    }
}

/// Starter template written by `mxnative init`.
pub const STARTER_TEMPLATE: &str = include_str!("../templates/config.json.template");
