//! Discovery of the external tools a build needs.
//!
//! Three environment variables locate everything:
//!
//! | Variable | Provides |
//! |----------|----------|
//! | `JAVA_HOME` | The JDK passed to MxBuild and used by Gradle |
//! | `NODE_HOME` | `node` plus the bundled `npm-cli.js` / `npx-cli.js` |
//! | `MENDIX_HOME` | One directory per installed Mendix version, each with `modeler/mxbuild` |
//! | `PATH` | The archive extractor: `unzip`, or `tar` on Windows |
//!
//! All resolved paths are absolute when the variables are; nothing here
//! depends on the process working directory.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::types::BuildError;

pub const JAVA_HOME: &str = "JAVA_HOME";
pub const NODE_HOME: &str = "NODE_HOME";
pub const MENDIX_HOME: &str = "MENDIX_HOME";

/// Tool that unpacks the native template archive. Windows ships bsdtar,
/// which reads zip archives.
pub const EXTRACTOR: &str = if cfg!(target_os = "windows") {
    "tar"
} else {
    "unzip"
};

/// Resolved locations of every external executable used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub java_home: PathBuf,
    pub java_exe: PathBuf,
    pub mxbuild_exe: PathBuf,
    pub node_exe: PathBuf,
    pub npm_cli: PathBuf,
    pub npx_cli: PathBuf,
    /// `unzip` (or `tar`) found on `PATH`; the bare name when it is not.
    pub extractor: PathBuf,
}

impl Toolchain {
    /// Resolves the toolchain from `JAVA_HOME`, `NODE_HOME` and `MENDIX_HOME`.
    ///
    /// Fails with [`BuildError::Environment`] naming the first variable that
    /// is unset or empty.
    pub fn from_env(mx_version: &str) -> Result<Self, BuildError> {
        let java_home = require_var(JAVA_HOME)?;
        let node_home = require_var(NODE_HOME)?;
        let mendix_home = require_var(MENDIX_HOME)?;
        Ok(Self::from_homes(&java_home, &node_home, &mendix_home, mx_version))
    }

    /// Resolves the toolchain from explicit home directories.
    pub fn from_homes(
        java_home: &Path,
        node_home: &Path,
        mendix_home: &Path,
        mx_version: &str,
    ) -> Self {
        let (node_exe, npm_bin) = node_layout(node_home);
        Self {
            java_home: java_home.to_path_buf(),
            java_exe: java_home.join("bin").join(exe("java")),
            mxbuild_exe: mendix_home
                .join(mx_version)
                .join("modeler")
                .join(exe("mxbuild")),
            npm_cli: npm_bin.join("npm-cli.js"),
            npx_cli: npm_bin.join("npx-cli.js"),
            node_exe,
            extractor: find_extractor(env::var_os("PATH")),
        }
    }

    /// Overrides the archive extractor found on `PATH`.
    pub fn extractor(mut self, path: impl Into<PathBuf>) -> Self {
        self.extractor = path.into();
        self
    }

    /// Returns a description of each resolved executable that does not exist.
    ///
    /// An empty list means every tool was found.
    pub fn missing(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(_, path)| !path.is_file())
            .map(|(name, path)| {
                if name == EXTRACTOR {
                    format!("{} not found on PATH (install it to extract the native template)", name)
                } else {
                    format!("{} not found at {}", name, path.display())
                }
            })
            .collect()
    }

    /// Fails with [`BuildError::Environment`] if any executable is missing.
    pub fn check(&self) -> Result<(), BuildError> {
        let missing = self.missing();
        if missing.is_empty() {
            return Ok(());
        }
        Err(BuildError::Environment(format!(
            "missing build tools:\n  - {}\n\n\
             Check {}, {} and {}, the requested Mendix version and PATH.",
            missing.join("\n  - "),
            JAVA_HOME,
            NODE_HOME,
            MENDIX_HOME
        )))
    }

    /// Named paths, in the order they are reported.
    pub fn entries(&self) -> Vec<(&'static str, &Path)> {
        vec![
            ("java", self.java_exe.as_path()),
            ("mxbuild", self.mxbuild_exe.as_path()),
            ("node", self.node_exe.as_path()),
            ("npm-cli.js", self.npm_cli.as_path()),
            ("npx-cli.js", self.npx_cli.as_path()),
            (EXTRACTOR, self.extractor.as_path()),
        ]
    }
}

fn require_var(name: &str) -> Result<PathBuf, BuildError> {
    match env::var_os(name) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(BuildError::Environment(format!(
            "'{}' environment variable is not defined",
            name
        ))),
    }
}

/// Appends the platform executable suffix.
fn exe(name: &str) -> String {
    format!("{}{}", name, env::consts::EXE_SUFFIX)
}

/// Searches each directory of `path_var` for the extractor executable.
fn find_extractor(path_var: Option<OsString>) -> PathBuf {
    let name = exe(EXTRACTOR);
    path_var
        .iter()
        .flat_map(env::split_paths)
        .map(|dir| dir.join(&name))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Locates `node` and npm's `bin` directory under `NODE_HOME`.
///
/// Windows distributions keep `node.exe` and `node_modules/` at the top
/// level; Unix distributions use `bin/node` and `lib/node_modules/`. The
/// Windows layout wins when both are present.
fn node_layout(node_home: &Path) -> (PathBuf, PathBuf) {
    let flat_node = node_home.join(exe("node"));
    let flat_npm = node_home.join("node_modules").join("npm").join("bin");
    if flat_node.is_file() || cfg!(target_os = "windows") {
        return (flat_node, flat_npm);
    }
    (
        node_home.join("bin").join(exe("node")),
        node_home
            .join("lib")
            .join("node_modules")
            .join("npm")
            .join("bin"),
    )
}
