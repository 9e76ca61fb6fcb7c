//! Build automation for Mendix native mobile apps.
//!
//! `mxnative-sdk` produces unsigned debug Android packages (APK) and bundles
//! (AAB) from a Mendix project file by driving MxBuild, the Mendix native
//! template, npm and Gradle.
//!
//! # Architecture
//!
//! - **Template**: renders the app's `config.json` from a template by ordered
//!   literal substitution ([`template::ConfigTemplateProcessor`])
//! - **Toolchain**: locates Java, Node.js and MxBuild from `JAVA_HOME`,
//!   `NODE_HOME` and `MENDIX_HOME`
//! - **Native template**: downloads and extracts the React Native template
//! - **Builders**: one per external tool (MxBuild, npm, Gradle)
//! - **Pipeline**: sequences everything for a [`BuildPlan`]
//!
//! # Example
//!
//! ```ignore
//! use mxnative_sdk::{BuildPipeline, BuildPlan, Toolchain};
//!
//! fn main() -> Result<(), mxnative_sdk::BuildError> {
//!     let plan = BuildPlan::new("/work/NativeApp02/NativeApp02.mpr", "/work/template_config.json")
//!         .mx_version("9.24.0.2965")
//!         .template_version("v7.0.0")
//!         .release_number("1.0.0");
//!     let toolchain = Toolchain::from_env(&plan.mx_version)?;
//!
//!     let artifacts = BuildPipeline::new(plan, toolchain).verbose(true).run()?;
//!     println!("APK: {:?}", artifacts.apk);
//!     Ok(())
//! }
//! ```

// Public modules
pub mod builders;
pub mod native_template;
pub mod pipeline;
pub mod template;
pub mod toolchain;
pub mod types;

// Re-export key types for convenience
pub use pipeline::BuildPipeline;
pub use template::{ConfigTemplateProcessor, TemplateError};
pub use toolchain::Toolchain;
pub use types::{AppSettings, BuildArtifacts, BuildError, BuildPlan, BuildSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
