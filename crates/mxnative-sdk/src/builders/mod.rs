//! Build automation for Mendix native apps.
//!
//! Each builder wraps one external tool and knows only its own command lines
//! and working directory:
//!
//! | Builder | Tool | Output |
//! |---------|------|--------|
//! | [`MxBuildBuilder`] | MxBuild | Deployment with the native JS bundle |
//! | [`NpmBuilder`] | node + npm CLI | `node_modules/`, configured native projects |
//! | [`AndroidBuilder`] | Gradle wrapper | Debug APK and AAB |
//!
//! ## Builder Options
//!
//! All builders support:
//!
//! - **`verbose(bool)`** - Stream tool output and print each command
//! - **`dry_run(bool)`** - Print commands without running them
//!
//! ## Example
//!
//! ```ignore
//! use mxnative_sdk::builders::AndroidBuilder;
//!
//! let android = AndroidBuilder::new("build/native-template-6.3.5").verbose(true);
//! android.build()?;
//! let artifacts = android.relocate_artifacts(Path::new("output"), "1.0.0")?;
//! # Ok::<(), mxnative_sdk::BuildError>(())
//! ```

pub mod android;
pub mod common;
pub mod mxbuild;
pub mod npm;

// Re-export builders
pub use android::AndroidBuilder;
pub use mxbuild::MxBuildBuilder;
pub use npm::NpmBuilder;
