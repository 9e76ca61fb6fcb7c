//! Fetching the Mendix native template.
//!
//! The native template is the React Native project that wraps a Mendix app.
//! Each release is a git tag on GitHub; the tag archive is downloaded as a zip
//! and extracted into the build's working directory.

use std::fs::{self, File};
use std::path::Path;
use std::process::Command;
use std::time::Instant;

use reqwest::blocking::Client;

use crate::builders::common::run_command;
use crate::types::BuildError;

const ARCHIVE_BASE_URL: &str = "https://github.com/mendix/native-template/archive/refs/tags";
const USER_AGENT: &str = concat!("mxnative/", env!("CARGO_PKG_VERSION"));

/// URL of the zip archive for a native template tag (e.g. `v6.3.5`).
pub fn archive_url(version: &str) -> String {
    format!("{}/{}.zip", ARCHIVE_BASE_URL, version)
}

/// Format a file size in human-readable format (MB or KB).
fn format_file_size(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{} MB", bytes / 1_000_000)
    } else if bytes >= 1_000 {
        format!("{} KB", bytes / 1_000)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Streams `url` into `dest`, following redirects.
///
/// GitHub answers tag archive requests with a redirect to codeload; the
/// default client policy follows it.
pub fn download(url: &str, dest: &Path) -> Result<u64, BuildError> {
    let http = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| BuildError::Download(format!("building HTTP client: {}", e)))?;

    let start = Instant::now();
    let mut resp = http
        .get(url)
        .send()
        .map_err(|e| BuildError::Download(format!("requesting {}: {}", url, e)))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(BuildError::Download(format!(
            "{} returned {}. Check that the native template version exists.",
            url, status
        )));
    }

    let mut file = File::create(dest)?;
    let size = resp
        .copy_to(&mut file)
        .map_err(|e| BuildError::Download(format!("reading body of {}: {}", url, e)))?;

    println!(
        "  Downloaded {} in {:.1}s",
        format_file_size(size),
        start.elapsed().as_secs_f64()
    );
    Ok(size)
}

/// Builds the command that extracts `archive` into `dest_dir` with the
/// toolchain's extractor (`unzip`, or `tar` on Windows).
pub fn extract_command(extractor: &Path, archive: &Path, dest_dir: &Path) -> Command {
    let mut cmd = Command::new(extractor);
    if cfg!(target_os = "windows") {
        cmd.arg("-xf").arg(archive).arg("-C").arg(dest_dir);
    } else {
        cmd.arg("-q").arg("-o").arg(archive).arg("-d").arg(dest_dir);
    }
    cmd.current_dir(dest_dir);
    cmd
}

/// Extracts a zip archive into `dest_dir`.
pub fn extract(
    extractor: &Path,
    archive: &Path,
    dest_dir: &Path,
    verbose: bool,
) -> Result<(), BuildError> {
    if !archive.is_file() {
        return Err(BuildError::Build(format!(
            "Template archive not found at {}",
            archive.display()
        )));
    }
    fs::create_dir_all(dest_dir)?;
    run_command(
        extract_command(extractor, archive, dest_dir),
        "native template extraction",
        verbose,
    )
}
