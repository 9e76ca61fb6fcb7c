//! Common utilities shared between the builders.
//!
//! ## Features
//!
//! - **Consistent command execution** - Every external tool runs through
//!   [`run_command`], which reports the exit status and captured output on
//!   failure
//! - **Explicit working directories** - Callers always set `current_dir`; the
//!   process working directory is never changed
//! - **Directory helpers** - Recursive merge-copy and idempotent removal used
//!   while staging the native template

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::types::BuildError;

/// Prints a section banner for a pipeline step.
pub fn print_section(message: &str) {
    println!("{}", "*".repeat(80));
    println!("{}", message);
}

/// Renders a command line for logs and dry-run output.
pub fn describe_command(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Runs an external command with consistent error handling.
///
/// In verbose mode the tool's output streams straight to the terminal;
/// otherwise it is captured and only shown if the command fails.
///
/// # Arguments
/// * `cmd` - The command to execute, with its `current_dir` already set
/// * `description` - Human-readable description of what the command does
/// * `verbose` - Stream output instead of capturing it
pub fn run_command(mut cmd: Command, description: &str, verbose: bool) -> Result<(), BuildError> {
    tracing::debug!(
        command = %describe_command(&cmd),
        cwd = ?cmd.get_current_dir(),
        "running {}",
        description
    );

    if verbose {
        let status = cmd
            .stdin(Stdio::null())
            .status()
            .map_err(|e| spawn_error(description, e))?;
        if !status.success() {
            return Err(BuildError::Build(format!(
                "{} failed.\n\nExit status: {}",
                description, status
            )));
        }
        return Ok(());
    }

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(description, e))?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BuildError::Build(format!(
            "{} failed.\n\n\
             Exit status: {}\n\n\
             Stdout:\n{}\n\n\
             Stderr:\n{}",
            description, output.status, stdout, stderr
        )));
    }
    Ok(())
}

/// Runs `cmd`, or only prints it when `dry_run` is set.
pub fn execute(
    cmd: Command,
    description: &str,
    verbose: bool,
    dry_run: bool,
) -> Result<(), BuildError> {
    if dry_run {
        println!("  [dry-run] {}: {}", description, describe_command(&cmd));
        return Ok(());
    }
    if verbose {
        println!("  Running: {}", describe_command(&cmd));
    }
    run_command(cmd, description, verbose)
}

fn spawn_error(description: &str, e: std::io::Error) -> BuildError {
    BuildError::Build(format!(
        "Failed to start {}.\n\n\
         Error: {}\n\n\
         Ensure the tool is installed and its home variable points at it.",
        description, e
    ))
}

/// Removes a directory tree if it exists.
pub fn remove_dir_if_exists(dir: &Path) -> Result<(), BuildError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| {
            BuildError::Build(format!("Failed to remove {}: {}", dir.display(), e))
        })?;
    }
    Ok(())
}

/// Copies `src` into `dest` recursively, merging with existing content.
///
/// Existing files in `dest` are overwritten; files only present in `dest`
/// are left alone.
pub fn copy_dir_merge(src: &Path, dest: &Path) -> Result<u64, BuildError> {
    if !src.is_dir() {
        return Err(BuildError::Build(format!(
            "Source directory not found: {}",
            src.display()
        )));
    }
    fs::create_dir_all(dest)?;

    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_merge(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| {
                BuildError::Build(format!(
                    "Failed to copy {} to {}: {}",
                    entry.path().display(),
                    target.display(),
                    e
                ))
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}
