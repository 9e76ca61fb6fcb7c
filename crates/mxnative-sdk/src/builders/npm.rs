//! npm steps inside the native template.
//!
//! npm is invoked through `node` and the CLI scripts bundled with the Node.js
//! distribution under `NODE_HOME`, so a system-wide `npm` on `PATH` is never
//! picked up by accident.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::builders::common::execute;
use crate::toolchain::Toolchain;
use crate::types::BuildError;

/// Runs npm commands in a native template checkout.
pub struct NpmBuilder {
    node_exe: PathBuf,
    npm_cli: PathBuf,
    npx_cli: PathBuf,
    template_dir: PathBuf,
    verbose: bool,
    dry_run: bool,
}

impl NpmBuilder {
    /// Creates a builder operating on `template_dir`.
    pub fn new(toolchain: &Toolchain, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            node_exe: toolchain.node_exe.clone(),
            npm_cli: toolchain.npm_cli.clone(),
            npx_cli: toolchain.npx_cli.clone(),
            template_dir: template_dir.into(),
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

    /// The template directory every command runs in.
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    fn node_command(&self, cli: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.node_exe);
        cmd.arg(cli).args(args).current_dir(&self.template_dir);
        cmd
    }

    /// `npm install`
    pub fn install_command(&self) -> Command {
        self.node_command(&self.npm_cli, &["install"])
    }

    /// `npm run configure`, which applies `config.json` to the native projects.
    pub fn configure_command(&self) -> Command {
        self.node_command(&self.npm_cli, &["run", "configure"])
    }

    /// `npx rimraf node_modules`
    pub fn clean_command(&self) -> Command {
        self.node_command(&self.npx_cli, &["rimraf", "node_modules"])
    }

    /// Installs dependencies and applies the app configuration.
    pub fn install_and_configure(&self) -> Result<(), BuildError> {
        if !self.dry_run && !self.template_dir.join("config.json").is_file() {
            return Err(BuildError::Build(format!(
                "config.json missing in {}; render the config template before running npm",
                self.template_dir.display()
            )));
        }
        execute(self.install_command(), "npm install", self.verbose, self.dry_run)?;
        execute(
            self.configure_command(),
            "npm run configure",
            self.verbose,
            self.dry_run,
        )
    }

    /// Removes `node_modules`.
    ///
    /// Cleanup happens after the artifacts are built, so a failure here is
    /// reported and otherwise ignored.
    pub fn clean(&self) {
        if let Err(e) = execute(
            self.clean_command(),
            "npx rimraf node_modules",
            self.verbose,
            self.dry_run,
        ) {
            tracing::warn!("failed to remove node_modules: {}", e);
            println!("  Warning: node_modules was not removed");
        }
    }
}
