//! End-to-end build pipeline.
//!
//! [`BuildPipeline`] sequences the builders for one project:
//!
//! 1. Validate inputs (project file, config template, output folder, tools)
//! 2. Recreate the working directory, remove the previous deployment
//! 3. Download and extract the native template
//! 4. Run MxBuild and copy the Android bundle into the template
//! 5. Render the config template into the template's `config.json`
//! 6. `npm install` and `npm run configure`
//! 7. Gradle assemble (APK) and bundle (AAB)
//! 8. Remove `node_modules`
//! 9. Copy the artifacts to the output folder
//!
//! Every path comes from the [`BuildPlan`]; the process working directory is
//! never read or changed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::builders::common::{print_section, remove_dir_if_exists};
use crate::builders::{AndroidBuilder, MxBuildBuilder, NpmBuilder};
use crate::native_template;
use crate::template::ConfigTemplateProcessor;
use crate::toolchain::Toolchain;
use crate::types::{BuildArtifacts, BuildError, BuildPlan, BuildSummary};

/// File name `npm run configure` reads inside the native template.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// File name of the summary written by [`BuildPipeline::write_summary`].
pub const SUMMARY_FILE_NAME: &str = "build-summary.json";

/// Runs every build step for one [`BuildPlan`].
pub struct BuildPipeline {
    plan: BuildPlan,
    toolchain: Toolchain,
    verbose: bool,
    dry_run: bool,
}

impl BuildPipeline {
    pub fn new(plan: BuildPlan, toolchain: Toolchain) -> Self {
        Self {
            plan,
            toolchain,
            verbose: false,
            dry_run: false,
        }
    }

    /// Enables verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Prints every step without touching the filesystem or running tools
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    /// Checks every input before anything is modified.
    ///
    /// Missing tools are only reported in dry-run mode.
    pub fn validate(&self) -> Result<(), BuildError> {
        let plan = &self.plan;
        if !plan.project_file.is_file() {
            return Err(BuildError::Config(format!(
                "The given MPR project file '{}' does not exist",
                plan.project_file.display()
            )));
        }
        if !plan.config_template.is_file() {
            return Err(BuildError::Config(format!(
                "The given config template '{}' does not exist",
                plan.config_template.display()
            )));
        }
        if !plan.output_dir.is_dir() {
            return Err(BuildError::Config(format!(
                "The given output folder '{}' does not exist",
                plan.output_dir.display()
            )));
        }

        if self.dry_run {
            for missing in self.toolchain.missing() {
                println!("  [dry-run] warning: {}", missing);
            }
            Ok(())
        } else {
            self.toolchain.check()
        }
    }

    /// Runs the whole pipeline and returns the relocated artifacts.
    pub fn run(&self) -> Result<BuildArtifacts, BuildError> {
        self.validate()?;
        println!(
            "The output (APK and AAB) will be saved in: {}",
            self.plan.output_dir.display()
        );

        self.prepare_working_dir()?;
        let template_dir = self.fetch_native_template()?;
        self.run_mxbuild(&template_dir)?;
        self.render_config(&template_dir)?;

        print_section("Executing the npm commands in the native template folder");
        let npm = NpmBuilder::new(&self.toolchain, &template_dir)
            .verbose(self.verbose)
            .dry_run(self.dry_run);
        npm.install_and_configure()?;

        print_section("Building the APK and AAB");
        let android = AndroidBuilder::new(&template_dir)
            .verbose(self.verbose)
            .dry_run(self.dry_run);
        android.build()?;

        print_section("Cleaning the node_modules directory");
        npm.clean();

        print_section(&format!(
            "Copying the output to: {}",
            self.plan.output_dir.display()
        ));
        let artifacts =
            android.relocate_artifacts(&self.plan.output_dir, &self.plan.release_number)?;
        if let Some(apk) = &artifacts.apk {
            println!("The APK debug is available at: {}", apk.display());
        }
        if let Some(aab) = &artifacts.aab {
            println!("The AAB debug is available at: {}", aab.display());
        }

        print_section("Build pipeline DONE!");
        Ok(artifacts)
    }

    /// Removes the previous working and deployment directories and recreates
    /// the working directory.
    pub fn prepare_working_dir(&self) -> Result<(), BuildError> {
        for dir in [&self.plan.working_dir, &self.plan.deployment_dir] {
            if dir.exists() {
                print_section(&format!("Removing directory: {}", dir.display()));
                if !self.dry_run {
                    remove_dir_if_exists(dir)?;
                }
            }
        }

        print_section(&format!(
            "Recreating the working directory: {}",
            self.plan.working_dir.display()
        ));
        if !self.dry_run {
            fs::create_dir_all(&self.plan.working_dir)?;
        }
        Ok(())
    }

    /// Downloads and extracts the native template, returning its directory.
    pub fn fetch_native_template(&self) -> Result<PathBuf, BuildError> {
        let url = native_template::archive_url(&self.plan.template_version);
        let archive = self.plan.template_archive();
        let template_dir = self.plan.template_dir();

        print_section(&format!("Downloading the native template: {}", url));
        if self.dry_run {
            println!("  [dry-run] download {} -> {}", url, archive.display());
            println!("  [dry-run] extract into {}", self.plan.working_dir.display());
            return Ok(template_dir);
        }
        native_template::download(&url, &archive)?;

        print_section("Extracting the native template");
        native_template::extract(
            &self.toolchain.extractor,
            &archive,
            &self.plan.working_dir,
            self.verbose,
        )?;
        if !template_dir.is_dir() {
            return Err(BuildError::Build(format!(
                "Expected {} after extracting {}",
                template_dir.display(),
                archive.display()
            )));
        }
        println!("Done!");
        Ok(template_dir)
    }

    /// Runs MxBuild and stages the Android bundle into the template.
    pub fn run_mxbuild(&self, template_dir: &Path) -> Result<(), BuildError> {
        print_section("Running MxBuild");
        let mxbuild = MxBuildBuilder::new(&self.toolchain)
            .verbose(self.verbose)
            .dry_run(self.dry_run);
        mxbuild.build(&self.plan.project_file)?;

        print_section("Copying the Android bundle into the native template");
        mxbuild.stage_android_bundle(&self.plan.android_bundle_dir(), template_dir)?;
        Ok(())
    }

    /// Renders the config template into `<template_dir>/config.json`.
    pub fn render_config(&self, template_dir: &Path) -> Result<PathBuf, BuildError> {
        let dest = template_dir.join(CONFIG_FILE_NAME);
        print_section(&format!(
            "Rendering {} into {}",
            self.plan.config_template.display(),
            dest.display()
        ));
        if self.dry_run {
            return Ok(dest);
        }
        ConfigTemplateProcessor::from_settings(&self.plan.config_template, &self.plan.app)
            .write(&dest)?;
        Ok(dest)
    }

    /// Builds the summary record for a finished run.
    pub fn summary(&self, artifacts: &BuildArtifacts, elapsed: Duration) -> BuildSummary {
        let finished_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        BuildSummary {
            project_file: self.plan.project_file.clone(),
            mx_version: self.plan.mx_version.clone(),
            template_version: self.plan.template_version.clone(),
            release_number: self.plan.release_number.clone(),
            app: self.plan.app.clone(),
            artifacts: artifacts.clone(),
            finished_at,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// Writes `build-summary.json` into the output folder.
    pub fn write_summary(
        &self,
        artifacts: &BuildArtifacts,
        elapsed: Duration,
    ) -> Result<PathBuf, BuildError> {
        let path = self.plan.output_dir.join(SUMMARY_FILE_NAME);
        let json = serde_json::to_string_pretty(&self.summary(artifacts, elapsed))?;
        if self.dry_run {
            println!("  [dry-run] write {}", path.display());
            return Ok(path);
        }
        fs::write(&path, json)?;
        Ok(path)
    }
}
