//! # mxnative
//!
//! Command-line tool for building unsigned debug Android packages from Mendix
//! native projects.
//!
//! ## Overview
//!
//! `mxnative` is the CLI front end of [`mxnative_sdk`]. It resolves flags,
//! `mxnative.toml` and environment variables into a build plan and runs the
//! SDK pipeline: MxBuild, native template, npm, Gradle.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write mxnative.toml and a starter config template next to the project
//! cd /work/NativeApp02 && mxnative init
//!
//! # Check JAVA_HOME, NODE_HOME and MENDIX_HOME
//! mxnative check --mx-version 9.24.0.2965
//!
//! # Build the APK and AAB
//! mxnative build /work/NativeApp02/NativeApp02.mpr \
//!     -c /work/NativeApp02/template_config.json -o /work/NativeApp02/output \
//!     -m 9.24.0.2965 -t v7.0.0
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `build` | Build the debug APK and AAB |
//! | `render-config` | Render a config template without building |
//! | `check` | Validate the build environment |
//! | `init` | Write a starter `mxnative.toml` and config template |
//!
//! ## CLI Flags
//!
//! Global flags available on all commands:
//!
//! - **`--dry-run`** - Print every step without running tools or touching files
//! - **`--verbose` / `-v`** - Stream tool output and enable debug logging
//!
//! ## Modules
//!
//! - [`config`] - Configuration file support for `mxnative.toml`

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mxnative_sdk::builders::common::print_section;
use mxnative_sdk::template::{ConfigTemplateProcessor, STARTER_TEMPLATE};
use mxnative_sdk::types::{
    DEFAULT_MX_VERSION, DEFAULT_RELEASE_NUMBER, DEFAULT_TEMPLATE_VERSION,
};
use mxnative_sdk::{AppSettings, BuildArtifacts, BuildPipeline, BuildPlan, Toolchain};

pub mod config;

use config::ConfigResolver;

/// Builds unsigned debug Android APK and AAB files from a Mendix project.
#[derive(Parser, Debug)]
#[command(name = "mxnative", author, version, about = "Mendix native Android build orchestrator", long_about = None)]
struct Cli {
    /// Print every step without running tools or touching files
    #[arg(long, global = true)]
    dry_run: bool,

    /// Stream tool output and enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the unsigned debug APK and AAB for a project.
    Build(BuildArgs),
    /// Render a config template into a config.json without building.
    RenderConfig {
        #[arg(long, help = "Config template to render")]
        template: PathBuf,
        #[arg(long, help = "Destination file (its directory must exist)")]
        output: PathBuf,
        #[arg(long, help = "Optional path to mxnative.toml")]
        config: Option<PathBuf>,
        #[command(flatten)]
        app: AppArgs,
    },
    /// Check that JAVA_HOME, NODE_HOME and MENDIX_HOME provide every tool.
    Check {
        #[arg(short, long, help = "Mendix version to look for under MENDIX_HOME")]
        mx_version: Option<String>,
    },
    /// Write a starter mxnative.toml and config template.
    Init {
        #[arg(long, default_value = "mxnative.toml", help = "Config file to write")]
        output: PathBuf,
        #[arg(
            long,
            default_value = "template_config.json",
            help = "Config template to write"
        )]
        template: PathBuf,
        #[arg(long, help = "App name (defaults to the config file's directory name)")]
        app_name: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct BuildArgs {
    /// The Mendix project file (.mpr)
    project_file: PathBuf,
    #[arg(short = 'n', long, help = "Release number used in artifact names [default: 1.0.0]")]
    release_number: Option<String>,
    #[arg(short, long, help = "Mendix version [default: 9.18.5.3736]")]
    mx_version: Option<String>,
    #[arg(
        short = 't',
        long,
        help = "Native template version [default: v6.3.5]"
    )]
    rn_template_version: Option<String>,
    #[arg(short = 'c', long, help = "The config template full path")]
    config_file: Option<PathBuf>,
    #[arg(
        short = 'o',
        long,
        help = "The folder the APK and AAB are copied to [default: project folder]"
    )]
    output_folder: Option<PathBuf>,
    #[arg(long, help = "Optional path to mxnative.toml")]
    config: Option<PathBuf>,
    #[arg(long, help = "Write build-summary.json into the output folder")]
    summary: bool,
    #[command(flatten)]
    app: AppArgs,
}

/// Values rendered into config.json; unset values come from mxnative.toml
/// or are derived from the project.
#[derive(Args, Debug, Default, Clone)]
struct AppArgs {
    #[arg(long)]
    app_identifier: Option<String>,
    #[arg(long)]
    app_name: Option<String>,
    #[arg(long, help = "App version [default: the release number]")]
    app_version: Option<String>,
    #[arg(long)]
    build_number: Option<u32>,
    #[arg(long)]
    runtime_url: Option<String>,
}

pub fn run() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Build(args) => cmd_build(args, cli.dry_run, cli.verbose),
        Command::RenderConfig {
            template,
            output,
            config,
            app,
        } => cmd_render_config(&template, &output, config.as_deref(), &app, cli.dry_run),
        Command::Check { mx_version } => cmd_check(mx_version.as_deref()),
        Command::Init {
            output,
            template,
            app_name,
        } => cmd_init(&output, &template, app_name, cli.dry_run),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("mxnative={}", level).parse()?)
        .add_directive(format!("mxnative_sdk={}", level).parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn load_dotenv() {
    for name in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(name);
    }
}

fn cmd_build(args: BuildArgs, dry_run: bool, verbose: bool) -> Result<()> {
    let start = Instant::now();
    print_section("Starting the build for your project...");
    if dry_run {
        println!("  Mode: dry-run (no changes will be made)");
    }

    let result = run_build(&args, dry_run, verbose, start);
    match &result {
        Ok(()) => println!("BUILD SUCCESSFUL!"),
        Err(_) => println!("Error on generating APK/AAB!"),
    }
    println!(
        "Elapsed Time: {:.2} minutes",
        start.elapsed().as_secs_f64() / 60.0
    );
    result
}

fn run_build(args: &BuildArgs, dry_run: bool, verbose: bool, start: Instant) -> Result<()> {
    let project_file = std::path::absolute(&args.project_file)
        .with_context(|| format!("resolving project file {:?}", args.project_file))?;
    let resolver = load_resolver(args.config.as_deref(), &project_file)?;

    let plan = resolve_build_plan(args, &project_file, &resolver)?;
    println!("  Project: {}", plan.project_file.display());
    println!("  Mendix version: {}", plan.mx_version);
    println!("  Native template: {}", plan.template_version);
    println!("  Release number: {}", plan.release_number);
    tracing::debug!(?plan, "resolved build plan");

    let toolchain = if dry_run {
        Toolchain::from_env(&plan.mx_version).unwrap_or_else(|e| {
            println!("  [dry-run] warning: {}", e);
            Toolchain::from_homes(
                Path::new("$JAVA_HOME"),
                Path::new("$NODE_HOME"),
                Path::new("$MENDIX_HOME"),
                &plan.mx_version,
            )
        })
    } else {
        Toolchain::from_env(&plan.mx_version)?
    };

    let pipeline = BuildPipeline::new(plan, toolchain)
        .verbose(verbose)
        .dry_run(dry_run);
    let artifacts = pipeline.run()?;
    ensure_artifacts(&artifacts, dry_run)?;

    if args.summary {
        let path = pipeline.write_summary(&artifacts, start.elapsed())?;
        println!("Build summary written to {}", path.display());
    }
    Ok(())
}

/// A real build must leave at least one of the APK and AAB behind.
fn ensure_artifacts(artifacts: &BuildArtifacts, dry_run: bool) -> Result<()> {
    if artifacts.is_empty() && !dry_run {
        bail!("Gradle finished but neither the APK nor the AAB was found");
    }
    Ok(())
}

fn load_resolver(config: Option<&Path>, project_file: &Path) -> Result<ConfigResolver> {
    let resolver = match config {
        Some(path) => ConfigResolver::from_file(path)?,
        None => {
            let start_dir = project_file.parent().unwrap_or(Path::new("."));
            ConfigResolver::discover(start_dir)?
        }
    };
    if let Some(path) = &resolver.config_path {
        println!("Using config file: {:?}", path);
    }
    Ok(resolver)
}

/// Merges CLI flags, `mxnative.toml` and built-in defaults into a plan.
fn resolve_build_plan(
    args: &BuildArgs,
    project_file: &Path,
    resolver: &ConfigResolver,
) -> Result<BuildPlan> {
    let config_template = resolver
        .resolve_opt(args.config_file.clone(), |c| c.project.config_template.clone())
        .context(
            "No config template given. Pass --config-file or set project.config_template in mxnative.toml",
        )?;

    let release_number = args
        .release_number
        .clone()
        .unwrap_or_else(|| DEFAULT_RELEASE_NUMBER.to_string());

    let mut plan = BuildPlan::new(project_file, config_template)
        .release_number(release_number.clone())
        .mx_version(resolver.resolve(
            args.mx_version.clone(),
            |c| c.project.mx_version.clone(),
            DEFAULT_MX_VERSION.to_string(),
        ))
        .template_version(resolver.resolve(
            args.rn_template_version.clone(),
            |c| c.project.template_version.clone(),
            DEFAULT_TEMPLATE_VERSION.to_string(),
        ))
        .app(resolve_app(&args.app, resolver, project_file, &release_number));

    if let Some(dir) =
        resolver.resolve_opt(args.output_folder.clone(), |c| c.project.output_dir.clone())
    {
        plan = plan.output_dir(dir);
    }
    Ok(plan)
}

/// Resolves each app setting as CLI, then config file, then derived default.
fn resolve_app(
    args: &AppArgs,
    resolver: &ConfigResolver,
    project_file: &Path,
    release_number: &str,
) -> AppSettings {
    let derived = AppSettings::for_project(project_file, release_number);
    AppSettings {
        app_identifier: resolver.resolve(
            args.app_identifier.clone(),
            |c| c.app.app_identifier.clone(),
            derived.app_identifier,
        ),
        app_name: resolver.resolve(
            args.app_name.clone(),
            |c| c.app.app_name.clone(),
            derived.app_name,
        ),
        app_version: resolver.resolve(
            args.app_version.clone(),
            |c| c.app.app_version.clone(),
            derived.app_version,
        ),
        build_number: resolver.resolve(
            args.build_number,
            |c| c.app.build_number,
            derived.build_number,
        ),
        runtime_url: resolver.resolve(
            args.runtime_url.clone(),
            |c| c.app.runtime_url.clone(),
            derived.runtime_url,
        ),
    }
}

fn cmd_render_config(
    template: &Path,
    output: &Path,
    config: Option<&Path>,
    app: &AppArgs,
    dry_run: bool,
) -> Result<()> {
    let resolver = match config {
        Some(path) => ConfigResolver::from_file(path)?,
        None => ConfigResolver::discover(template.parent().unwrap_or(Path::new(".")))?,
    };
    // Without a project file, derive fallbacks from the output's directory name
    let anchor = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("app"));
    let settings = resolve_app(app, &resolver, &anchor, DEFAULT_RELEASE_NUMBER);

    println!("Rendering {:?} -> {:?}", template, output);
    for (key, value) in [
        ("app_identifier", settings.app_identifier.as_str()),
        ("app_name", settings.app_name.as_str()),
        ("app_version", settings.app_version.as_str()),
        ("runtime_url", settings.runtime_url.as_str()),
    ] {
        println!("  {} = {}", key, value);
    }
    println!("  build_number = {}", settings.build_number);

    if dry_run {
        println!("\n[dry-run] Nothing was written.");
        return Ok(());
    }
    ConfigTemplateProcessor::from_settings(template, &settings)
        .write(output)
        .with_context(|| format!("rendering {:?}", template))?;
    println!("Done!");
    Ok(())
}

fn cmd_check(mx_version: Option<&str>) -> Result<()> {
    let mx_version = mx_version.unwrap_or(DEFAULT_MX_VERSION);
    println!("Checking the build environment (Mendix {})...", mx_version);
    let toolchain = Toolchain::from_env(mx_version)?;
    report_toolchain(&toolchain)
}

fn report_toolchain(toolchain: &Toolchain) -> Result<()> {
    for (status, name, path) in toolchain_status(toolchain) {
        println!("  {:<8} {:<11} {}", status, name, path.display());
    }
    toolchain.check()?;
    println!("\nAll build tools found.");
    Ok(())
}

fn toolchain_status(toolchain: &Toolchain) -> Vec<(&'static str, &'static str, &Path)> {
    toolchain
        .entries()
        .into_iter()
        .map(|(name, path)| {
            let status = if path.is_file() { "ok" } else { "MISSING" };
            (status, name, path)
        })
        .collect()
}

fn cmd_init(
    config_path: &Path,
    template_path: &Path,
    app_name: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config_dir = std::path::absolute(config_path)
        .with_context(|| format!("resolving {:?}", config_path))?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let template_abs = std::path::absolute(template_path)
        .with_context(|| format!("resolving {:?}", template_path))?;
    // Keep the entry relative when both files share a directory
    let template_entry = match template_abs.strip_prefix(&config_dir) {
        Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
        Err(_) => template_abs.to_string_lossy().replace('\\', "/"),
    };
    let app_name = app_name
        .or_else(|| {
            config_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "App".to_string());

    println!("Initializing mxnative for {}...", app_name);
    ensure_can_write(config_path)?;
    ensure_can_write(template_path)?;
    if dry_run {
        println!("  [dry-run] write {:?}", config_path);
        println!("  [dry-run] write {:?}", template_path);
        return Ok(());
    }

    write_file(
        config_path,
        config::MxNativeConfig::generate_starter_toml(&app_name, &template_entry).as_bytes(),
    )?;
    write_file(template_path, STARTER_TEMPLATE.as_bytes())?;

    println!("  Generated {:?}", config_path);
    println!("  Generated {:?}", template_path);
    println!("\nNext steps:");
    println!("  1. Edit {:?} to set the Mendix version and runtime URL", config_path);
    println!("  2. Run 'mxnative check' to validate JAVA_HOME, NODE_HOME and MENDIX_HOME");
    println!("  3. Run 'mxnative build <project>.mpr' to build the APK and AAB");
    Ok(())
}

fn ensure_can_write(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("refusing to overwrite existing file: {:?}", path);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            bail!("directory does not exist: {:?}", parent);
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::MxNativeConfig;
    use tempfile::TempDir;

    fn build_args(project: &str) -> BuildArgs {
        BuildArgs {
            project_file: PathBuf::from(project),
            config_file: Some(PathBuf::from("/t/template_config.json")),
            ..Default::default()
        }
    }

    #[test]
    fn cli_parses_build_flags() {
        let cli = Cli::try_parse_from([
            "mxnative",
            "build",
            "/work/App/App.mpr",
            "-n",
            "2.0.0",
            "-m",
            "9.24.0.2965",
            "-t",
            "v7.0.0",
            "-c",
            "/work/template_config.json",
            "-o",
            "/work/out",
            "--build-number",
            "5",
            "--dry-run",
        ])
        .unwrap();
        assert!(cli.dry_run);
        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.release_number.as_deref(), Some("2.0.0"));
        assert_eq!(args.mx_version.as_deref(), Some("9.24.0.2965"));
        assert_eq!(args.rn_template_version.as_deref(), Some("v7.0.0"));
        assert_eq!(args.output_folder, Some(PathBuf::from("/work/out")));
        assert_eq!(args.app.build_number, Some(5));
    }

    #[test]
    fn build_plan_uses_defaults() {
        let args = build_args("/work/NativeApp02/NativeApp02.mpr");
        let plan = resolve_build_plan(
            &args,
            &args.project_file,
            &ConfigResolver::default(),
        )
        .unwrap();

        assert_eq!(plan.mx_version, DEFAULT_MX_VERSION);
        assert_eq!(plan.template_version, DEFAULT_TEMPLATE_VERSION);
        assert_eq!(plan.release_number, DEFAULT_RELEASE_NUMBER);
        assert_eq!(plan.output_dir, PathBuf::from("/work/NativeApp02"));
        assert_eq!(plan.app.app_name, "NativeApp02");
        assert_eq!(plan.app.app_identifier, "com.mendix.nativeapp02");
        assert_eq!(plan.app.app_version, DEFAULT_RELEASE_NUMBER);
    }

    #[test]
    fn build_plan_cli_overrides_config() {
        let mut config = MxNativeConfig::default();
        config.project.mx_version = Some("10.6.0".into());
        config.project.template_version = Some("v8.0.0".into());
        config.project.output_dir = Some(PathBuf::from("/cfg/out"));
        config.app.runtime_url = Some("http://cfg:8080".into());
        config.app.build_number = Some(4);
        let resolver = ConfigResolver {
            config: Some(config),
            config_path: None,
        };

        let mut args = build_args("/work/App/App.mpr");
        args.mx_version = Some("9.24.0.2965".into());
        args.release_number = Some("3.1.0".into());
        args.app.build_number = Some(9);

        let plan = resolve_build_plan(&args, &args.project_file, &resolver).unwrap();
        assert_eq!(plan.mx_version, "9.24.0.2965");
        assert_eq!(plan.template_version, "v8.0.0");
        assert_eq!(plan.output_dir, PathBuf::from("/cfg/out"));
        assert_eq!(plan.release_number, "3.1.0");
        assert_eq!(plan.app.app_version, "3.1.0");
        assert_eq!(plan.app.build_number, 9);
        assert_eq!(plan.app.runtime_url, "http://cfg:8080");
    }

    #[test]
    fn build_plan_requires_config_template() {
        let args = BuildArgs {
            project_file: PathBuf::from("/work/App/App.mpr"),
            ..Default::default()
        };
        let err = resolve_build_plan(&args, &args.project_file, &ConfigResolver::default())
            .unwrap_err();
        assert!(err.to_string().contains("No config template given"));
    }

    #[test]
    fn build_plan_takes_template_from_config() {
        let mut config = MxNativeConfig::default();
        config.project.config_template = Some(PathBuf::from("/cfg/template_config.json"));
        let resolver = ConfigResolver {
            config: Some(config),
            config_path: None,
        };
        let args = BuildArgs {
            project_file: PathBuf::from("/work/App/App.mpr"),
            ..Default::default()
        };
        let plan = resolve_build_plan(&args, &args.project_file, &resolver).unwrap();
        assert_eq!(plan.config_template, PathBuf::from("/cfg/template_config.json"));
    }

    #[test]
    fn render_config_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let template = temp_dir.path().join("template_config.json");
        fs::write(&template, "{\"name\": \"app_name\", \"build\": build_number}").unwrap();
        let output = temp_dir.path().join("config.json");
        let app = AppArgs {
            app_name: Some("NativeApp02".into()),
            build_number: Some(2),
            ..Default::default()
        };

        cmd_render_config(&template, &output, None, &app, false).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "{\"name\": \"NativeApp02\", \"build\": 2}"
        );
    }

    #[test]
    fn init_writes_starter_files() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(config::CONFIG_FILE_NAME);
        let template_path = temp_dir.path().join("template_config.json");
        cmd_init(&config_path, &template_path, Some("NativeApp02".into()), false).unwrap();

        let config = MxNativeConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.app.app_name.as_deref(), Some("NativeApp02"));
        assert_eq!(config.project.config_template, Some(template_path.clone()));
        let template = fs::read_to_string(&template_path).unwrap();
        assert_eq!(template, STARTER_TEMPLATE);

        // Second run refuses to overwrite
        let err =
            cmd_init(&config_path, &template_path, Some("NativeApp02".into()), false).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
    }

    #[test]
    fn init_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(config::CONFIG_FILE_NAME);
        let template_path = temp_dir.path().join("template_config.json");
        cmd_init(&config_path, &template_path, None, true).unwrap();
        assert!(!config_path.exists());
        assert!(!template_path.exists());
    }

    fn toolchain_in(root: &Path) -> Toolchain {
        Toolchain::from_homes(
            &root.join("jdk"),
            &root.join("node"),
            &root.join("mendix"),
            "9.24.0.2965",
        )
        .extractor(root.join("bin").join("unzip"))
    }

    #[test]
    fn check_lists_missing_tools() {
        let temp_dir = TempDir::new().unwrap();
        let toolchain = toolchain_in(temp_dir.path());
        fs::create_dir_all(toolchain.java_exe.parent().unwrap()).unwrap();
        fs::write(&toolchain.java_exe, "").unwrap();

        let status = toolchain_status(&toolchain);
        assert_eq!(status.len(), 6);
        assert_eq!((status[0].0, status[0].1), ("ok", "java"));
        assert!(status[1..].iter().all(|(s, _, _)| *s == "MISSING"));

        let err = report_toolchain(&toolchain).unwrap_err();
        assert!(err.to_string().contains("mxbuild not found"));
    }

    #[test]
    fn check_passes_with_every_tool() {
        let temp_dir = TempDir::new().unwrap();
        let toolchain = toolchain_in(temp_dir.path());
        for (_, path) in toolchain.entries() {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        assert!(toolchain_status(&toolchain).iter().all(|(s, _, _)| *s == "ok"));
        report_toolchain(&toolchain).unwrap();
    }

    #[test]
    fn build_without_artifacts_fails() {
        let err = ensure_artifacts(&BuildArtifacts::default(), false).unwrap_err();
        assert!(err.to_string().contains("neither the APK nor the AAB"));

        // Dry runs never produce artifacts
        ensure_artifacts(&BuildArtifacts::default(), true).unwrap();

        let aab_only = BuildArtifacts {
            apk: None,
            aab: Some(PathBuf::from("/out/app-appstore-debug-1.0.0.aab")),
        };
        ensure_artifacts(&aab_only, false).unwrap();
    }

    #[test]
    fn dry_run_build_with_summary_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let project_dir = temp_dir.path().join("NativeApp02");
        fs::create_dir_all(&project_dir).unwrap();
        let project_file = project_dir.join("NativeApp02.mpr");
        fs::write(&project_file, "mpr").unwrap();
        let template = project_dir.join("template_config.json");
        fs::write(&template, STARTER_TEMPLATE).unwrap();

        let args = BuildArgs {
            project_file: project_file.clone(),
            config_file: Some(template),
            summary: true,
            ..Default::default()
        };
        run_build(&args, true, false, Instant::now()).unwrap();

        assert!(!project_dir.join("build").exists());
        assert!(!project_dir.join(mxnative_sdk::pipeline::SUMMARY_FILE_NAME).exists());
    }

    #[test]
    fn summary_written_next_to_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let project_file = temp_dir.path().join("NativeApp02.mpr");
        let plan = BuildPlan::new(&project_file, temp_dir.path().join("template_config.json"));
        let pipeline = BuildPipeline::new(plan, toolchain_in(temp_dir.path()));
        let artifacts = BuildArtifacts {
            apk: Some(temp_dir.path().join("app-appstore-debug-1.0.0.apk")),
            aab: None,
        };

        ensure_artifacts(&artifacts, false).unwrap();
        let path = pipeline
            .write_summary(&artifacts, std::time::Duration::from_secs(75))
            .unwrap();

        assert_eq!(path, temp_dir.path().join(mxnative_sdk::pipeline::SUMMARY_FILE_NAME));
        let json = fs::read_to_string(path).unwrap();
        assert!(json.contains("app-appstore-debug-1.0.0.apk"));
    }
}
