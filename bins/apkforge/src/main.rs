//! Apkforge CLI
//!
//! Resolves Android build variants from the project configuration and
//! drives the Gradle wrapper with the result.

use anyhow::Result;
use apkforge_cli::output::{format_count, format_duration, format_size, Status};
use apkforge_cli::progress;
use apkforge_core::config::Config;
use apkforge_core::error::exit_codes;
use apkforge_core::health::{HealthChecker, HealthStatus};
use apkforge_variant::executor::{BuildExecutor, GradleExecutor};
use apkforge_variant::{resolve, ArtifactKind, ResolvedBuildPlan, VariantCatalog};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "apkforge")]
#[command(about = "Build-variant resolution and signing tools for Android projects")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a build type into a build plan
    Resolve {
        /// Build type to resolve (e.g. debug, release)
        build_type: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the build configuration
    Validate {
        /// Treat missing keystores as errors
        #[arg(long)]
        deep: bool,
    },

    /// Resolve a build type and run the Gradle build
    Build {
        /// Build type to build
        #[arg(default_value = "debug")]
        build_type: String,
        /// Clean before building
        #[arg(long)]
        clean: bool,
        /// Build bundle (AAB) instead of APK
        #[arg(long)]
        bundle: bool,
    },

    /// Inspect signing configs
    Signing {
        #[command(subcommand)]
        action: SigningAction,
    },

    /// Diagnose environment
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SigningAction {
    /// List declared signing configs
    List,
    /// Show keystore details for one signing config
    Report {
        /// Signing config alias
        alias: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = Config::load(cli.config.as_deref().map(|p| p.to_str().unwrap()))?;

    let exit_code = match cli.command {
        Commands::Resolve { build_type, json } => {
            run_resolve(&build_type, json, &config)
        }
        Commands::Validate { deep } => {
            run_validate(deep, &config)
        }
        Commands::Build { build_type, clean, bundle } => {
            run_build(&build_type, clean, bundle, cli.quiet, cli.verbose, &config)
        }
        Commands::Signing { action } => match action {
            SigningAction::List => run_signing_list(&config),
            SigningAction::Report { alias } => run_signing_report(&alias, &config),
        },
        Commands::Doctor { json } => {
            run_doctor(json)
        }
    };

    std::process::exit(exit_code);
}

fn resolve_or_report(
    build_type: &str,
    config: &Config,
) -> std::result::Result<ResolvedBuildPlan, i32> {
    let catalog = VariantCatalog::from_schema(&config.schema);

    resolve(build_type, &catalog).map_err(|e| {
        let exit = e.exit_code();
        let err: apkforge_core::Error = e.into();
        Status::error(&err.to_string());
        exit
    })
}

fn run_resolve(build_type: &str, json: bool, config: &Config) -> i32 {
    let plan = match resolve_or_report(build_type, config) {
        Ok(plan) => plan,
        Err(code) => return code,
    };

    if json {
        match plan.to_json() {
            Ok(output) => println!("{}", output),
            Err(e) => {
                Status::error(&format!("Serialization error: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    Status::header(&format!("Build plan: {}", plan.build_type.name));
    Status::detail("application", &plan.project.application_id);
    Status::detail(
        "version",
        &format!("{} ({})", plan.sdk.version_name, plan.sdk.version_code),
    );
    Status::detail(
        "sdk",
        &format!(
            "min {} / target {} / compile {}",
            plan.sdk.min_sdk, plan.sdk.target_sdk, plan.sdk.compile_sdk
        ),
    );
    Status::detail("minify", &plan.build_type.minify_enabled.to_string());
    Status::detail("debuggable", &plan.build_type.debuggable.to_string());
    match &plan.signing {
        Some(identity) => Status::detail(
            "signing",
            &format!("{} ({})", identity.alias, identity.store_path.display()),
        ),
        None => Status::detail("signing", "none (unsigned)"),
    }
    Status::detail("task", &plan.gradle_task(ArtifactKind::Apk));

    exit_codes::SUCCESS
}

fn run_validate(deep: bool, config: &Config) -> i32 {
    let result = apkforge_variant::verify::verify_schema(&config.schema, Path::new("."), deep);

    for warning in result.warnings() {
        Status::warning(&warning.to_string());
    }
    for error in result.errors() {
        Status::error(&error.to_string());
    }

    if result.is_valid() {
        Status::success(&format!(
            "Configuration valid ({})",
            format_count(result.warnings().len(), "warning", "warnings")
        ));
        exit_codes::SUCCESS
    } else {
        Status::error(&format!(
            "Validation failed: {}",
            format_count(result.errors().len(), "error", "errors")
        ));
        exit_codes::VALIDATION_ERROR
    }
}

fn run_build(
    build_type: &str,
    clean: bool,
    bundle: bool,
    quiet: bool,
    verbose: u8,
    config: &Config,
) -> i32 {
    let plan = match resolve_or_report(build_type, config) {
        Ok(plan) => plan,
        Err(code) => return code,
    };

    let executor = GradleExecutor::new(".");

    if clean {
        if !quiet {
            Status::info("Cleaning...");
        }
        match executor.clean() {
            Ok(result) if result.success => {}
            Ok(result) => {
                Status::error(&format!("Clean failed:\n{}", result.stderr));
                return exit_codes::FAILURE;
            }
            Err(e) => {
                Status::error(&format!("Clean failed: {}", e));
                return exit_codes::FAILURE;
            }
        }
    }

    let kind = if bundle { ArtifactKind::Bundle } else { ArtifactKind::Apk };
    let task = plan.gradle_task(kind);

    let spinner = (!quiet).then(|| progress::spinner(&format!("Running {}...", task)));
    let start = Instant::now();

    match executor.execute(&plan, kind) {
        Ok(result) if result.success => {
            if let Some(pb) = spinner {
                progress::finish_success(
                    &pb,
                    &format!("{} finished in {}", task, format_duration(start.elapsed())),
                );
            }
            if verbose > 0 {
                println!("{}", result.stdout);
            }
            if !plan.is_signed() {
                Status::warning("Artifact is unsigned");
            }
            exit_codes::SUCCESS
        }
        Ok(result) => {
            if let Some(pb) = spinner {
                progress::finish_error(&pb, &format!("{} failed", task));
            }
            eprintln!("{}", result.combined_output());
            exit_codes::FAILURE
        }
        Err(e) => {
            if let Some(pb) = spinner {
                progress::finish_error(&pb, &format!("{} failed", task));
            }
            Status::error(&e.to_string());
            exit_codes::FAILURE
        }
    }
}

fn run_signing_list(config: &Config) -> i32 {
    let catalog = VariantCatalog::from_schema(&config.schema);

    if catalog.identities.is_empty() {
        Status::info("No signing configs declared");
        return exit_codes::SUCCESS;
    }

    Status::header("Signing configs");
    for (alias, identity) in &catalog.identities {
        let referenced_by: Vec<&str> = catalog
            .build_types
            .values()
            .filter(|bt| bt.signing_config.as_deref() == Some(alias))
            .map(|bt| bt.name.as_str())
            .collect();

        let usage = if referenced_by.is_empty() {
            "unreferenced".to_string()
        } else {
            format!("used by {}", referenced_by.join(", "))
        };
        println!("  {}: {} ({})", alias, identity.store_path.display(), usage);
    }

    exit_codes::SUCCESS
}

fn run_signing_report(alias: &str, config: &Config) -> i32 {
    use apkforge_variant::keystore;

    let catalog = VariantCatalog::from_schema(&config.schema);
    let Some(identity) = catalog.identity(alias) else {
        Status::error(&format!("Unknown signing config: {}", alias));
        return exit_codes::RESOLVE_ERROR;
    };

    Status::header(&format!("Signing config: {}", alias));
    Status::detail("store file", &identity.store_path.display().to_string());

    match keystore::inspect(&identity.store_path) {
        Ok(info) => {
            Status::detail("size", &format_size(info.size_bytes));
            Status::detail("sha256", &info.sha256);
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&e.to_string());
            exit_codes::FAILURE
        }
    }
}

fn run_doctor(json: bool) -> i32 {
    let report = HealthChecker::new()
        .with_android_checks()
        .with_wrapper_check(Path::new("."))
        .run();

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                Status::error(&format!("Serialization error: {}", e));
                return exit_codes::FAILURE;
            }
        }
    } else {
        Status::header("Environment");
        for check in &report.checks {
            let line = match &check.message {
                Some(message) => format!("{}: {}", check.name, message),
                None => check.name.clone(),
            };
            match check.status {
                HealthStatus::Healthy => Status::success(&line),
                HealthStatus::Degraded => Status::warning(&line),
                _ => Status::error(&line),
            }
        }
    }

    if report.status.is_operational() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    }
}
