//! Dataplat CLI entrypoint.
//!
//! This is the main entrypoint for the dataplat command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dataplat_deploy::cli::{Cli, Commands, TargetArgs};
use dataplat_deploy::deploy::{
    Deployer, DeploymentRecord, PlanOutcome, PlatformVerifier, ProcessRunner,
};
use dataplat_deploy::error::Result;
use dataplat_deploy::plan::PlanLoader;
use dataplat_deploy::summary::{summarize, SummaryFormat};

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let project_root = cli.project_root;

    match cli.command {
        Commands::Summarize {
            plan_json,
            details,
            format,
        } => cmd_summarize(&plan_json, details, format),
        Commands::Validate { target } => cmd_validate(project_root, target).await,
        Commands::Plan {
            target,
            details,
            format,
        } => cmd_plan(project_root, target, details, format).await,
        Commands::Deploy {
            target,
            skip_validation,
            auto_approve,
            dry_run,
        } => cmd_deploy(project_root, target, skip_validation, auto_approve, dry_run).await,
        Commands::Destroy {
            target,
            auto_approve,
        } => cmd_destroy(project_root, target, auto_approve).await,
    }
}

/// Summarize a plan JSON document.
fn cmd_summarize(plan_json: &Path, details: bool, format: SummaryFormat) -> Result<()> {
    let plan = PlanLoader::new().load_file(plan_json)?;

    if let Some(version) = &plan.terraform_version {
        info!("Plan produced by terraform {version}");
    }

    let report = summarize(&plan, details, format);
    print!("{report}");

    Ok(())
}

/// Validate the configuration for an environment.
async fn cmd_validate(project_root: PathBuf, target: TargetArgs) -> Result<()> {
    let options = target.into_options(project_root, false, false, false);
    let deployer = Deployer::new(options, ProcessRunner::new());

    deployer.validate_tools().await?;
    deployer.validate_configuration().await?;

    eprintln!("{} Configuration is valid", "✓".green());
    Ok(())
}

/// Generate and summarize the deployment plan.
async fn cmd_plan(
    project_root: PathBuf,
    target: TargetArgs,
    details: bool,
    format: SummaryFormat,
) -> Result<()> {
    let options = target.into_options(project_root, false, false, true);
    let deployer = Deployer::new(options, ProcessRunner::new());

    let (outcome, plan) = deployer.generate_plan().await?;

    let report = summarize(&plan, details, format);
    print!("{report}");

    if outcome == PlanOutcome::NoChanges {
        eprintln!("{} No changes detected in plan", "✓".green());
    }

    Ok(())
}

/// Run the full deployment pipeline.
async fn cmd_deploy(
    project_root: PathBuf,
    target: TargetArgs,
    skip_validation: bool,
    auto_approve: bool,
    dry_run: bool,
) -> Result<()> {
    let options = target.into_options(project_root.clone(), skip_validation, auto_approve, dry_run);
    let deployer = Deployer::new(options, ProcessRunner::new());

    info!("Starting deployment {}", deployer.deployment_id());
    info!("Environment: {}", deployer.options().environment);
    info!("Region: {}", deployer.options().region);
    if deployer.options().all_modules() {
        info!("Modules: all");
    } else {
        info!("Modules: {}", deployer.options().modules.join(", "));
    }

    // Validate prerequisites
    if !deployer.options().skip_validation {
        deployer.options().ensure_environment_dir()?;

        let verifier = PlatformVerifier::connect(deployer.options().region).await;
        let arn = verifier.caller_identity().await?;
        info!("AWS identity: {arn}");

        deployer.validate_tools().await?;
        deployer.validate_configuration().await?;
        eprintln!("{} All prerequisites validated", "✓".green());
    }

    // Generate plan
    let (outcome, plan) = deployer.generate_plan().await?;
    let report = summarize(&plan, true, SummaryFormat::Text);
    print!("{report}");

    if outcome == PlanOutcome::NoChanges {
        eprintln!("{} No changes detected in plan", "✓".green());
        save_record(&deployer, &project_root, true, report);
        return Ok(());
    }

    // Dry run stops before apply
    if deployer.options().dry_run {
        info!("Dry run mode - skipping apply");
        save_record(&deployer, &project_root, true, report);
        return Ok(());
    }

    // Confirm
    if !deployer.options().auto_approve
        && !confirm("Do you want to proceed with applying changes? [y/N]: ")?
    {
        save_record(&deployer, &project_root, false, report);
        return Err(dataplat_deploy::error::DeployError::Cancelled.into());
    }

    // Apply
    deployer.apply().await?;
    eprintln!("{} Terraform apply completed successfully", "✓".green());

    // Post-deploy checks
    let verifier = PlatformVerifier::connect(deployer.options().region).await;
    let environment = deployer.options().environment.as_str();
    let success = match verifier.check_resources(environment).await {
        Ok(check) => {
            eprintln!(
                "{} Post-deploy checks passed ({} buckets, {} functions)",
                "✓".green(),
                check.buckets,
                check.functions
            );
            true
        }
        Err(e) => {
            warn!("Post-deploy checks failed: {e}");
            false
        }
    };

    // Save metadata
    save_record(&deployer, &project_root, success, report);

    if success {
        eprintln!(
            "{} Deployment {} completed successfully",
            "✓".green(),
            deployer.deployment_id()
        );
    } else {
        eprintln!(
            "{} Deployment {} completed with check failures",
            "⚠".yellow(),
            deployer.deployment_id()
        );
    }

    Ok(())
}

/// Destroy deployed resources.
async fn cmd_destroy(project_root: PathBuf, target: TargetArgs, auto_approve: bool) -> Result<()> {
    let options = target.into_options(project_root, false, auto_approve, false);
    let deployer = Deployer::new(options, ProcessRunner::new());

    eprintln!(
        "This will destroy all resources in {}/{}.",
        deployer.options().environment,
        deployer.options().region
    );

    // Confirm
    if !deployer.options().auto_approve {
        eprint!("\nThis action is IRREVERSIBLE. Type 'destroy' to confirm: ");
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if input.trim() != "destroy" {
            eprintln!("Destruction cancelled.");
            return Ok(());
        }
    }

    deployer.destroy().await?;
    eprintln!("\n{} All resources destroyed.", "✓".green());

    Ok(())
}

/// Prompts for a yes/no confirmation on the terminal.
fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt}");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Writes the deployment record, logging instead of failing the run.
fn save_record<R: dataplat_deploy::deploy::CommandRunner>(
    deployer: &Deployer<R>,
    project_root: &Path,
    success: bool,
    plan_summary: String,
) {
    let record = DeploymentRecord::new(
        deployer.deployment_id(),
        deployer.options(),
        success,
        Some(plan_summary),
    );

    if let Err(e) = record.save(project_root) {
        warn!("Failed to save deployment metadata: {e}");
    }
}
