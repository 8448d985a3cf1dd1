//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::deploy::{DeployOptions, Environment, Region};
use crate::summary::SummaryFormat;

/// Dataplat - deployment orchestration for the serverless data platform.
#[derive(Parser, Debug)]
#[command(name = "dataplat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root of the infrastructure repository.
    #[arg(long, global = true, default_value = ".", env = "DATAPLAT_PROJECT_ROOT")]
    pub project_root: PathBuf,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a Terraform plan JSON document.
    Summarize {
        /// Path to the plan JSON file (`terraform show -json` output).
        plan_json: PathBuf,

        /// Show detailed breakdown by service and module.
        #[arg(short, long)]
        details: bool,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: SummaryFormat,
    },

    /// Validate the Terraform configuration for an environment.
    Validate {
        /// Deployment target.
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Generate and summarize the deployment plan.
    Plan {
        /// Deployment target.
        #[command(flatten)]
        target: TargetArgs,

        /// Show detailed breakdown by service and module.
        #[arg(short, long)]
        details: bool,

        /// Output format for the summary.
        #[arg(short, long, default_value = "text")]
        format: SummaryFormat,
    },

    /// Run the full deployment pipeline (validate, plan, apply, verify).
    Deploy {
        /// Deployment target.
        #[command(flatten)]
        target: TargetArgs,

        /// Skip prerequisite validation.
        #[arg(long)]
        skip_validation: bool,

        /// Apply without the confirmation prompt.
        #[arg(short = 'y', long)]
        auto_approve: bool,

        /// Generate the plan only, do not apply.
        #[arg(long)]
        dry_run: bool,
    },

    /// Destroy deployed resources for an environment.
    Destroy {
        /// Deployment target.
        #[command(flatten)]
        target: TargetArgs,

        /// Skip the confirmation prompt.
        #[arg(short = 'y', long)]
        auto_approve: bool,
    },
}

/// Environment, region, and module selection shared by deployment commands.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Target environment.
    #[arg(short, long)]
    pub environment: Environment,

    /// Target AWS region.
    #[arg(short, long)]
    pub region: Region,

    /// Specific modules to target (default: all modules).
    #[arg(short, long, num_args = 0..)]
    pub modules: Vec<String>,
}

impl TargetArgs {
    /// Builds deployment options from the target selection and run flags.
    #[must_use]
    pub fn into_options(
        self,
        project_root: PathBuf,
        skip_validation: bool,
        auto_approve: bool,
        dry_run: bool,
    ) -> DeployOptions {
        DeployOptions {
            environment: self.environment,
            region: self.region,
            modules: self.modules,
            skip_validation,
            auto_approve,
            dry_run,
            project_root,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
