//! Deployment orchestration.
//!
//! The [`Deployer`] sequences one deployment run over the selected
//! environment: tool and configuration validation, plan generation with
//! JSON conversion for summarization, apply, and destroy. Every external
//! invocation goes through the command-runner seam; a failed step aborts
//! the pipeline.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::plan::{Plan, PlanLoader};

use super::metadata::generate_deployment_id;
use super::options::{is_module_dir, DeployOptions};
use super::runner::CommandRunner;
use super::terragrunt::{PlanOutcome, Terragrunt};

/// Orchestrates one deployment run.
#[derive(Debug)]
pub struct Deployer<R> {
    options: DeployOptions,
    tools: Terragrunt<R>,
    deployment_id: String,
}

impl<R: CommandRunner> Deployer<R> {
    /// Creates a deployer for the given options and command runner.
    pub fn new(options: DeployOptions, runner: R) -> Self {
        Self {
            options,
            tools: Terragrunt::new(runner),
            deployment_id: generate_deployment_id(),
        }
    }

    /// Overrides the generated deployment id.
    #[must_use]
    pub fn with_deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = deployment_id.into();
        self
    }

    /// The identifier of this run, used for plan and metadata file names.
    #[must_use]
    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    /// The options this run operates on.
    #[must_use]
    pub const fn options(&self) -> &DeployOptions {
        &self.options
    }

    /// Plan file name written into each module directory.
    fn plan_file(&self) -> String {
        format!("deployment_plan_{}.out", self.deployment_id)
    }

    /// Resolves the module directories this run targets.
    ///
    /// With an explicit module list, missing directories are skipped with a
    /// warning. Without one, module directories are discovered under the
    /// environment directory; an environment that is itself a module (no
    /// subdirectories) is targeted directly.
    ///
    /// # Errors
    ///
    /// Returns an error when the environment directory is missing.
    pub fn target_dirs(&self) -> Result<Vec<PathBuf>> {
        let env_dir = self.options.ensure_environment_dir()?;

        if !self.options.all_modules() {
            let mut dirs = Vec::new();
            for module in &self.options.modules {
                let dir = self.options.module_dir(module);
                if dir.is_dir() {
                    dirs.push(dir);
                } else {
                    warn!("Module path does not exist: {}", dir.display());
                }
            }
            return Ok(dirs);
        }

        let mut dirs: Vec<PathBuf> = std::fs::read_dir(&env_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && is_module_dir(path))
            .collect();
        dirs.sort();

        if dirs.is_empty() && is_module_dir(&env_dir) {
            dirs.push(env_dir);
        }

        Ok(dirs)
    }

    /// Checks that the terraform and terragrunt binaries respond, logging
    /// their versions.
    ///
    /// # Errors
    ///
    /// Returns an error when either tool is missing or fails.
    pub async fn validate_tools(&self) -> Result<()> {
        let env_dir = self.options.ensure_environment_dir()?;

        let terraform = self.tools.terraform_version(&env_dir).await?;
        info!("Terraform version: {terraform}");

        let terragrunt = self.tools.terragrunt_version(&env_dir).await?;
        info!("Terragrunt version: {terragrunt}");

        Ok(())
    }

    /// Validates the Terraform configuration: formatting at the repository
    /// root, then `terragrunt validate` per selected module (or `run-all`
    /// across the environment).
    ///
    /// # Errors
    ///
    /// Returns an error on formatting drift or validation failure.
    pub async fn validate_configuration(&self) -> Result<()> {
        info!("Validating Terraform configuration");
        self.tools.fmt_check(&self.options.project_root).await?;

        if self.options.all_modules() {
            self.tools
                .validate_all(&self.options.ensure_environment_dir()?)
                .await?;
        } else {
            for dir in self.target_dirs()? {
                self.tools.validate(&dir).await?;
            }
        }

        Ok(())
    }

    /// Generates plans for every target module and merges their JSON
    /// documents into a single [`Plan`] for summarization.
    ///
    /// The outcome is [`PlanOutcome::ChangesPending`] when any module has
    /// pending changes.
    ///
    /// # Errors
    ///
    /// Returns an error when planning, conversion, or parsing fails.
    pub async fn generate_plan(&self) -> Result<(PlanOutcome, Plan)> {
        let dirs = self.target_dirs()?;
        let plan_file = self.plan_file();
        let loader = PlanLoader::new();

        let mut merged = Plan::default();
        let mut outcome = PlanOutcome::NoChanges;

        for dir in &dirs {
            info!("Planning {}", dir.display());
            if self.tools.plan(dir, &plan_file).await? == PlanOutcome::ChangesPending {
                outcome = PlanOutcome::ChangesPending;
            }

            let json = self.tools.show_json(dir, &plan_file).await?;
            let plan = loader.parse_json(&json, None)?;

            if merged.terraform_version.is_none() {
                merged.terraform_version = plan.terraform_version;
            }
            merged.resource_changes.extend(plan.resource_changes);
        }

        Ok((outcome, merged))
    }

    /// Applies the previously generated plan in every target module.
    ///
    /// # Errors
    ///
    /// Returns an error when any apply fails; remaining modules are not
    /// attempted.
    pub async fn apply(&self) -> Result<()> {
        let plan_file = self.plan_file();

        for dir in self.target_dirs()? {
            info!("Applying {}", dir.display());
            self.tools.apply(&dir, &plan_file).await?;
        }

        Ok(())
    }

    /// Destroys the selected modules (or the whole environment).
    ///
    /// # Errors
    ///
    /// Returns an error when the destroy fails.
    pub async fn destroy(&self) -> Result<()> {
        if self.options.all_modules() {
            self.tools
                .destroy_all(&self.options.ensure_environment_dir()?)
                .await
        } else {
            for dir in self.target_dirs()? {
                info!("Destroying {}", dir.display());
                self.tools.destroy(&dir).await?;
            }
            Ok(())
        }
    }
}
