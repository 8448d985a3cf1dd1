//! Deployment orchestration.
//!
//! Sequences external tool invocations for one environment: prerequisite
//! validation, plan generation, apply, destroy, post-deploy checks, and the
//! deployment record. All process execution goes through the
//! [`CommandRunner`] seam.

mod metadata;
mod options;
mod orchestrator;
mod runner;
mod terragrunt;
mod verify;

pub use metadata::{generate_deployment_id, DeploymentRecord};
pub use options::{is_module_dir, DeployOptions, Environment, Region};
pub use orchestrator::Deployer;
pub use runner::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use terragrunt::{PlanOutcome, Terragrunt};
pub use verify::{PlatformVerifier, ResourceCheck};
