// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Dataplat Deploy
//!
//! Deployment orchestration and Terraform plan summarization for the AWS
//! serverless data platform.
//!
//! ## Overview
//!
//! The tool wraps Terraform/Terragrunt for an environment-per-directory
//! infrastructure repository:
//!
//! - Summarize a Terraform plan JSON document into text, Markdown, or JSON
//!   reports grouped by action, AWS service, and module
//! - Validate an environment's configuration before deploying
//! - Sequence the full pipeline: prerequisite checks, plan, confirmation,
//!   apply, post-deploy checks, and a deployment record
//!
//! ## Architecture
//!
//! The summarizer is a pure core: the plan is materialized once
//! ([`plan::PlanLoader`]), classified and aggregated in a single pass
//! ([`summary::PlanSummary`]), and rendered without side effects
//! ([`summary::summarize`]). The orchestrator ([`deploy::Deployer`]) drives
//! external tools through a mockable command-runner seam and feeds their
//! plan output to the core.
//!
//! ## Modules
//!
//! - [`plan`]: Plan document model and loader
//! - [`summary`]: Classification, aggregation, and report rendering
//! - [`deploy`]: Deployment orchestration and AWS checks
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```no_run
//! use dataplat_deploy::plan::PlanLoader;
//! use dataplat_deploy::summary::{summarize, SummaryFormat};
//!
//! # fn main() -> dataplat_deploy::error::Result<()> {
//! let plan = PlanLoader::new().load_file("plan.json")?;
//! let report = summarize(&plan, true, SummaryFormat::Text);
//! print!("{report}");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod deploy;
pub mod error;
pub mod plan;
pub mod summary;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, TargetArgs};
pub use deploy::{
    CommandRunner, DeployOptions, Deployer, DeploymentRecord, Environment, PlanOutcome,
    PlatformVerifier, ProcessRunner, Region,
};
pub use error::{DeployError, PlanError, PlatformError, Result, ToolError};
pub use plan::{Action, ActionKey, Plan, PlanLoader, ResourceChange};
pub use summary::{summarize, PlanSummary, SummaryFormat};
