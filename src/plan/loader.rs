//! Plan document loader.
//!
//! Reads a Terraform plan JSON document (the output of `terraform show
//! -json` or `terragrunt show -json`) from disk and materializes the
//! [`Plan`] structure. File-existence and document-validity failures are
//! surfaced here, before any aggregation runs.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{PlanError, PlatformError, Result};

use super::model::Plan;

/// Loader for Terraform plan JSON documents.
#[derive(Debug, Default)]
pub struct PlanLoader;

impl PlanLoader {
    /// Creates a new plan loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::FileNotFound`] if the file does not exist and
    /// [`PlanError::Malformed`] if it cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Plan> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(PlatformError::Plan(PlanError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlatformError::Plan(PlanError::Malformed {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_json(&content, Some(path))
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Malformed`] if the JSON is invalid or a change
    /// entry is missing its action list.
    pub fn parse_json(&self, content: &str, source: Option<&Path>) -> Result<Plan> {
        debug!("Parsing plan JSON document");

        let plan: Plan = serde_json::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            PlatformError::Plan(PlanError::Malformed {
                message: format!("JSON parse error: {e}"),
                location,
            })
        })?;

        if let Some(version) = &plan.terraform_version {
            debug!("Plan produced by terraform {version}");
        }
        debug!("Parsed plan with {} resource changes", plan.len());

        Ok(plan)
    }
}
