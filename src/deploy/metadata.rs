//! Deployment records.
//!
//! Every orchestrated run writes a metadata file next to the invocation so
//! deployments can be traced afterwards: what was targeted, whether it
//! succeeded, and the plan summary it was approved against.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PlatformError, Result};

use super::options::DeployOptions;

/// Generates a timestamp-based deployment id (`YYYYMMDD-HHMMSS`, UTC).
#[must_use]
pub fn generate_deployment_id() -> String {
    Utc::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Persisted record of one deployment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Run identifier.
    pub deployment_id: String,
    /// When the record was written.
    pub timestamp: DateTime<Utc>,
    /// Target environment name.
    pub environment: String,
    /// Target region name.
    pub region: String,
    /// Modules the run targeted; empty means all.
    pub modules: Vec<String>,
    /// Whether the run completed successfully.
    pub success: bool,
    /// Rendered plan summary the run was approved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_summary: Option<String>,
}

impl DeploymentRecord {
    /// Creates a record for a finished run.
    #[must_use]
    pub fn new(
        deployment_id: impl Into<String>,
        options: &DeployOptions,
        success: bool,
        plan_summary: Option<String>,
    ) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            timestamp: Utc::now(),
            environment: options.environment.to_string(),
            region: options.region.to_string(),
            modules: options.modules.clone(),
            success,
            plan_summary,
        }
    }

    /// Writes the record as `deployment_metadata_<id>.json` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("deployment_metadata_{}.json", self.deployment_id));

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            PlatformError::internal(format!("Failed to serialize deployment record: {e}"))
        })?;
        std::fs::write(&path, content)?;

        info!("Deployment metadata saved to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::options::{Environment, Region};
    use tempfile::TempDir;

    fn options() -> DeployOptions {
        DeployOptions {
            environment: Environment::Dev,
            region: Region::UsEast1,
            modules: vec![String::from("storage")],
            skip_validation: false,
            auto_approve: true,
            dry_run: false,
            project_root: PathBuf::from("."),
        }
    }

    #[test]
    fn test_deployment_id_shape() {
        let id = generate_deployment_id();
        assert_eq!(id.len(), 15);
        assert_eq!(id.chars().nth(8), Some('-'));
    }

    #[test]
    fn test_record_round_trip() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let record = DeploymentRecord::new(
            "20250101-120000",
            &options(),
            true,
            Some(String::from("Total changes: 1 resources")),
        );

        let path = record.save(temp.path()).expect("Failed to save record");
        assert!(path.ends_with("deployment_metadata_20250101-120000.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: DeploymentRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.deployment_id, record.deployment_id);
        assert_eq!(loaded.environment, "dev");
        assert_eq!(loaded.region, "us-east-1");
        assert!(loaded.success);
        assert_eq!(loaded.plan_summary, record.plan_summary);
    }

    #[test]
    fn test_record_without_summary_omits_field() {
        let record = DeploymentRecord::new("20250101-120000", &options(), false, None);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("plan_summary"));
    }
}
