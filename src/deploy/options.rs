//! Deployment target options.
//!
//! Typed selection of the environment, region, and module subset a
//! deployment run operates on, plus resolution of the environment working
//! directory inside the infrastructure repository.

use std::path::{Path, PathBuf};

use crate::error::{DeployError, PlatformError, Result};

/// Target environment for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Environment {
    /// Development environment.
    #[default]
    Dev,
    /// Staging environment.
    Staging,
    /// Production environment.
    Prod,
}

impl Environment {
    /// Returns the environment name as used in directory layouts and
    /// resource names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target AWS region for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Region {
    /// US East (N. Virginia).
    #[default]
    #[value(name = "us-east-1")]
    UsEast1,
    /// US West (Oregon).
    #[value(name = "us-west-2")]
    UsWest2,
}

impl Region {
    /// Returns the canonical AWS region name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsEast1 => "us-east-1",
            Self::UsWest2 => "us-west-2",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for one deployment run.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Target environment.
    pub environment: Environment,
    /// Target region.
    pub region: Region,
    /// Modules to operate on; empty means every module in the environment.
    pub modules: Vec<String>,
    /// Skip prerequisite validation.
    pub skip_validation: bool,
    /// Apply without the confirmation prompt.
    pub auto_approve: bool,
    /// Generate the plan only, never apply.
    pub dry_run: bool,
    /// Root of the infrastructure repository.
    pub project_root: PathBuf,
}

impl DeployOptions {
    /// Returns the environment working directory:
    /// `<project-root>/environments/<environment>/<region>`.
    #[must_use]
    pub fn environment_dir(&self) -> PathBuf {
        self.project_root
            .join("environments")
            .join(self.environment.as_str())
            .join(self.region.as_str())
    }

    /// Returns true when the run targets every module in the environment.
    #[must_use]
    pub fn all_modules(&self) -> bool {
        self.modules.is_empty()
    }

    /// Verifies the environment directory exists and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::EnvironmentMissing`] when the directory is
    /// absent.
    pub fn ensure_environment_dir(&self) -> Result<PathBuf> {
        let dir = self.environment_dir();
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(PlatformError::Deploy(DeployError::EnvironmentMissing {
                path: dir,
            }))
        }
    }

    /// Returns the directory of a named module within the environment.
    #[must_use]
    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.environment_dir().join(module)
    }
}

/// Returns true if a directory is a Terragrunt module (contains a
/// `terragrunt.hcl`).
#[must_use]
pub fn is_module_dir(dir: &Path) -> bool {
    dir.join("terragrunt.hcl").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DeployOptions {
        DeployOptions {
            environment: Environment::Staging,
            region: Region::UsWest2,
            modules: vec![],
            skip_validation: false,
            auto_approve: false,
            dry_run: false,
            project_root: PathBuf::from("/repo"),
        }
    }

    #[test]
    fn test_environment_dir_layout() {
        let opts = options();
        assert_eq!(
            opts.environment_dir(),
            PathBuf::from("/repo/environments/staging/us-west-2")
        );
        assert_eq!(
            opts.module_dir("networking"),
            PathBuf::from("/repo/environments/staging/us-west-2/networking")
        );
    }

    #[test]
    fn test_all_modules() {
        let mut opts = options();
        assert!(opts.all_modules());

        opts.modules = vec![String::from("storage")];
        assert!(!opts.all_modules());
    }

    #[test]
    fn test_ensure_environment_dir_missing() {
        let opts = options();
        let result = opts.ensure_environment_dir();
        assert!(matches!(
            result,
            Err(PlatformError::Deploy(DeployError::EnvironmentMissing { .. }))
        ));
    }

    #[test]
    fn test_ensure_environment_dir_exists() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut opts = options();
        opts.project_root = temp.path().to_path_buf();
        std::fs::create_dir_all(opts.environment_dir()).unwrap();

        assert!(opts.ensure_environment_dir().is_ok());
    }

    #[test]
    fn test_names() {
        assert_eq!(Environment::Prod.to_string(), "prod");
        assert_eq!(Region::UsEast1.to_string(), "us-east-1");
    }
}
