//! Error types for the data platform deployment tooling.
//!
//! This module provides the error hierarchy for all operations in the
//! deployment lifecycle: plan ingestion, external tool invocation, and
//! orchestration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the deployment tooling.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Plan document errors (the invalid-input family).
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// External tool invocation errors.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Deployment orchestration errors.
    #[error("Deployment error: {0}")]
    Deploy(#[from] DeployError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while acquiring or parsing a Terraform plan document.
///
/// These surface before any aggregation begins; the summarizer itself never
/// fails on a structurally valid plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan file was not found.
    #[error("Plan file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The plan document could not be parsed.
    #[error("Malformed plan document: {message}")]
    Malformed {
        /// Description of the parse failure.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },
}

/// Errors from invoking external tools (terraform, terragrunt).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool binary could not be launched.
    #[error("Tool not found: {tool} ({message})")]
    NotFound {
        /// Name of the missing tool.
        tool: String,
        /// Description of the launch failure.
        message: String,
    },

    /// The tool exited with an unexpected non-zero status.
    #[error("{tool} exited with status {status}: {stderr}")]
    Failed {
        /// Name of the tool.
        tool: String,
        /// Exit status code.
        status: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// The tool was terminated by a signal before exiting.
    #[error("{tool} was terminated before exiting")]
    Terminated {
        /// Name of the tool.
        tool: String,
    },
}

/// Deployment orchestration errors.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The environment directory does not exist.
    #[error("Environment directory not found: {path}")]
    EnvironmentMissing {
        /// Expected environment directory.
        path: PathBuf,
    },

    /// AWS credentials could not be validated.
    #[error("AWS credential validation failed: {message}")]
    CredentialsInvalid {
        /// Description of the credential failure.
        message: String,
    },

    /// A prerequisite validation step failed.
    #[error("Prerequisite validation failed: {message}")]
    ValidationFailed {
        /// Description of the failed step.
        message: String,
    },

    /// The user declined the confirmation prompt.
    #[error("Deployment cancelled by user")]
    Cancelled,

    /// A post-deploy check could not verify the deployed resources.
    #[error("Post-deploy check failed: {message}")]
    CheckFailed {
        /// Description of the check failure.
        message: String,
    },
}

/// Result type alias for deployment operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

impl PlatformError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl PlanError {
    /// Creates a malformed-document error without a source location.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            location: None,
        }
    }
}

impl ToolError {
    /// Creates a failure error from a tool's exit status and stderr.
    #[must_use]
    pub fn failed(tool: impl Into<String>, status: i32, stderr: impl Into<String>) -> Self {
        Self::Failed {
            tool: tool.into(),
            status,
            stderr: stderr.into(),
        }
    }
}

impl DeployError {
    /// Creates a prerequisite validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Creates a post-deploy check error.
    #[must_use]
    pub fn check(message: impl Into<String>) -> Self {
        Self::CheckFailed {
            message: message.into(),
        }
    }
}
