//! AWS-side deployment checks.
//!
//! Credential validation before a run (STS caller identity) and
//! best-effort connectivity checks afterwards: counting the S3 buckets and
//! Lambda functions that belong to the deployed environment.

use aws_config::BehaviorVersion;
use tracing::{debug, info};

use crate::error::{DeployError, PlatformError, Result};

use super::options::Region;

/// Client bundle for the AWS checks around a deployment.
#[derive(Debug)]
pub struct PlatformVerifier {
    sts: aws_sdk_sts::Client,
    s3: aws_sdk_s3::Client,
    lambda: aws_sdk_lambda::Client,
}

/// Counts of platform resources found after a deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceCheck {
    /// S3 buckets named for the environment.
    pub buckets: usize,
    /// Lambda functions named for the environment.
    pub functions: usize,
}

impl PlatformVerifier {
    /// Builds clients from the default credential chain for the target
    /// region.
    pub async fn connect(region: Region) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.as_str()))
            .load()
            .await;

        Self {
            sts: aws_sdk_sts::Client::new(&config),
            s3: aws_sdk_s3::Client::new(&config),
            lambda: aws_sdk_lambda::Client::new(&config),
        }
    }

    /// Resolves the caller identity, returning its ARN.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::CredentialsInvalid`] when the identity cannot
    /// be resolved.
    pub async fn caller_identity(&self) -> Result<String> {
        debug!("Resolving AWS caller identity");
        let identity = self.sts.get_caller_identity().send().await.map_err(|e| {
            PlatformError::Deploy(DeployError::CredentialsInvalid {
                message: e.to_string(),
            })
        })?;

        Ok(identity.arn().unwrap_or("unknown").to_string())
    }

    /// Counts deployed resources whose names contain the environment name.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::CheckFailed`] when either listing call fails.
    pub async fn check_resources(&self, environment: &str) -> Result<ResourceCheck> {
        let buckets = self
            .s3
            .list_buckets()
            .send()
            .await
            .map_err(|e| {
                PlatformError::Deploy(DeployError::check(format!("S3 bucket listing failed: {e}")))
            })?
            .buckets()
            .iter()
            .filter(|bucket| bucket.name().is_some_and(|name| name.contains(environment)))
            .count();
        info!("Found {buckets} project S3 buckets");

        let functions = self
            .lambda
            .list_functions()
            .send()
            .await
            .map_err(|e| {
                PlatformError::Deploy(DeployError::check(format!(
                    "Lambda function listing failed: {e}"
                )))
            })?
            .functions()
            .iter()
            .filter(|function| {
                function
                    .function_name()
                    .is_some_and(|name| name.contains(environment))
            })
            .count();
        info!("Found {functions} project Lambda functions");

        Ok(ResourceCheck { buckets, functions })
    }
}
