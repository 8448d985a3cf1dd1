//! Terraform and Terragrunt invocations.
//!
//! Thin typed wrapper over the command runner: each method builds one tool
//! invocation, runs it in the right working directory, and maps exit
//! statuses to results. The `-detailed-exitcode` convention of `plan` (0 =
//! no changes, 2 = changes present) is surfaced as a [`PlanOutcome`].

use std::path::Path;

use tracing::debug;

use crate::error::{PlatformError, Result, ToolError};

use super::runner::{CommandRunner, CommandSpec};

/// Terraform binary name.
const TERRAFORM: &str = "terraform";

/// Terragrunt binary name.
const TERRAGRUNT: &str = "terragrunt";

/// Outcome of a plan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The plan is empty; infrastructure matches the configuration.
    NoChanges,
    /// The plan contains changes awaiting apply.
    ChangesPending,
}

/// Typed interface to the terraform/terragrunt binaries.
#[derive(Debug)]
pub struct Terragrunt<R> {
    runner: R,
}

impl<R: CommandRunner> Terragrunt<R> {
    /// Creates a wrapper over the given command runner.
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the terraform version line.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary is missing or exits non-zero.
    pub async fn terraform_version(&self, cwd: &Path) -> Result<String> {
        let output = self
            .runner
            .run(CommandSpec::new(TERRAFORM, &["version"]).current_dir(cwd))
            .await?
            .ensure_success(TERRAFORM)?;
        Ok(first_line(&output.stdout))
    }

    /// Returns the terragrunt version line.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary is missing or exits non-zero.
    pub async fn terragrunt_version(&self, cwd: &Path) -> Result<String> {
        let output = self
            .runner
            .run(CommandSpec::new(TERRAGRUNT, &["--version"]).current_dir(cwd))
            .await?
            .ensure_success(TERRAGRUNT)?;
        Ok(first_line(&output.stdout))
    }

    /// Runs `terraform fmt -check -recursive` at the repository root.
    ///
    /// # Errors
    ///
    /// Returns an error when formatting drift is detected.
    pub async fn fmt_check(&self, root: &Path) -> Result<()> {
        self.runner
            .run(CommandSpec::new(TERRAFORM, &["fmt", "-check", "-recursive", "."]).current_dir(root))
            .await?
            .ensure_success("terraform fmt")?;
        Ok(())
    }

    /// Runs `terragrunt validate` in a module directory.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails.
    pub async fn validate(&self, dir: &Path) -> Result<()> {
        self.runner
            .run(CommandSpec::new(TERRAGRUNT, &["validate"]).current_dir(dir))
            .await?
            .ensure_success("terragrunt validate")?;
        Ok(())
    }

    /// Runs `terragrunt run-all validate` across an environment.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails.
    pub async fn validate_all(&self, dir: &Path) -> Result<()> {
        self.runner
            .run(
                CommandSpec::new(TERRAGRUNT, &["run-all", "validate", "--terragrunt-non-interactive"])
                    .current_dir(dir),
            )
            .await?
            .ensure_success("terragrunt run-all validate")?;
        Ok(())
    }

    /// Runs `terragrunt plan -detailed-exitcode -out=<plan file>` in a
    /// module directory.
    ///
    /// # Errors
    ///
    /// Returns an error for any exit status other than 0 (no changes) or
    /// 2 (changes present).
    pub async fn plan(&self, dir: &Path, plan_file: &str) -> Result<PlanOutcome> {
        let out_arg = format!("-out={plan_file}");
        let output = self
            .runner
            .run(
                CommandSpec::new(TERRAGRUNT, &["plan", "-detailed-exitcode", out_arg.as_str()])
                    .current_dir(dir),
            )
            .await?;

        match output.status {
            0 => Ok(PlanOutcome::NoChanges),
            2 => {
                debug!("Plan has pending changes in {}", dir.display());
                Ok(PlanOutcome::ChangesPending)
            }
            status => Err(PlatformError::Tool(ToolError::failed(
                "terragrunt plan",
                status,
                output.stderr.trim(),
            ))),
        }
    }

    /// Converts a binary plan file to its JSON document via
    /// `terragrunt show -json`.
    ///
    /// # Errors
    ///
    /// Returns an error when the conversion fails.
    pub async fn show_json(&self, dir: &Path, plan_file: &str) -> Result<String> {
        let output = self
            .runner
            .run(CommandSpec::new(TERRAGRUNT, &["show", "-json", plan_file]).current_dir(dir))
            .await?
            .ensure_success("terragrunt show")?;
        Ok(output.stdout)
    }

    /// Applies a previously generated plan file.
    ///
    /// # Errors
    ///
    /// Returns an error when the apply fails.
    pub async fn apply(&self, dir: &Path, plan_file: &str) -> Result<()> {
        self.runner
            .run(CommandSpec::new(TERRAGRUNT, &["apply", plan_file]).current_dir(dir))
            .await?
            .ensure_success("terragrunt apply")?;
        Ok(())
    }

    /// Destroys the resources of a single module.
    ///
    /// # Errors
    ///
    /// Returns an error when the destroy fails.
    pub async fn destroy(&self, dir: &Path) -> Result<()> {
        self.runner
            .run(CommandSpec::new(TERRAGRUNT, &["destroy", "-auto-approve"]).current_dir(dir))
            .await?
            .ensure_success("terragrunt destroy")?;
        Ok(())
    }

    /// Destroys every module in an environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the destroy fails.
    pub async fn destroy_all(&self, dir: &Path) -> Result<()> {
        self.runner
            .run(
                CommandSpec::new(
                    TERRAGRUNT,
                    &[
                        "run-all",
                        "destroy",
                        "-auto-approve",
                        "--terragrunt-non-interactive",
                    ],
                )
                .current_dir(dir),
            )
            .await?
            .ensure_success("terragrunt run-all destroy")?;
        Ok(())
    }
}

/// Returns the first line of a tool's output, trimmed.
fn first_line(output: &str) -> String {
    output.lines().next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::runner::{CommandOutput, MockCommandRunner};
    use std::path::PathBuf;

    fn output(status: i32, stdout: &str, stderr: &str) -> CommandOutput {
        CommandOutput {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[tokio::test]
    async fn test_terraform_version_first_line() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.program == "terraform" && spec.args == vec!["version"])
            .returning(|_| Ok(output(0, "Terraform v1.9.5\non linux_amd64\n", "")));

        let tools = Terragrunt::new(runner);
        let version = tools.terraform_version(&PathBuf::from(".")).await.unwrap();
        assert_eq!(version, "Terraform v1.9.5");
    }

    #[tokio::test]
    async fn test_plan_exit_codes() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(output(0, "", "")))
            .times(1);
        let tools = Terragrunt::new(runner);
        let outcome = tools.plan(&PathBuf::from("."), "plan.out").await.unwrap();
        assert_eq!(outcome, PlanOutcome::NoChanges);

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(output(2, "", "")))
            .times(1);
        let tools = Terragrunt::new(runner);
        let outcome = tools.plan(&PathBuf::from("."), "plan.out").await.unwrap();
        assert_eq!(outcome, PlanOutcome::ChangesPending);

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(output(1, "", "syntax error")))
            .times(1);
        let tools = Terragrunt::new(runner);
        let result = tools.plan(&PathBuf::from("."), "plan.out").await;
        assert!(matches!(
            result,
            Err(PlatformError::Tool(ToolError::Failed { status: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn test_show_json_returns_stdout() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args.first().is_some_and(|a| a == "show"))
            .returning(|_| Ok(output(0, r#"{"resource_changes": []}"#, "")));

        let tools = Terragrunt::new(runner);
        let json = tools.show_json(&PathBuf::from("."), "plan.out").await.unwrap();
        assert!(json.contains("resource_changes"));
    }

    #[tokio::test]
    async fn test_fmt_check_failure() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(output(3, "", "main.tf needs formatting")));

        let tools = Terragrunt::new(runner);
        let result = tools.fmt_check(&PathBuf::from(".")).await;
        assert!(matches!(
            result,
            Err(PlatformError::Tool(ToolError::Failed { status: 3, .. }))
        ));
    }
}
