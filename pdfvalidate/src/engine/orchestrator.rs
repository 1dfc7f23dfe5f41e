//! Runs one validation request through the engine.
//!
//! The orchestrator builds the invocation, waits for the engine, routes the
//! captured report and diagnostics, and maps the engine's exit status. Exit
//! statuses 0 and 1 are the only normal outcomes. Everything else, including
//! spawn failures and failures writing the report, collapses into
//! [`ToolError::ValidationFailed`] with the cause kept as its reason.

use std::sync::Arc;
use tokio::io::AsyncWrite;

use super::{EngineInvocation, EngineOutput, EngineRunner};
use crate::config::ValidationRequest;
use crate::error::{Result, ToolError};
use crate::io::{ReportDestination, forward_diagnostics, write_report};

/// Normal engine outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No findings (exit status 0).
    Compliant,
    /// Findings reported (exit status 1).
    NonCompliant,
}

impl Outcome {
    /// Map an engine exit status to an outcome.
    pub fn from_status(status: i32) -> Option<Self> {
        match status {
            0 => Some(Self::Compliant),
            1 => Some(Self::NonCompliant),
            _ => None,
        }
    }

    /// Exit code passed through to the caller.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Compliant => 0,
            Self::NonCompliant => 1,
        }
    }
}

/// Captured result of a completed engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Normal outcome.
    pub outcome: Outcome,
    /// Report bytes as written by the engine.
    pub stdout: Vec<u8>,
    /// Diagnostic bytes as written by the engine.
    pub stderr: Vec<u8>,
}

impl ValidationResult {
    /// Exit code, always 0 or 1.
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    fn from_output(output: EngineOutput) -> Result<Self> {
        let outcome = match output.status {
            Some(status) => Outcome::from_status(status).ok_or_else(|| {
                ToolError::validation_failed(format!(
                    "engine exited with unexpected status {status}"
                ))
            })?,
            None => {
                return Err(ToolError::validation_failed(
                    "engine was terminated by a signal",
                ));
            }
        };

        Ok(Self {
            outcome,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Drives the engine for validated requests.
#[derive(Clone)]
pub struct Orchestrator {
    engine: Arc<dyn EngineRunner>,
}

impl Orchestrator {
    /// Create an orchestrator over `engine`.
    pub fn new(engine: Arc<dyn EngineRunner>) -> Self {
        Self { engine }
    }

    /// Run the engine for `request` and capture its result.
    ///
    /// Nothing is written anywhere; see [`Orchestrator::run`] for routing.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::ValidationFailed`] if the engine cannot be run or
    /// exits with a status other than 0 or 1.
    pub async fn execute(&self, request: &ValidationRequest) -> Result<ValidationResult> {
        let output = self.capture(request).await?;
        ValidationResult::from_output(output)
    }

    /// Run `request` and route the result to the process's stdout/stderr.
    ///
    /// # Errors
    ///
    /// See [`Orchestrator::run_with`].
    pub async fn run(&self, request: &ValidationRequest) -> Result<i32> {
        self.run_with(request, &mut tokio::io::stdout(), &mut tokio::io::stderr())
            .await
    }

    /// Run `request`, writing the report to its output file or `stdout`, and
    /// engine diagnostics to `stderr`.
    ///
    /// Output is routed before the exit status is interpreted, so a report
    /// and diagnostics from an engine that exits unexpectedly still reach
    /// the caller. Returns the engine's exit code (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::ValidationFailed`] if the engine fails, exits
    /// unexpectedly, or the report cannot be written.
    pub async fn run_with<O, E>(
        &self,
        request: &ValidationRequest,
        stdout: &mut O,
        stderr: &mut E,
    ) -> Result<i32>
    where
        O: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let output = self.capture(request).await?;

        let destination = ReportDestination::from_output(request.output_path());
        let written = write_report(&destination, &output.stdout, stdout).await;

        // Engine diagnostics are forwarded even when the report was lost.
        forward_diagnostics(&output.stderr, stderr)
            .await
            .map_err(|err| {
                ToolError::validation_failed(format!("failed to forward diagnostics: {err}"))
            })?;

        written.map_err(|err| match &destination {
            ReportDestination::File(path) => ToolError::validation_failed(format!(
                "failed to write report to {}: {err}",
                path.display()
            )),
            ReportDestination::Stdout => {
                ToolError::validation_failed(format!("failed to write report: {err}"))
            }
        })?;

        let result = ValidationResult::from_output(output)?;
        tracing::debug!(outcome = ?result.outcome, "validation finished");

        Ok(result.exit_code())
    }

    async fn capture(&self, request: &ValidationRequest) -> Result<EngineOutput> {
        let invocation = EngineInvocation::from_request(request);

        self.engine.run(&invocation).await.map_err(|err| {
            ToolError::validation_failed(format!(
                "failed to run `{}`: {err}",
                self.engine.describe()
            ))
        })
    }
}
