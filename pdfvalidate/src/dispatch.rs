//! Operation dispatch.
//!
//! The dispatcher is the only place where errors become exit codes. It runs
//! the selected operation on its own task, runs the update advisory next to
//! it, and always waits for the advisory before returning.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ValidateArgs;
use crate::descriptor;
use crate::engine::{EngineRunner, Orchestrator, ProcessEngine};
use crate::error::{Result, ToolError};
use crate::output::Diagnostics;
use crate::settings::Settings;
use crate::update::{AdvisoryHandle, UpdateAdvisor};
use crate::validation::RequestValidator;

/// A parsed top-level operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Export the configuration descriptor.
    Config {
        /// File to write; stdout when `None`.
        output: Option<PathBuf>,
    },
    /// Validate a document.
    Validate(ValidateArgs),
}

impl Operation {
    /// Subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Validate(_) => "validate",
        }
    }
}

/// Runs operations and maps their outcome to exit codes.
#[derive(Clone)]
pub struct Dispatcher {
    settings: Settings,
    engine: Arc<dyn EngineRunner>,
    advisor: Option<UpdateAdvisor>,
}

impl Dispatcher {
    /// Create a dispatcher with the process engine and, when enabled, the
    /// Docker Hub update advisory.
    pub fn new(settings: Settings) -> Self {
        let engine: Arc<dyn EngineRunner> = Arc::new(ProcessEngine::new(&settings.engine));
        let advisor = if settings.update_check {
            UpdateAdvisor::from_settings(&settings).ok()
        } else {
            None
        };

        Self {
            settings,
            engine,
            advisor,
        }
    }

    /// Replace the engine.
    pub fn with_engine(mut self, engine: Arc<dyn EngineRunner>) -> Self {
        self.engine = engine;
        self
    }

    /// Replace (or remove) the update advisor.
    pub fn with_advisor(mut self, advisor: Option<UpdateAdvisor>) -> Self {
        self.advisor = advisor;
        self
    }

    /// Run `operation` and return the process exit code.
    ///
    /// Errors are printed to stderr. The update advisory runs concurrently
    /// and is joined before this returns, whatever the outcome.
    pub async fn dispatch(self, operation: Operation) -> i32 {
        let advisory = match self.advisor.clone() {
            Some(advisor) => advisor.spawn(),
            None => AdvisoryHandle::disabled(),
        };

        tracing::debug!(operation = operation.name(), "dispatching");

        let this = self.clone();
        let outcome = match tokio::spawn(async move { this.execute(operation).await }).await {
            Ok(outcome) => outcome,
            Err(join_err) => Err(ToolError::internal(format!(
                "operation aborted: {join_err}"
            ))),
        };

        let code = match outcome {
            Ok(code) => code,
            Err(err) => {
                if let ToolError::Internal { reason } = &err {
                    tracing::error!(%reason, "unclassified failure");
                }
                Diagnostics::new().error(&err);
                err.exit_code()
            }
        };

        advisory.join().await;
        code
    }

    /// Run `operation` without the update advisory and without printing
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy error that ended the operation.
    pub async fn execute(&self, operation: Operation) -> Result<i32> {
        match operation {
            Operation::Config { output } => {
                descriptor::export(
                    &self.settings.descriptor_path,
                    output.as_deref(),
                    &mut tokio::io::stdout(),
                )
                .await?;
                Ok(0)
            }
            Operation::Validate(args) => {
                let request = RequestValidator::new().validate(args)?;
                Orchestrator::new(Arc::clone(&self.engine))
                    .run(&request)
                    .await
            }
        }
    }
}
