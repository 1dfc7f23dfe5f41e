//! External validation engine.
//!
//! The engine is an opaque process: it takes flags and a document path,
//! writes its report to stdout, diagnostics to stderr, and exits with 0 (no
//! findings) or 1 (findings). This module builds the argument list, defines
//! the [`EngineRunner`] seam and provides [`ProcessEngine`], which spawns the
//! real program.

pub mod orchestrator;

pub use orchestrator::{Orchestrator, Outcome, ValidationResult};

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ValidationRequest;
use crate::settings::EngineSettings;

/// Arguments for one engine run, excluding the program and its leading
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInvocation {
    args: Vec<OsString>,
}

impl EngineInvocation {
    /// Build the argument list for `request`.
    ///
    /// Limits and format are always passed. Profile, flavour and `--pass`
    /// appear only when set. The input path is always last.
    pub fn from_request(request: &ValidationRequest) -> Self {
        let mut args: Vec<OsString> = vec![
            "--maxfailures".into(),
            request.max_failures().to_string().into(),
            "--maxfailuresdisplayed".into(),
            request.max_failures_displayed().to_string().into(),
            "--format".into(),
            request.format().as_str().into(),
        ];

        if let Some(profile) = request.profile_path() {
            args.push("--profile".into());
            args.push(profile.as_os_str().to_owned());
        }

        if let Some(flavour) = request.flavour() {
            args.push("--flavour".into());
            args.push(flavour.into());
        }

        if request.show_passes() {
            args.push("--pass".into());
        }

        args.push(request.input_path().as_os_str().to_owned());

        Self { args }
    }

    /// Arguments in order.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Whether `flag` is present.
    ///
    /// For inspecting invocations handed to an [`EngineRunner`], mostly in
    /// tests.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == OsStr::new(flag))
    }

    /// Value following `flag`, if the flag is present.
    ///
    /// Like [`EngineInvocation::has_flag`], for inspecting invocations.
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|arg| arg == OsStr::new(flag))
            .and_then(|idx| self.args.get(idx + 1))
            .map(OsString::as_os_str)
    }
}

/// Everything the engine produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Exit status, `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

/// Something that can run the validation engine.
#[async_trait]
pub trait EngineRunner: Send + Sync {
    /// Run the engine to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the engine cannot be started or its output
    /// cannot be collected.
    async fn run(&self, invocation: &EngineInvocation) -> std::io::Result<EngineOutput>;

    /// Human-readable description of the engine, for diagnostics.
    fn describe(&self) -> String;
}

/// Engine backed by a child process.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl ProcessEngine {
    /// Create an engine from settings.
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            program: settings.program.clone(),
            leading_args: settings.leading_args.clone(),
        }
    }
}

#[async_trait]
impl EngineRunner for ProcessEngine {
    async fn run(&self, invocation: &EngineInvocation) -> std::io::Result<EngineOutput> {
        tracing::debug!(
            program = %self.program.display(),
            args = ?invocation.args(),
            "starting validation engine"
        );

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        tracing::debug!(status = ?output.status, "validation engine finished");

        Ok(EngineOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn describe(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(
            self.leading_args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }
}
