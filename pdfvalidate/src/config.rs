//! Request model for the validate operation.
//!
//! [`ValidateArgs`] is the raw, unchecked shape produced by argument parsing.
//! [`ValidationRequest`] is the validated, defaults-applied value that the
//! orchestrator consumes. Only [`crate::validation::RequestValidator`] turns
//! one into the other.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel used for "no limit" on failure counts.
pub const UNBOUNDED: i64 = -1;

/// Report format produced by the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Engine-native raw report.
    Raw,
    /// Machine-readable XML report (default).
    #[default]
    Xml,
    /// Human-readable HTML report.
    Html,
    /// Plain text summary.
    Text,
    /// JSON report.
    Json,
}

impl OutputFormat {
    /// Value passed to the engine's `--format` flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// File extension the output path must carry for this format, if any.
    pub fn required_extension(&self) -> Option<&'static str> {
        match self {
            Self::Xml => Some("xml"),
            Self::Html => Some("html"),
            Self::Raw | Self::Text | Self::Json => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unchecked arguments for the validate operation.
///
/// Optional fields left as `None` take their defaults during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Document to validate.
    pub input: PathBuf,
    /// Where to write the report.
    pub output: Option<PathBuf>,
    /// Report format.
    pub format: Option<OutputFormat>,
    /// Validation profile file.
    pub profile: Option<PathBuf>,
    /// Flavour name, e.g. `ua1` or `2b`.
    pub flavour: Option<String>,
    /// Stop after this many failures.
    pub max_failures: Option<i64>,
    /// Report at most this many failures per rule.
    pub max_failures_displayed: Option<i64>,
    /// Include passed checks in the report.
    pub show_passes: bool,
}

/// A validated request for one engine run.
///
/// Built only by [`crate::validation::RequestValidator::validate`], so every
/// instance satisfies the input and output-extension invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub(crate) input_path: PathBuf,
    pub(crate) output_path: Option<PathBuf>,
    pub(crate) format: OutputFormat,
    pub(crate) profile_path: Option<PathBuf>,
    pub(crate) flavour: Option<String>,
    pub(crate) max_failures: i64,
    pub(crate) max_failures_displayed: i64,
    pub(crate) show_passes: bool,
}

impl ValidationRequest {
    /// Document to validate.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Report destination; `None` means standard output.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Report format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Validation profile, if one was given.
    pub fn profile_path(&self) -> Option<&Path> {
        self.profile_path.as_deref()
    }

    /// Flavour, if one was given.
    pub fn flavour(&self) -> Option<&str> {
        self.flavour.as_deref()
    }

    /// Failure limit, [`UNBOUNDED`] when not limited.
    pub fn max_failures(&self) -> i64 {
        self.max_failures
    }

    /// Displayed failure limit, [`UNBOUNDED`] when not limited.
    pub fn max_failures_displayed(&self) -> i64 {
        self.max_failures_displayed
    }

    /// Whether passed checks are reported.
    pub fn show_passes(&self) -> bool {
        self.show_passes
    }
}

/// Check whether `path` has extension `ext`, ignoring ASCII case.
pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|found| found.to_str())
        .is_some_and(|found| found.eq_ignore_ascii_case(ext))
}
