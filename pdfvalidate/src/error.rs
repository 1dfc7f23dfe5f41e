//! Error types for pdfvalidate.
//!
//! Every failure that can end an operation is one of a closed set of kinds,
//! each with a fixed message and a stable process exit code. Components
//! never hand an untyped error to the dispatcher: lower-level causes (I/O,
//! process spawn, file writes) are kept as `detail` on the error instead of
//! becoming kinds of their own.
//!
//! # Exit codes
//!
//! | code | kind |
//! |------|------|
//! | 10 | [`ErrorKind::InvalidArguments`] |
//! | 11 | [`ErrorKind::InputMissing`] |
//! | 12 | [`ErrorKind::InputNotPdf`] |
//! | 13 | [`ErrorKind::OutputXmlRequired`] |
//! | 14 | [`ErrorKind::OutputHtmlRequired`] |
//! | 30 | [`ErrorKind::ValidationFailed`] |
//! | 2  | [`ErrorKind::Internal`] |

use std::path::PathBuf;

/// Result type alias for pdfvalidate operations.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Exit code for arguments that could not be parsed.
pub const EC_ARG_GENERAL: i32 = 10;
/// Exit code for a missing input file.
pub const EC_ARG_INPUT_MISSING: i32 = 11;
/// Exit code for an input that is not a PDF document.
pub const EC_ARG_INPUT_PDF: i32 = 12;
/// Exit code for xml format without a `.xml` output path.
pub const EC_ARG_OUTPUT_XML: i32 = 13;
/// Exit code for html format without a `.html` output path.
pub const EC_ARG_OUTPUT_HTML: i32 = 14;
/// Exit code for a validation attempt that did not complete.
pub const EC_VALIDATION_FAILED: i32 = 30;
/// Exit code for anything the taxonomy does not classify.
pub const EC_INTERNAL: i32 = 2;

/// Kind of a [`ToolError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raw arguments do not form a recognized operation.
    InvalidArguments,
    /// Input path does not reference an existing regular file.
    InputMissing,
    /// Input path does not carry the `.pdf` extension.
    InputNotPdf,
    /// Xml format selected without a `.xml` output path.
    OutputXmlRequired,
    /// Html format selected without a `.html` output path.
    OutputHtmlRequired,
    /// The engine could not be run or ended unexpectedly.
    ValidationFailed,
    /// Catch-all for failures outside the taxonomy.
    Internal,
}

impl ErrorKind {
    /// Process exit code associated with this kind.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::InvalidArguments => EC_ARG_GENERAL,
            Self::InputMissing => EC_ARG_INPUT_MISSING,
            Self::InputNotPdf => EC_ARG_INPUT_PDF,
            Self::OutputXmlRequired => EC_ARG_OUTPUT_XML,
            Self::OutputHtmlRequired => EC_ARG_OUTPUT_HTML,
            Self::ValidationFailed => EC_VALIDATION_FAILED,
            Self::Internal => EC_INTERNAL,
        }
    }

    /// Fixed, user-facing message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidArguments => {
                "Failed to parse arguments. Please check the usage and try again."
            }
            Self::InputMissing => "Input file does not exists.",
            Self::InputNotPdf => "Input file must be PDF document.",
            Self::OutputXmlRequired => {
                "Input file must be PDF document and output file must be XML."
            }
            Self::OutputHtmlRequired => {
                "Input file must be PDF document and output file must be HTML."
            }
            Self::ValidationFailed => "Validation failed.",
            Self::Internal => "Internal error.",
        }
    }
}

/// Main error type for pdfvalidate operations.
///
/// The `Display` output is always the fixed message of the error's kind.
/// Variable context lives in the fields and is available through
/// [`ToolError::detail`].
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Raw input could not be parsed into an operation.
    #[error("{}", ErrorKind::InvalidArguments.message())]
    InvalidArguments {
        /// Parser diagnostics.
        detail: String,
    },

    /// Input file was not found.
    #[error("{}", ErrorKind::InputMissing.message())]
    InputMissing {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Input file is not a PDF document.
    #[error("{}", ErrorKind::InputNotPdf.message())]
    InputNotPdf {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Xml format requires a `.xml` output path.
    #[error("{}", ErrorKind::OutputXmlRequired.message())]
    OutputXmlRequired {
        /// Output path that was given, if any.
        output: Option<PathBuf>,
    },

    /// Html format requires a `.html` output path.
    #[error("{}", ErrorKind::OutputHtmlRequired.message())]
    OutputHtmlRequired {
        /// Output path that was given, if any.
        output: Option<PathBuf>,
    },

    /// The validation attempt did not complete as expected.
    #[error("{}", ErrorKind::ValidationFailed.message())]
    ValidationFailed {
        /// Underlying cause.
        reason: String,
    },

    /// Unclassified failure.
    #[error("{}", ErrorKind::Internal.message())]
    Internal {
        /// Underlying cause.
        reason: String,
    },
}

impl ToolError {
    /// Create an InvalidArguments error.
    pub fn invalid_arguments(detail: impl Into<String>) -> Self {
        Self::InvalidArguments {
            detail: detail.into(),
        }
    }

    /// Create a ValidationFailed error.
    pub fn validation_failed(reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            reason: reason.into(),
        }
    }

    /// Create an Internal error.
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArguments { .. } => ErrorKind::InvalidArguments,
            Self::InputMissing { .. } => ErrorKind::InputMissing,
            Self::InputNotPdf { .. } => ErrorKind::InputNotPdf,
            Self::OutputXmlRequired { .. } => ErrorKind::OutputXmlRequired,
            Self::OutputHtmlRequired { .. } => ErrorKind::OutputHtmlRequired,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    /// Diagnostic detail attached to this error, if any.
    pub fn detail(&self) -> Option<String> {
        let detail = match self {
            Self::InvalidArguments { detail } => Some(detail.clone()),
            Self::InputMissing { path } | Self::InputNotPdf { path } => {
                Some(format!("Input: {}", path.display()))
            }
            Self::OutputXmlRequired { output } | Self::OutputHtmlRequired { output } => {
                Some(match output {
                    Some(path) => format!("Output: {}", path.display()),
                    None => "No output path given".to_string(),
                })
            }
            Self::ValidationFailed { reason } | Self::Internal { reason } => Some(reason.clone()),
        };
        detail.filter(|detail| !detail.trim().is_empty())
    }
}
