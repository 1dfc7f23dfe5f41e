//! Argument validation for the validate operation.
//!
//! Turns raw [`ValidateArgs`] into a [`ValidationRequest`], applying defaults
//! and enforcing the cross-field rules before anything reaches the engine:
//! - the input must be an existing regular file
//! - the input must carry the `.pdf` extension
//! - xml and html reports must be written to a file with the matching
//!   extension
//!
//! # Examples
//!
//! ```no_run
//! use pdfvalidate::config::{OutputFormat, ValidateArgs};
//! use pdfvalidate::validation::RequestValidator;
//! use std::path::PathBuf;
//!
//! let args = ValidateArgs {
//!     input: PathBuf::from("invoice.pdf"),
//!     format: Some(OutputFormat::Json),
//!     ..Default::default()
//! };
//! let request = RequestValidator::new().validate(args)?;
//! assert_eq!(request.max_failures(), -1);
//! # Ok::<(), pdfvalidate::ToolError>(())
//! ```

use crate::config::{OutputFormat, UNBOUNDED, ValidateArgs, ValidationRequest, has_extension};
use crate::error::{Result, ToolError};
use std::path::Path;

/// Extension accepted for input documents.
pub const PDF_EXTENSION: &str = "pdf";

/// Validator for validate-operation arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate `args` and build the request.
    ///
    /// Checks run in order, so a missing input is reported before a wrong
    /// extension, and input problems before output problems.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`ToolError::InputMissing`] if the input is not an existing file
    /// - [`ToolError::InputNotPdf`] if the input is not a `.pdf` file
    /// - [`ToolError::OutputXmlRequired`] for xml without a `.xml` output
    /// - [`ToolError::OutputHtmlRequired`] for html without a `.html` output
    pub fn validate(&self, args: ValidateArgs) -> Result<ValidationRequest> {
        Self::check_input(&args.input)?;

        let format = args.format.unwrap_or_default();
        if let Some(ext) = format.required_extension()
            && !args
                .output
                .as_deref()
                .is_some_and(|output| has_extension(output, ext))
        {
            return Err(match format {
                OutputFormat::Html => ToolError::OutputHtmlRequired {
                    output: args.output,
                },
                _ => ToolError::OutputXmlRequired {
                    output: args.output,
                },
            });
        }

        Ok(ValidationRequest {
            input_path: args.input,
            output_path: args.output,
            format,
            profile_path: args.profile,
            flavour: args.flavour,
            max_failures: args.max_failures.unwrap_or(UNBOUNDED),
            max_failures_displayed: args.max_failures_displayed.unwrap_or(UNBOUNDED),
            show_passes: args.show_passes,
        })
    }

    fn check_input(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(ToolError::InputMissing {
                path: path.to_path_buf(),
            });
        }

        if !has_extension(path, PDF_EXTENSION) {
            return Err(ToolError::InputNotPdf {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }
}
