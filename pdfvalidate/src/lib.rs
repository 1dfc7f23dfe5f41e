//! pdfvalidate - Validate PDF documents with an external validation engine.
//!
//! This library drives an external PDF/A and PDF/UA validation engine as a
//! child process and reports its findings in the format the caller selects.
//! It provides:
//!
//! - Argument validation with cross-field rules and defaults
//! - Engine invocation and report routing (file or stdout)
//! - A closed error taxonomy with stable exit codes
//! - A once-a-day background check for newer published versions
//!
//! # Examples
//!
//! ## Validate a document
//!
//! ```no_run
//! use pdfvalidate::config::{OutputFormat, ValidateArgs};
//! use pdfvalidate::dispatch::{Dispatcher, Operation};
//! use pdfvalidate::settings::Settings;
//! use std::path::PathBuf;
//!
//! # async fn example() {
//! let args = ValidateArgs {
//!     input: PathBuf::from("invoice.pdf"),
//!     output: Some(PathBuf::from("invoice.html")),
//!     format: Some(OutputFormat::Html),
//!     flavour: Some("ua1".to_string()),
//!     ..Default::default()
//! };
//!
//! let code = Dispatcher::new(Settings::default())
//!     .dispatch(Operation::Validate(args))
//!     .await;
//! std::process::exit(code);
//! # }
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use pdfvalidate::config::ValidateArgs;
//! use pdfvalidate::engine::{Orchestrator, ProcessEngine};
//! use pdfvalidate::settings::EngineSettings;
//! use pdfvalidate::validation::RequestValidator;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = RequestValidator::new().validate(ValidateArgs {
//!     input: PathBuf::from("invoice.pdf"),
//!     output: Some(PathBuf::from("invoice.xml")),
//!     ..Default::default()
//! })?;
//!
//! let engine = ProcessEngine::new(&EngineSettings::java_jar("res/greenfield-apps.jar"));
//! let result = Orchestrator::new(Arc::new(engine)).execute(&request).await?;
//! println!("engine exited with {}", result.exit_code());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod io;
pub mod output;
pub mod settings;
pub mod update;
pub mod validation;

// Re-export commonly used types
pub use config::{OutputFormat, ValidateArgs, ValidationRequest};
pub use dispatch::{Dispatcher, Operation};
pub use error::{ErrorKind, Result, ToolError};
pub use settings::Settings;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
