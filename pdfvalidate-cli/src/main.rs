//! pdfvalidate - Validate PDF documents with an external validation engine.
//!
//! Exit codes: 0 compliant, 1 non-compliant, 10-14 argument errors,
//! 30 validation failure, 2 internal error.

mod cli;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;
use pdfvalidate::dispatch::Dispatcher;
use pdfvalidate::error::{EC_ARG_GENERAL, ToolError};
use pdfvalidate::output::Diagnostics;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => process::exit(report_parse_error(err)),
    };

    let code = Dispatcher::new(cli.settings())
        .dispatch(cli.operation())
        .await;
    process::exit(code);
}

/// Log to stderr, filtered by `RUST_LOG` (warnings by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

/// Print a clap error and return the exit code for it.
///
/// Help and version requests succeed. Every other parse failure is an
/// argument error and ends with the argument-error message.
fn report_parse_error(err: clap::Error) -> i32 {
    match err.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            Diagnostics::new().error(&ToolError::invalid_arguments("no operation given"));
            EC_ARG_GENERAL
        }
        _ => {
            let rendered = err.render().to_string();
            Diagnostics::new().error(&ToolError::invalid_arguments(rendered));
            EC_ARG_GENERAL
        }
    }
}
