//! Report routing.
//!
//! The engine's report goes either to a file or to standard output, and its
//! diagnostics always go to the diagnostic stream. Writers are generic so the
//! orchestrator can be exercised against in-memory buffers.

use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    /// The caller's standard output.
    Stdout,
    /// A file, truncated before writing.
    File(PathBuf),
}

impl ReportDestination {
    /// Destination for an optional output path.
    pub fn from_output(output: Option<&Path>) -> Self {
        match output {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Stdout,
        }
    }
}

/// Write `report` to `destination`.
///
/// File destinations are created or truncated, never appended to. The
/// `stdout` writer is only touched for [`ReportDestination::Stdout`].
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written or `stdout` fails.
pub async fn write_report<W>(
    destination: &ReportDestination,
    report: &[u8],
    stdout: &mut W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match destination {
        ReportDestination::File(path) => {
            tracing::debug!(path = %path.display(), bytes = report.len(), "writing report file");
            tokio::fs::write(path, report).await
        }
        ReportDestination::Stdout => {
            stdout.write_all(report).await?;
            stdout.flush().await
        }
    }
}

/// Forward engine diagnostics to `stderr` if there are any.
///
/// # Errors
///
/// Returns an I/O error if `stderr` fails.
pub async fn forward_diagnostics<W>(diagnostics: &[u8], stderr: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if diagnostics.is_empty() {
        return Ok(());
    }

    stderr.write_all(diagnostics).await?;
    if !diagnostics.ends_with(b"\n") {
        stderr.write_all(b"\n").await?;
    }
    stderr.flush().await
}
