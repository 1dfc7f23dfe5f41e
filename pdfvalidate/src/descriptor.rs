//! Configuration descriptor access.
//!
//! The descriptor is a JSON document shipped next to the tool that
//! integrations read to learn the tool's version and options. It is exported
//! verbatim by the `config` operation and consulted by the update check for
//! the current version.

use serde::Deserialize;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Result, ToolError};

/// Version reported when the descriptor cannot be read.
pub const UNKNOWN_VERSION: &str = "unknown";

/// The fields of the descriptor this tool reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Descriptor {
    /// Version of the packaged tool.
    #[serde(default)]
    pub version: Option<String>,
    /// Published image name, if the descriptor names one.
    #[serde(default)]
    pub image: Option<String>,
}

impl Descriptor {
    /// Read and parse the descriptor at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Version named by the descriptor, or [`UNKNOWN_VERSION`].
    pub fn version_or_unknown(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }
}

/// Export the descriptor at `path` verbatim.
///
/// Writes to `output` when given (creating or truncating it), otherwise to
/// `stdout`. The bytes are copied unchanged.
///
/// # Errors
///
/// Returns [`ToolError::Internal`] if the descriptor cannot be read or the
/// destination cannot be written.
pub async fn export<W>(path: &Path, output: Option<&Path>, stdout: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let content = tokio::fs::read(path).await.map_err(|err| {
        ToolError::internal(format!(
            "failed to read configuration {}: {err}",
            path.display()
        ))
    })?;

    match output {
        Some(destination) => {
            tokio::fs::write(destination, &content)
                .await
                .map_err(|err| {
                    ToolError::internal(format!(
                        "failed to write configuration to {}: {err}",
                        destination.display()
                    ))
                })?;
        }
        None => {
            let written = async {
                stdout.write_all(&content).await?;
                stdout.flush().await
            };
            written.await.map_err(|err| {
                ToolError::internal(format!("failed to print configuration: {err}"))
            })?;
        }
    }

    Ok(())
}
