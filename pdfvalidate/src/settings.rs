//! Runtime settings shared by all components.
//!
//! Every location the tool touches (the configuration descriptor, the
//! update-check state file, the engine program) is named here and handed to
//! components at construction time, so tests can point them at temporary
//! files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the descriptor path.
pub const ENV_CONFIG_FILE: &str = "PDFVALIDATE_CONFIG";
/// Environment variable overriding the update-check state path.
pub const ENV_STATE_FILE: &str = "PDFVALIDATE_STATE_FILE";
/// Environment variable overriding the engine program.
pub const ENV_ENGINE: &str = "PDFVALIDATE_ENGINE";
/// Environment variable overriding the engine jar.
pub const ENV_ENGINE_JAR: &str = "PDFVALIDATE_ENGINE_JAR";
/// Environment variable disabling the update check.
pub const ENV_NO_UPDATE_CHECK: &str = "PDFVALIDATE_NO_UPDATE_CHECK";
/// Environment variable overriding the registry base URL.
pub const ENV_REGISTRY_URL: &str = "PDFVALIDATE_REGISTRY_URL";

/// File name of the packaged configuration descriptor.
pub const DESCRIPTOR_FILE: &str = "config.json";
/// File name of the update-check state, relative to the working directory.
pub const STATE_FILE: &str = ".local_data.json";
/// Engine jar, relative to the resource directory.
pub const ENGINE_JAR: &str = "res/greenfield-apps.jar";
/// Program used to start the engine.
pub const ENGINE_PROGRAM: &str = "java";
/// Docker Hub API root.
pub const REGISTRY_URL: &str = "https://hub.docker.com";
/// Image whose tags are checked when the descriptor names none.
pub const DEFAULT_IMAGE: &str = "pdfix/verapdf-validation";

/// How the external validation engine is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Program to execute.
    pub program: PathBuf,
    /// Arguments placed before the validation flags.
    pub leading_args: Vec<OsString>,
}

impl EngineSettings {
    /// Run `jar` with `java -jar`.
    pub fn java_jar(jar: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from(ENGINE_PROGRAM),
            leading_args: vec![OsString::from("-jar"), jar.into().into_os_string()],
        }
    }

    /// Run `program` directly with no leading arguments.
    pub fn program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }
}

/// Where and how the latest published version is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Registry API root, without a trailing slash.
    pub base_url: String,
    /// Request timeout for the lookup.
    pub timeout: Duration,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Complete settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Configuration descriptor (JSON with at least a `version` field).
    pub descriptor_path: PathBuf,
    /// Persisted update-check state.
    pub state_path: PathBuf,
    /// Engine start-up.
    pub engine: EngineSettings,
    /// Version registry.
    pub registry: RegistrySettings,
    /// Whether the background update check runs at all.
    pub update_check: bool,
}

impl Settings {
    /// Settings rooted at `resource_dir`, with the state file in the
    /// working directory.
    pub fn with_resource_dir(resource_dir: &Path) -> Self {
        Self {
            descriptor_path: resource_dir.join(DESCRIPTOR_FILE),
            state_path: PathBuf::from(STATE_FILE),
            engine: EngineSettings::java_jar(resource_dir.join(ENGINE_JAR)),
            registry: RegistrySettings::default(),
            update_check: true,
        }
    }

    /// Directory holding the descriptor and engine resources.
    ///
    /// This is the directory of the running executable, or the working
    /// directory when that cannot be determined.
    pub fn default_resource_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_resource_dir(&Self::default_resource_dir())
    }
}
