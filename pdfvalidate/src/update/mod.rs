//! Background update advisory.
//!
//! Once per calendar day the advisor compares the version in the
//! configuration descriptor against the newest tag published for the tool's
//! image and, if they differ, prints a single advisory line to stderr. The
//! check runs alongside the main operation and can never change its outcome:
//! every failure is swallowed, and the only thing a caller can do with the
//! spawned task is wait for it.
//!
//! # Examples
//!
//! ```no_run
//! use pdfvalidate::settings::Settings;
//! use pdfvalidate::update::UpdateAdvisor;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let advisory = UpdateAdvisor::from_settings(&settings)?.spawn();
//! // ... main work ...
//! advisory.join().await;
//! # Ok(())
//! # }
//! ```

pub mod registry;
pub mod state;

pub use registry::{DockerHubRegistry, TagRegistry};
pub use state::{StateStore, UpdateCheckState};

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::descriptor::Descriptor;
use crate::output::Diagnostics;
use crate::settings::{DEFAULT_IMAGE, Settings};

/// Checks for a newer published version of the tool.
#[derive(Clone)]
pub struct UpdateAdvisor {
    registry: Arc<dyn TagRegistry>,
    store: StateStore,
    descriptor_path: PathBuf,
    today: Option<NaiveDate>,
}

impl UpdateAdvisor {
    /// Create an advisor.
    pub fn new(
        registry: Arc<dyn TagRegistry>,
        store: StateStore,
        descriptor_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            store,
            descriptor_path: descriptor_path.into(),
            today: None,
        }
    }

    /// Create an advisor backed by Docker Hub.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let registry = DockerHubRegistry::new(&settings.registry)?;
        Ok(Self::new(
            Arc::new(registry),
            StateStore::new(&settings.state_path),
            &settings.descriptor_path,
        ))
    }

    /// Use `date` as the current date instead of the local calendar date.
    pub fn with_today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Run the check and return the advisory line, if there is one.
    ///
    /// Does nothing when the check already ran today. Otherwise queries the
    /// registry once and records today's date whatever the query's outcome.
    /// Never fails.
    pub async fn check(&self) -> Option<String> {
        let today = self.today();

        if let Some(state) = self.store.load().await
            && state.last_check_date == today
        {
            return None;
        }

        let descriptor = Descriptor::load(&self.descriptor_path)
            .await
            .unwrap_or_default();
        let current = descriptor.version_or_unknown();
        let image = descriptor.image.as_deref().unwrap_or(DEFAULT_IMAGE);

        let advisory = match self.registry.latest_tag(image).await {
            Ok(Some(latest)) if latest != current => Some(advisory_line(image, &latest)),
            _ => None,
        };

        let _ = self
            .store
            .save(&UpdateCheckState {
                last_check_date: today,
            })
            .await;

        advisory
    }

    /// Start the check on the runtime and return a handle to wait for it.
    ///
    /// The advisory line, if any, is printed to stderr by the task itself.
    pub fn spawn(self) -> AdvisoryHandle {
        AdvisoryHandle {
            task: Some(tokio::spawn(async move {
                if let Some(line) = self.check().await {
                    Diagnostics::new().advisory(&line);
                }
            })),
        }
    }
}

/// Handle to a running update check.
///
/// Joining only waits for completion. Panics inside the task are absorbed.
#[derive(Debug)]
pub struct AdvisoryHandle {
    task: Option<JoinHandle<()>>,
}

impl AdvisoryHandle {
    /// Handle for a check that was never started.
    pub fn disabled() -> Self {
        Self { task: None }
    }

    /// Wait for the check to finish.
    pub async fn join(self) {
        if let Some(task) = self.task {
            let _ = task.await;
        }
    }
}

/// Advisory text for a newer `tag` of `image`.
pub fn advisory_line(image: &str, tag: &str) -> String {
    format!(
        "A new Docker image version ({tag}) is available! Update with: `docker pull {image}:{tag}`"
    )
}
