//! Latest-version lookup.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use crate::settings::RegistrySettings;

/// Source of the most recently published tag for an image.
#[async_trait]
pub trait TagRegistry: Send + Sync {
    /// Latest tag name for `image`, `None` if the image has no tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be reached or answers with
    /// something unexpected.
    async fn latest_tag(&self, image: &str) -> anyhow::Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct TagPage {
    #[serde(default)]
    results: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Docker Hub tag listing.
#[derive(Debug, Clone)]
pub struct DockerHubRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl DockerHubRegistry {
    /// Create a registry client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &RegistrySettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("pdfvalidate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the newest-first, single-entry tag page for `image`.
    pub fn tags_url(&self, image: &str) -> String {
        format!("{}/v2/repositories/{image}/tags?page_size=1", self.base_url)
    }
}

#[async_trait]
impl TagRegistry for DockerHubRegistry {
    async fn latest_tag(&self, image: &str) -> anyhow::Result<Option<String>> {
        let url = self.tags_url(image);
        let page: TagPage = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?
            .json()
            .await
            .context("unexpected tag listing")?;

        Ok(page.results.into_iter().next().map(|tag| tag.name))
    }
}
