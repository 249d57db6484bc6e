use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Inventory, ProjectId},
    error::FetchError,
    protocol::decode_inventory,
};
use tracing::debug;
use url::Url;

#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_inventory(&self, project_id: &ProjectId) -> Result<Inventory, FetchError>;
}

/// Reads `GET {base}/projects/{projectId}/all-resources` over HTTP.
pub struct HttpInventorySource {
    http: Client,
    base_url: Url,
}

impl HttpInventorySource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid inventory service url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "inventory service url '{base_url}' cannot carry a path"
            ));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, project_id: &ProjectId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["projects", project_id.as_str(), "all-resources"]);
        }
        url
    }
}

#[async_trait]
impl InventorySource for HttpInventorySource {
    async fn fetch_inventory(&self, project_id: &ProjectId) -> Result<Inventory, FetchError> {
        let url = self.endpoint(project_id);
        debug!(project_id = %project_id, url = %url, "inventory: requesting all resources");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Response {
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        decode_inventory(&body)
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
