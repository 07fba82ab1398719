use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiError,
    protocol::{parse_artwork_page, PageQuery},
};
use thiserror::Error;
use tracing::{debug, info};

pub mod config;
pub mod controller;
pub mod pagination;
pub mod selection;

pub use config::{load_settings, ViewerSettings};
pub use controller::{ApplyOutcome, CatalogController, PageRequest, ViewState};
pub use pagination::PagerConfig;
pub use selection::SelectionSet;
pub use shared::protocol::ArtworkPage;

const AIC_USER_AGENT_HEADER: &str = "AIC-User-Agent";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("artworks endpoint responded with HTTP {status}")]
    Status { status: u16 },
    #[error("malformed artworks payload: {0}")]
    Malformed(#[from] ApiError),
}

/// A failed page load as remembered by the controller and shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub page: u32,
    pub message: String,
}

#[async_trait]
pub trait ArtworkFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ArtworkPage, FetchError>;
}

pub struct HttpArtworkFetcher {
    http: Client,
    api_base_url: String,
    user_agent: String,
}

impl HttpArtworkFetcher {
    pub fn new(settings: &ViewerSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: &ViewerSettings) -> Self {
        Self {
            http,
            api_base_url: settings.api_base_url.clone(),
            user_agent: settings.user_agent.clone(),
        }
    }
}

#[async_trait]
impl ArtworkFetcher for HttpArtworkFetcher {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ArtworkPage, FetchError> {
        info!(page, limit, url = %self.api_base_url, "fetching artworks page");
        let response = self
            .http
            .get(&self.api_base_url)
            .query(&PageQuery::new(page, limit))
            .header(AIC_USER_AGENT_HEADER, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let artworks = parse_artwork_page(&body)?;
        debug!(
            page,
            rows = artworks.rows.len(),
            total_records = artworks.total_records,
            "artworks page decoded"
        );
        Ok(artworks)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
