use async_trait::async_trait;

use crate::domain::entities::query::PageRequest;
use crate::domain::entities::record::PageResponse;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, FetchError>;
}
