use crate::types::{ContentType, Item, Result, Source};
use async_trait::async_trait;

/// Raw network access used by every normalizer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the extra request headers and return the response body.
    /// Non-success statuses are errors.
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<Vec<u8>>;
}

/// Converts one source's wire format into canonical items.
///
/// Items come back untagged and without an id; the orchestrator fills both.
#[async_trait]
pub trait Normalizer: Send + Sync {
    fn content_type(&self) -> ContentType;

    async fn normalize(&self, source: &Source, transport: &dyn Transport) -> Result<Vec<Item>>;
}
