use crate::FetchError;
use async_trait::async_trait;

/// Source of data looked up by name.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    async fn fetch(&self, name: &str) -> Result<Self::Output, FetchError>;
}
