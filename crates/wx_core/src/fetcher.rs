use async_trait::async_trait;
use crate::types::FetchResult;

#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch and extract a single article.
    ///
    /// Failures are reported through [`FetchResult::Failed`]; implementations
    /// never surface an error to the caller.
    async fn fetch(&self, url: &str) -> FetchResult;
}
