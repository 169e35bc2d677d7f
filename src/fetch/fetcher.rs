use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

pub type FetchResult<T> = Result<T, FetchError>;

/// One attempt per URL per run. Any failure means "skip this URL and keep
/// crawling"; unresolved pages are picked up again by a later run because
/// they never reach the durable store.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> FetchResult<String>;
}
