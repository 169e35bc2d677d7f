use crate::fetch::FetchError;
use crate::storage::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub type CrawlResult<T> = Result<T, CrawlError>;
