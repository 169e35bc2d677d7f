use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use url::Url;

use super::{FetchError, FetchResult, Fetcher};

#[derive(Debug, Clone)]
pub enum MockOutcome {
    Body(String),
    Status(u16),
    Timeout,
}

/// Scripted fetcher for crawler tests: a fixed url -> outcome map plus a log
/// of every fetch in the order it happened.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: HashMap<String, MockOutcome>,
    log: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), MockOutcome::Body(body.to_string()));
        self
    }

    pub fn with_outcome(mut self, url: &str, outcome: MockOutcome) -> Self {
        self.pages.insert(url.to_string(), outcome);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.log.read().clone()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.log.read().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        self.log.write().push(url.to_string());

        match self.pages.get(url.as_str()) {
            Some(MockOutcome::Body(body)) => Ok(body.clone()),
            Some(MockOutcome::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(MockOutcome::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
