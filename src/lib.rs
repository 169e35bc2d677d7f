pub mod core;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod records;
pub mod stats;
pub mod storage;

pub use self::core::{CrawlConfig, CrawlError, CrawlOutcome, CrawlReport, CrawlResult, Crawler};
pub use self::fetch::{FetchError, Fetcher, HttpFetcher};
pub use self::records::{Honor, PlayerRecord, TeamRecord};
pub use self::stats::StatsTracker;
pub use self::storage::RecordStore;
