use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub records_extracted: usize,
    pub records_suppressed: usize,
    pub flushes: usize,
    pub backups: usize,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<CrawlStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CrawlStats {
                start_time: Utc::now(),
                end_time: None,
                pages_fetched: 0,
                fetch_failures: 0,
                records_extracted: 0,
                records_suppressed: 0,
                flushes: 0,
                backups: 0,
            })),
        }
    }

    pub fn record_page(&self) {
        self.stats.write().pages_fetched += 1;
    }

    pub fn record_fetch_failure(&self) {
        self.stats.write().fetch_failures += 1;
    }

    pub fn record_extracted(&self) {
        self.stats.write().records_extracted += 1;
    }

    /// Pages that parsed but yielded no record (placeholder description or
    /// unresolved identity).
    pub fn record_suppressed(&self) {
        self.stats.write().records_suppressed += 1;
    }

    pub fn record_flush(&self) {
        self.stats.write().flushes += 1;
    }

    pub fn record_backup(&self) {
        self.stats.write().backups += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn snapshot(&self) -> CrawlStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nCrawl Statistics:");
        println!("=================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Pages Fetched: {}", stats.pages_fetched);
        println!("Fetch Failures: {}", stats.fetch_failures);
        println!("Records Extracted: {}", stats.records_extracted);
        println!("Records Suppressed: {}", stats.records_suppressed);
        println!("Flushes: {}", stats.flushes);
        println!("Backups: {}", stats.backups);
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
