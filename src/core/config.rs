use std::time::Duration;
use url::Url;

/// Fixed knobs for a crawl run. Defaults mirror the production deployment;
/// the builders exist for tests and alternate leagues.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    pub league_path: String,
    pub politeness_delay: Duration,
    pub save_frequency: usize,
    pub backup_frequency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://www.thesportsdb.com").unwrap(),
            league_path: "/league/4391-NFL".to_string(),
            politeness_delay: Duration::from_secs(1),
            save_frequency: 10,
            // Must stay a multiple of save_frequency so snapshots always
            // follow a flush.
            backup_frequency: 50,
        }
    }
}

impl CrawlConfig {
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_league_path(mut self, path: &str) -> Self {
        self.league_path = path.to_string();
        self
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn with_save_frequency(mut self, every: usize) -> Self {
        self.save_frequency = every;
        self
    }

    pub fn with_backup_frequency(mut self, every: usize) -> Self {
        self.backup_frequency = every;
        self
    }

    pub fn league_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join(&self.league_path)
    }
}
