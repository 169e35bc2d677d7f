use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::time::sleep;
use url::Url;

use crate::extract;
use crate::fetch::Fetcher;
use crate::frontier;
use crate::records::{PlayerRecord, TeamRecord};
use crate::stats::{CrawlStats, StatsTracker};
use crate::storage::RecordStore;

use super::{CrawlConfig, CrawlResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Frontier exhausted, buffer flushed.
    Completed,
    /// External interrupt; buffer flushed, safe to resume later.
    Interrupted,
    /// Unhandled error; durable store untouched since the last flush, the
    /// attempted state preserved in a recovery snapshot.
    Failed,
}

#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,
    pub urls_processed: usize,
    pub stats: CrawlStats,
}

/// Drives the league -> team -> player traversal: one fetch-extract-persist
/// cycle at a time, with a fixed politeness delay between requests and
/// flush/backup checkpoints every few retained records.
pub struct Crawler {
    fetcher: Box<dyn Fetcher>,
    store: RecordStore,
    config: CrawlConfig,
    stats: StatsTracker,
    interrupt: Arc<AtomicBool>,
    processed_urls: HashSet<String>,
    buffer: Vec<PlayerRecord>,
    teams: Vec<TeamRecord>,
    since_flush: usize,
    since_backup: usize,
}

impl Crawler {
    pub fn new(fetcher: Box<dyn Fetcher>, store: RecordStore, config: CrawlConfig) -> Self {
        // Resume point: every stored identity counts as already processed,
        // so a restarted crawl picks up where the store left off.
        let processed_urls = store.known_urls();
        if !processed_urls.is_empty() {
            info!("Resuming crawl with {} stored records", processed_urls.len());
        }

        Self {
            fetcher,
            store,
            config,
            stats: StatsTracker::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
            processed_urls,
            buffer: Vec::new(),
            teams: Vec::new(),
            since_flush: 0,
            since_backup: 0,
        }
    }

    /// Shared flag for an external interrupt (ctrl-c). Checked at the top of
    /// each traversal step, never mid-fetch.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub async fn run(mut self) -> CrawlReport {
        info!("Starting crawl of {}", self.config.base_url);

        let outcome = match self.traverse().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Unhandled error during traversal: {}", e);
                // The durable store keeps the last flushed state; the snapshot
                // preserves whatever the buffer held on top of it.
                match self.store.backup(&self.buffer) {
                    Ok(path) => warn!("Recovery snapshot written to {}", path.display()),
                    Err(be) => error!("Recovery backup failed: {}", be),
                }
                CrawlOutcome::Failed
            }
        };

        self.stats.finish();
        let stats = self.stats.snapshot();
        let duration = stats
            .end_time
            .unwrap_or(stats.start_time)
            .signed_duration_since(stats.start_time);
        info!(
            "Crawl {:?} after {}s: {} URLs processed, {} records extracted",
            outcome,
            duration.num_seconds(),
            self.processed_urls.len(),
            stats.records_extracted
        );
        self.stats.print_summary();

        CrawlReport {
            outcome,
            urls_processed: self.processed_urls.len(),
            stats,
        }
    }

    async fn traverse(&mut self) -> CrawlResult<CrawlOutcome> {
        let league_url = self.config.league_url()?;
        info!("Fetching league page {}", league_url);

        let league_body = match self.fetcher.fetch(&league_url).await {
            Ok(body) => {
                self.stats.record_page();
                body
            }
            Err(e) => {
                warn!("League page unavailable, nothing to crawl: {}", e);
                self.stats.record_fetch_failure();
                return Ok(CrawlOutcome::Completed);
            }
        };

        let team_urls = frontier::discover_teams(&league_body, &self.config.base_url);
        info!("Discovered {} team pages", team_urls.len());

        for team_url in &team_urls {
            if self.interrupted() {
                return self.stop_interrupted();
            }
            if self.processed_urls.contains(team_url.as_str()) {
                debug!("Skipping already processed team {}", team_url);
                continue;
            }

            let Some(team_body) = self.attempt(team_url).await else {
                continue;
            };

            let team = extract::extract_team(&team_body, team_url, &self.config.base_url);
            info!("Team {:?} lists {} players", team.name, team.players.len());

            for player in &team.players {
                if self.interrupted() {
                    return self.stop_interrupted();
                }
                if self.processed_urls.contains(player.as_str()) {
                    debug!("Skipping already processed player {}", player);
                    continue;
                }

                let player_url = Url::parse(player)?;
                let Some(player_body) = self.attempt(&player_url).await else {
                    continue;
                };

                match extract::extract_player(&player_body, &player_url) {
                    Some(record) => {
                        info!("Extracted {} ({} buffered)", record.name, self.buffer.len() + 1);
                        self.stats.record_extracted();
                        self.buffer.push(record);
                        self.checkpoint()?;
                    }
                    None => self.stats.record_suppressed(),
                }
            }

            self.teams.push(team);
        }

        self.finalize()?;
        Ok(CrawlOutcome::Completed)
    }

    /// Fetch one page, marking the URL as attempted either way, then apply
    /// the politeness delay.
    async fn attempt(&mut self, url: &Url) -> Option<String> {
        let result = self.fetcher.fetch(url).await;
        self.processed_urls.insert(url.to_string());

        let body = match result {
            Ok(body) => {
                self.stats.record_page();
                Some(body)
            }
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
                self.stats.record_fetch_failure();
                None
            }
        };

        if !self.config.politeness_delay.is_zero() {
            sleep(self.config.politeness_delay).await;
        }

        body
    }

    /// Flush/backup thresholds, checked after every retained record so any
    /// due write lands before the next fetch begins.
    fn checkpoint(&mut self) -> CrawlResult<()> {
        self.since_flush += 1;
        self.since_backup += 1;

        if self.since_flush >= self.config.save_frequency {
            self.try_flush();
        }

        if self.since_backup >= self.config.backup_frequency {
            // Normally runs right after a flush; the buffer argument only
            // matters when that flush just failed.
            let path = self.store.backup(&self.buffer)?;
            self.stats.record_backup();
            info!("Backup snapshot written to {}", path.display());
            self.since_backup = 0;
        }

        Ok(())
    }

    /// A failed flush keeps the buffer and the threshold state, so the next
    /// retained record triggers another attempt with the same records.
    fn try_flush(&mut self) -> bool {
        match self.store.flush(&mut self.buffer) {
            Ok(flushed) => {
                if flushed > 0 {
                    self.stats.record_flush();
                }
                self.since_flush = 0;
                true
            }
            Err(e) => {
                error!(
                    "Flush failed, keeping {} buffered records: {}",
                    self.buffer.len(),
                    e
                );
                false
            }
        }
    }

    fn stop_interrupted(&mut self) -> CrawlResult<CrawlOutcome> {
        info!(
            "Interrupt received, flushing {} buffered records before stopping",
            self.buffer.len()
        );
        if !self.try_flush() && !self.buffer.is_empty() {
            let path = self.store.backup(&self.buffer)?;
            warn!(
                "Final flush failed; buffered records preserved in {}",
                path.display()
            );
        }
        Ok(CrawlOutcome::Interrupted)
    }

    fn finalize(&mut self) -> CrawlResult<()> {
        if !self.buffer.is_empty() {
            info!("Final flush of {} records", self.buffer.len());
            if !self.try_flush() {
                let path = self.store.backup(&self.buffer)?;
                warn!(
                    "Final flush failed; buffered records preserved in {}",
                    path.display()
                );
            }
        }

        if !self.teams.is_empty() {
            self.store.save_teams(&self.teams)?;
        }

        Ok(())
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }
}
