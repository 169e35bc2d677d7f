use std::sync::atomic::Ordering;

use log::warn;

use sportscrawler::{CrawlConfig, CrawlOutcome, CrawlResult, Crawler, HttpFetcher, RecordStore};

#[tokio::main]
async fn main() -> CrawlResult<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let store = RecordStore::open("data")?;
    let fetcher = Box::new(HttpFetcher::new()?);
    let crawler = Crawler::new(fetcher, store, CrawlConfig::default());

    let interrupt = crawler.interrupt_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt signal received, stopping after the current page");
            interrupt.store(true, Ordering::Relaxed);
        }
    });

    let report = crawler.run().await;
    if report.outcome == CrawlOutcome::Failed {
        std::process::exit(1);
    }

    Ok(())
}
