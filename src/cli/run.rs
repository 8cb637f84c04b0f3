use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::cli::RunArgs;
use crate::config::Config;
use crate::extract::extract_report;
use crate::fetch::{is_report_url, load_urls, slug_for, ReportFetcher};
use crate::output::write_report;

#[derive(Debug, Default)]
struct BatchTotals {
    written: usize,
    rejected: usize,
    failed: usize,
}

enum DocumentOutcome {
    Written,
    Rejected,
    Failed,
}

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(out_dir) = args.out_dir {
        config.out_dir = out_dir;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    config.validate()?;

    let urls = load_urls(&args.urls_file)?;
    let (accepted, off_pattern): (Vec<_>, Vec<_>) =
        urls.into_iter().partition(|u| is_report_url(u));
    for url in &off_pattern {
        warn!("Skipping {}: not a dated report URL", url);
    }
    info!("{} report URLs to process", accepted.len());

    if args.dry_run {
        for url in &accepted {
            println!("{url}");
        }
        return Ok(());
    }

    let fetcher = Arc::new(ReportFetcher::new(&config)?);
    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let config = Arc::new(config);

    let mut tasks = FuturesUnordered::new();
    for url in accepted {
        let fetcher = fetcher.clone();
        let semaphore = semaphore.clone();
        let config = config.clone();

        tasks.push(tokio::spawn(async move {
            // The semaphore is never closed, so acquisition cannot fail.
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore never closed");
            process_document(&url, &fetcher, &config).await
        }));
    }

    let mut totals = BatchTotals::default();
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok(DocumentOutcome::Written) => totals.written += 1,
            Ok(DocumentOutcome::Rejected) => totals.rejected += 1,
            Ok(DocumentOutcome::Failed) => totals.failed += 1,
            Err(e) => {
                // A panicking task must not take the batch down with it.
                error!("Extraction task panicked: {}", e);
                totals.failed += 1;
            }
        }
    }

    info!(
        "Done: {} written, {} rejected, {} failed",
        totals.written, totals.rejected, totals.failed
    );
    Ok(())
}

/// Fetch, extract, and persist one report. Every failure mode is local
/// to the document: log with the slug and move on.
async fn process_document(url: &str, fetcher: &ReportFetcher, config: &Config) -> DocumentOutcome {
    let slug = slug_for(url);

    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("{}: fetch failed: {}", slug, e);
            return DocumentOutcome::Failed;
        }
    };

    let report = match extract_report(&html) {
        Ok(report) => report,
        Err(rejection) => {
            info!("{}: skipped ({})", slug, rejection);
            return DocumentOutcome::Rejected;
        }
    };

    match write_report(&config.out_dir, &slug, &report) {
        Ok(_) => {
            info!(
                "{}: repo={}, contracts={}, loc={}, issues={}",
                slug,
                report.scope.repository.as_deref().unwrap_or("-"),
                report.scope.contracts,
                report.scope.lines_solidity,
                report.issues.len()
            );
            DocumentOutcome::Written
        }
        Err(e) => {
            error!("{}: write failed: {}", slug, e);
            DocumentOutcome::Failed
        }
    }
}
