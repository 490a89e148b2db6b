//! The `run` subcommand: fetch → extract → normalize per store, one
//! combined sink write per run.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use futures::stream::{self, StreamExt};

use veckofynd_core::{AppConfig, StoreConfig};
use veckofynd_pipeline::{export_csv, normalize, FailurePolicy, NormalizeReport, OfferTable};
use veckofynd_scraper::{extract_offers, HttpFetcher, PageFetcher};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Stores file to scrape; overrides VECKOFYND_STORES_PATH.
    #[arg(long)]
    pub stores: Option<PathBuf>,

    /// Also export the combined table to a CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Abort a store's batch on the first cleaning-stage failure instead
    /// of keeping the partially cleaned table.
    #[arg(long)]
    pub strict: bool,

    /// Skip the database write (useful together with --csv).
    #[arg(long)]
    pub skip_db: bool,
}

fn failure_policy(strict: bool) -> FailurePolicy {
    if strict {
        FailurePolicy::Strict
    } else {
        FailurePolicy::BestEffort
    }
}

pub async fn run(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let stores_path = args.stores.clone().unwrap_or_else(|| config.stores_path.clone());
    let stores_file = veckofynd_core::load_stores(&stores_path)
        .with_context(|| format!("loading stores file {}", stores_path.display()))?;

    let policy = failure_policy(args.strict);
    let fetcher = HttpFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;

    // Store batches share no state, so they can run concurrently; the
    // sink still sees exactly one combined write at the end.
    let max_concurrent = config.max_concurrent_stores.max(1);
    let results: Vec<(&StoreConfig, anyhow::Result<NormalizeReport>)> =
        stream::iter(&stores_file.stores)
            .map(|store| {
                let fetcher = &fetcher;
                async move { (store, scrape_store(fetcher, store, policy).await) }
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

    let store_count = stores_file.stores.len();
    let mut tables = Vec::new();
    let mut failed_stores = 0usize;
    for (store, result) in results {
        match result {
            Ok(report) => {
                for warning in &report.warnings {
                    tracing::warn!(
                        store = %store.name,
                        stage = warning.stage,
                        error = %warning.error,
                        "cleaning stage degraded for store"
                    );
                }
                tracing::info!(
                    store = %store.name,
                    rows = report.table.row_count(),
                    duplicates_removed = report.duplicates_removed,
                    "store batch normalized"
                );
                tables.push(report.table);
            }
            Err(e) => {
                tracing::error!(store = %store.name, error = format!("{e:#}"), "store failed, skipping");
                failed_stores += 1;
            }
        }
    }

    if tables.is_empty() {
        anyhow::bail!("all {store_count} stores failed; nothing to persist");
    }

    let combined = OfferTable::concat(tables)?;
    tracing::info!(
        rows = combined.row_count(),
        columns = combined.column_count(),
        "combined offer table ready"
    );

    if let Some(path) = &args.csv {
        export_csv(&combined, path)
            .with_context(|| format!("exporting CSV to {}", path.display()))?;
    }

    if args.skip_db {
        tracing::info!("database write skipped (--skip-db)");
    } else {
        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL is not set; pass --skip-db for a database-less run")?;
        let pool = veckofynd_db::connect_pool(
            database_url,
            veckofynd_db::PoolConfig::from_app_config(config),
        )
        .await
        .context("connecting to the offers database")?;
        veckofynd_db::run_migrations(&pool).await?;

        let offers = combined.to_offers();
        let written = veckofynd_db::replace_offers(&pool, &offers).await?;
        tracing::info!(written, "offers persisted");
    }

    if failed_stores > 0 {
        tracing::warn!(failed_stores, store_count, "run finished with store failures");
    }
    Ok(())
}

async fn scrape_store(
    fetcher: &HttpFetcher,
    store: &StoreConfig,
    policy: FailurePolicy,
) -> anyhow::Result<NormalizeReport> {
    tracing::info!(store = %store.name, url = %store.url, "scraping store");
    let html = fetcher.fetch_page(&store.url).await?;
    let records = extract_offers(&html)?;
    let report = normalize(records, policy)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_best_effort() {
        assert_eq!(failure_policy(false), FailurePolicy::BestEffort);
    }

    #[test]
    fn strict_flag_selects_strict_policy() {
        assert_eq!(failure_policy(true), FailurePolicy::Strict);
    }
}
