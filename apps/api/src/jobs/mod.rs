//! Job corpus: dataset loading behind a pluggable source, and the live catalog.
//!
//! `AppState` holds an `Arc<dyn JobSource>`; reloads go through `reload_catalog`,
//! which builds off the async runtime and swaps the finished catalog in.

pub mod catalog;
pub mod dataset;
pub mod handlers;

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::jobs::catalog::{CatalogHandle, CatalogSummary, JobCatalog};
use crate::matching::stop_words::StopWords;
use crate::models::job::JobPosting;

/// Where postings come from. Implement this to load from something other than CSV.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn load(&self) -> Result<Vec<JobPosting>>;

    fn describe(&self) -> String;
}

/// Reads a CSV dataset from disk on every load.
pub struct CsvJobSource {
    path: PathBuf,
}

impl CsvJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobSource for CsvJobSource {
    async fn load(&self) -> Result<Vec<JobPosting>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read job dataset {}", self.path.display()))?;
        dataset::read_postings(bytes.as_slice())
            .with_context(|| format!("Failed to parse job dataset {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Loads, builds and installs a fresh catalog. The live one stays in place on error.
/// Concurrent reloads run one at a time, so the last one to start is the one left live.
pub async fn reload_catalog(
    source: &dyn JobSource,
    handle: &CatalogHandle,
    stop_words: StopWords,
) -> Result<CatalogSummary> {
    let _guard = handle.lock_reload().await;
    let postings = source.load().await?;
    let catalog = tokio::task::spawn_blocking(move || JobCatalog::build(postings, stop_words))
        .await
        .context("Catalog build task failed")?;
    let summary = catalog.summary();
    handle.swap(catalog).await;
    Ok(summary)
}
