//! The job catalog: postings and their vector index, built and swapped as one value.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::matching::index::VectorIndex;
use crate::matching::stop_words::StopWords;
use crate::models::job::JobPosting;

/// Immutable once built. Row `i` of the index belongs to `postings[i]`.
#[derive(Debug)]
pub struct JobCatalog {
    generation: Uuid,
    built_at: DateTime<Utc>,
    postings: Vec<JobPosting>,
    index: VectorIndex,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub generation: Uuid,
    pub built_at: DateTime<Utc>,
    pub postings: usize,
    pub vocabulary_size: usize,
}

impl JobCatalog {
    pub fn build(postings: Vec<JobPosting>, stop_words: StopWords) -> Self {
        let descriptions: Vec<&str> = postings
            .iter()
            .map(|p| p.cleaned_description.as_str())
            .collect();
        let index = VectorIndex::fit(&descriptions, stop_words);
        let catalog = Self {
            generation: Uuid::new_v4(),
            built_at: Utc::now(),
            postings,
            index,
        };
        info!(
            generation = %catalog.generation,
            postings = catalog.postings.len(),
            vocabulary = catalog.index.vocabulary_size(),
            "Job catalog built"
        );
        catalog
    }

    pub fn empty() -> Self {
        Self::build(Vec::new(), StopWords::none())
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            generation: self.generation,
            built_at: self.built_at,
            postings: self.postings.len(),
            vocabulary_size: self.index.vocabulary_size(),
        }
    }
}

/// Shared slot holding the live catalog. Readers clone the `Arc`; a rebuild
/// replaces it whole.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Arc<JobCatalog>>>,
    /// Held for a whole load-build-swap so rebuilds install in the order they started.
    reload: Arc<Mutex<()>>,
}

impl CatalogHandle {
    pub fn new(catalog: JobCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
            reload: Arc::new(Mutex::new(())),
        }
    }

    /// Waits for any rebuild in progress, then blocks others until the guard drops.
    pub async fn lock_reload(&self) -> MutexGuard<'_, ()> {
        self.reload.lock().await
    }

    pub async fn current(&self) -> Arc<JobCatalog> {
        self.inner.read().await.clone()
    }

    /// Installs `catalog` and returns the one it replaced.
    pub async fn swap(&self, catalog: JobCatalog) -> Arc<JobCatalog> {
        let mut slot = self.inner.write().await;
        std::mem::replace(&mut *slot, Arc::new(catalog))
    }
}
