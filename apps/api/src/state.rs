use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::jobs::catalog::{CatalogHandle, JobCatalog};
use crate::jobs::{CsvJobSource, JobSource};
use crate::matching::recommender::RecommenderConfig;
use crate::parsing::sections::SectionClassifier;
use crate::parsing::skills::SkillMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub classifier: Arc<SectionClassifier>,
    /// Skills vocabulary compiled once at startup.
    pub skills: Arc<SkillMatcher>,
    pub recommender: Arc<RecommenderConfig>,
    /// Live job catalog; swapped whole on reload.
    pub catalog: CatalogHandle,
    /// Pluggable dataset source. Default: `CsvJobSource` on `JOBS_DATASET_PATH`.
    pub job_source: Arc<dyn JobSource>,
}

impl AppState {
    /// State with an empty catalog; call `jobs::reload_catalog` to fill it.
    pub fn from_config(config: Config) -> Result<Self> {
        let job_source = Arc::new(CsvJobSource::new(&config.jobs_dataset_path));
        Self::with_source(config, job_source)
    }

    pub fn with_source(config: Config, job_source: Arc<dyn JobSource>) -> Result<Self> {
        let skills = SkillMatcher::new(config.skills_vocabulary.iter().cloned())
            .context("Failed to compile skills vocabulary")?;
        let recommender = RecommenderConfig::new(
            config.priority_roles.clone(),
            config.recommendation_boost,
            config.recommendation_top_n,
        );
        Ok(AppState {
            classifier: Arc::new(SectionClassifier::default()),
            skills: Arc::new(skills),
            recommender: Arc::new(recommender),
            catalog: CatalogHandle::new(JobCatalog::empty()),
            job_source,
            config,
        })
    }
}
