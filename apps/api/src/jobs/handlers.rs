use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::catalog::CatalogSummary;
use crate::jobs::reload_catalog;
use crate::state::AppState;

/// GET /api/v1/jobs/catalog
pub async fn handle_catalog_summary(State(state): State<AppState>) -> Json<CatalogSummary> {
    Json(state.catalog.current().await.summary())
}

/// POST /api/v1/jobs/reload
pub async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<CatalogSummary>, AppError> {
    info!(source = %state.job_source.describe(), "Reloading job catalog");
    let summary = reload_catalog(
        state.job_source.as_ref(),
        &state.catalog,
        state.config.stop_words.build(),
    )
    .await?;
    Ok(Json(summary))
}
