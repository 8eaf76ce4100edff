pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::parsing::handlers as parsing;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume parsing
        .route("/api/v1/resumes/parse", post(parsing::handle_parse_upload))
        .route(
            "/api/v1/resumes/parse-text",
            post(parsing::handle_parse_text),
        )
        // Recommendations
        .route("/api/v1/recommendations", post(matching::handle_recommend))
        .route(
            "/api/v1/recommendations/upload",
            post(matching::handle_recommend_upload),
        )
        // Job catalog
        .route("/api/v1/jobs/catalog", get(jobs::handle_catalog_summary))
        .route("/api/v1/jobs/reload", post(jobs::handle_reload))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
