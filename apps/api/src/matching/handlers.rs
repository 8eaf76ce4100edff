use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::recommender::recommend;
use crate::models::job::Recommendation;
use crate::models::resume::{ParsedResume, RawDocument};
use crate::parsing::handlers::{
    document_from_upload, non_blank, parse_with_state, read_resume_upload,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub resume: ParsedResume,
    pub recommendations: Vec<Recommendation>,
    /// Catalog generation the scores were computed against.
    pub catalog_generation: Uuid,
}

async fn recommend_for(
    state: &AppState,
    doc: &RawDocument,
    top_n: Option<usize>,
) -> RecommendResponse {
    let resume = parse_with_state(state, doc);
    let catalog = state.catalog.current().await;
    let top_n = top_n.unwrap_or(state.recommender.top_n);
    let recommendations = recommend(&resume, &catalog, &state.recommender, top_n);

    info!(
        generation = %catalog.generation(),
        candidates = catalog.len(),
        returned = recommendations.len(),
        "Recommendations ranked"
    );

    RecommendResponse {
        resume,
        recommendations,
        catalog_generation: catalog.generation(),
    }
}

/// POST /api/v1/recommendations
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let doc = non_blank(RawDocument::from_text(&req.text))?;
    Ok(Json(recommend_for(&state, &doc, req.top_n).await))
}

/// POST /api/v1/recommendations/upload
pub async fn handle_recommend_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RecommendResponse>, AppError> {
    let upload = read_resume_upload(multipart).await?;
    let top_n = upload.top_n;
    let doc = document_from_upload(upload).await?;
    Ok(Json(recommend_for(&state, &doc, top_n).await))
}
