mod config;
mod errors;
mod extract;
mod jobs;
mod matching;
mod models;
mod parsing;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::reload_catalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(config.clone())?;
    info!(
        skills = state.skills.vocabulary().count(),
        priority_roles = state.recommender.priority_roles.len(),
        "Matching configuration loaded"
    );

    // Initial catalog build; an unreadable dataset leaves the empty catalog in place
    match reload_catalog(
        state.job_source.as_ref(),
        &state.catalog,
        config.stop_words.build(),
    )
    .await
    {
        Ok(summary) => info!(
            postings = summary.postings,
            vocabulary = summary.vocabulary_size,
            "Job catalog ready"
        ),
        Err(e) => warn!(
            source = %state.job_source.describe(),
            "Job catalog unavailable, serving empty catalog until reload: {e:#}"
        ),
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
