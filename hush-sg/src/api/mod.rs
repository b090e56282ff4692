//! HTTP API façade
//!
//! Thin request router over the generation orchestrator: parse the request,
//! invoke the pipeline, serialize the result. Assets are served directly
//! from the store's root directory by relative path.

mod handlers;
mod sse;

use crate::state::AppContext;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

/// Build the application router
pub fn create_router(ctx: AppContext) -> Router {
    let assets = ServeDir::new(ctx.assets_root.clone());

    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health))

        // Story generation
        .route("/story/generate", post(handlers::generate_story))
        .route("/story/generate/fast", post(handlers::generate_story_fast))
        .route("/story/generate/stream", post(sse::story_stream))

        // Telemetry event stream
        .route("/events", get(sse::event_stream))

        // Persisted assets, servable by relative path
        .nest_service("/assets", assets)

        // Attach application context
        .with_state(ctx)

        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
