//! HTTP request handlers

use crate::state::AppContext;
use crate::Error;
use axum::{extract::State, http::StatusCode, Json};
use hush_common::api::{StoryExperienceResult, StoryGenerationRequest};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "hush-sg".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /story/generate - Generate a complete story experience
pub async fn generate_story(
    State(ctx): State<AppContext>,
    Json(request): Json<StoryGenerationRequest>,
) -> Result<Json<StoryExperienceResult>, (StatusCode, Json<StatusResponse>)> {
    run_generation(ctx, request).await
}

/// POST /story/generate/fast - Reduced-scene variant for quick turnaround
pub async fn generate_story_fast(
    State(ctx): State<AppContext>,
    Json(request): Json<StoryGenerationRequest>,
) -> Result<Json<StoryExperienceResult>, (StatusCode, Json<StatusResponse>)> {
    run_generation(ctx, request.normalized_fast()).await
}

async fn run_generation(
    ctx: AppContext,
    request: StoryGenerationRequest,
) -> Result<Json<StoryExperienceResult>, (StatusCode, Json<StatusResponse>)> {
    match ctx.orchestrator.generate_story_experience(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(Error::InvalidInput(msg)) => Err((
            StatusCode::BAD_REQUEST,
            Json(StatusResponse {
                status: format!("error: {}", msg),
            }),
        )),
        Err(e) => {
            error!("Story generation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}
