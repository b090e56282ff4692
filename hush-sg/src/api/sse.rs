//! Server-Sent Events endpoints
//!
//! Streams the incremental story variant and the telemetry event bus to
//! connected clients.

use crate::state::AppContext;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use hush_common::api::StoryGenerationRequest;
use hush_common::events::HushEvent;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

/// POST /story/generate/stream - incremental story event stream
///
/// Emits one `start` event, one `text` event per sentence chunk, then a
/// terminal `done` (or a single `error` for a malformed request).
pub async fn story_stream(
    State(ctx): State<AppContext>,
    Json(request): Json<StoryGenerationRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("New incremental story client connected");

    let stream = ctx
        .orchestrator
        .clone()
        .generate_story_stream(request)
        .filter_map(|event| async move {
            let name = event.event_name();
            Event::default().event(name).json_data(&event).ok().map(Ok)
        });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// GET /events - telemetry SSE event stream
pub async fn event_stream(
    State(ctx): State<AppContext>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("New SSE telemetry client connected");

    let rx = ctx.events.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => Some(Ok(Event::default()
                    .event(event_type_str(&event))
                    .data(json))),
                Err(e) => {
                    warn!("Failed to serialize event: {}", e);
                    None
                }
            },
            Err(e) => {
                // BroadcastStream error (lagged or closed)
                warn!("SSE stream error: {:?}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Extract event type string from HushEvent
fn event_type_str(event: &HushEvent) -> &'static str {
    match event {
        HushEvent::AttemptRecorded { .. } => "AttemptRecorded",
        HushEvent::StageCompleted { .. } => "StageCompleted",
        HushEvent::ExperienceCompleted { .. } => "ExperienceCompleted",
    }
}
