//! Shared application state

use crate::generate::GenerationOrchestrator;
use hush_common::events::EventBus;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application context passed to all handlers
///
/// AppContext implements Clone, which gives us `FromRef<AppContext>` for
/// free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub orchestrator: Arc<GenerationOrchestrator>,
    /// Telemetry bus the orchestrator writes attempt records to
    pub events: EventBus,
    /// Asset root served below `/assets`
    pub assets_root: PathBuf,
}
