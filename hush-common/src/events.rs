//! Event types for the Hush event system
//!
//! Provides the telemetry event definitions and EventBus shared by the story
//! generation service, plus the client-facing event enum used by the
//! incremental story stream. Fallback tiers report their outcomes here as
//! structured records instead of ad hoc progress callbacks.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Top-level generation stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Text,
    Visual,
    Audio,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Visual => "visual",
            Self::Audio => "audio",
        }
    }
}

/// Result of trying a single fallback tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    EmptyResult,
    Error,
    TimedOut,
}

/// Record of one tier attempt within a fallback chain
///
/// Produced once per tier tried. Retained for telemetry only; callers of the
/// orchestrator never see individual attempts, only aggregate timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationAttempt {
    pub tier_name: String,
    pub outcome: AttemptOutcome,
    pub elapsed_ms: u64,
}

/// Hush telemetry event types
///
/// Events are broadcast via EventBus and can be serialized for SSE
/// transmission. The orchestrator is the sole producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HushEvent {
    /// A fallback tier finished (successfully or not)
    AttemptRecorded {
        /// Session this attempt belongs to
        session_id: Uuid,
        /// Stage whose chain ran the tier
        stage: StageKind,
        /// The attempt record
        attempt: GenerationAttempt,
        /// When the attempt finished
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A stage's fallback chain produced a value
    StageCompleted {
        /// Session this stage ran for
        session_id: Uuid,
        /// Which stage completed
        stage: StageKind,
        /// Name of the tier that satisfied the chain
        satisfied_by: String,
        /// Total stage duration in milliseconds
        elapsed_ms: u64,
        /// When the stage completed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A full story experience was assembled
    ExperienceCompleted {
        /// Session that completed
        session_id: Uuid,
        /// Text phase duration in milliseconds
        text_ms: u64,
        /// Parallel (visual + audio) phase duration in milliseconds
        parallel_ms: u64,
        /// Total request duration in milliseconds
        total_ms: u64,
        /// When the experience completed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Client-facing events for the incremental story stream
///
/// Wire contract: exactly one `start`, then one `text` event per
/// sentence-delimited chunk of the generated story, then exactly one terminal
/// `done`. A malformed request yields a single `error` event instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoryEvent {
    Start { session_id: Uuid },
    Text { content: String },
    Done { session_id: Uuid },
    Error { message: String },
}

impl StoryEvent {
    /// SSE event name for this variant
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Text { .. } => "text",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }
}

/// Central event distribution bus for telemetry events
///
/// Uses tokio::broadcast internally: non-blocking publish, multiple
/// concurrent subscribers, automatic cleanup when subscribers drop. Slow
/// subscribers lag rather than blocking the generation pipeline.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<HushEvent>,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<HushEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether any subscriber is connected
    ///
    /// Telemetry must never fail a request: a bus with no listeners simply
    /// drops the event.
    pub fn emit(&self, event: HushEvent) {
        if let Ok(count) = self.tx.send(event) {
            tracing::trace!("Broadcast telemetry event to {} subscribers", count);
        }
    }

    /// Current number of connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_event_serializes_with_wire_names() {
        let event = StoryEvent::Text {
            content: "Once upon a time.".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"text\""));
        assert_eq!(event.event_name(), "text");
    }

    #[test]
    fn emit_without_subscribers_is_silent() {
        let bus = EventBus::new(8);
        bus.emit(HushEvent::ExperienceCompleted {
            session_id: Uuid::new_v4(),
            text_ms: 1,
            parallel_ms: 2,
            total_ms: 3,
            timestamp: chrono::Utc::now(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit(HushEvent::StageCompleted {
            session_id: Uuid::new_v4(),
            stage: StageKind::Text,
            satisfied_by: "template_composer".to_string(),
            elapsed_ms: 12,
            timestamp: chrono::Utc::now(),
        });

        match rx.recv().await.unwrap() {
            HushEvent::StageCompleted { stage, satisfied_by, .. } => {
                assert_eq!(stage, StageKind::Text);
                assert_eq!(satisfied_by, "template_composer");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
