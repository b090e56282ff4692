//! Generation orchestrator
//!
//! Composes the three stages as an explicit state machine:
//! `TextPending → ParallelPending → Done`. The text stage always runs to
//! completion first because the audio stage narrates the final text; the
//! visual and audio stages then run as two concurrent tasks and the request
//! waits for both. Exceeding the total latency target is an observability
//! signal, never a request failure.

use super::audio::{AudioGenerationStage, AudioOutput};
use super::text::{TextGenerationStage, TextOutput};
use super::visual::{VisualGenerationStage, VisualOutput};
use crate::assets::AssetStore;
use crate::providers::{ProviderRegistry, RemoteBackendClient};
use crate::Result;
use futures::Stream;
use hush_common::api::{StoryAssets, StoryExperienceResult, StoryGenerationRequest};
use hush_common::events::{EventBus, GenerationAttempt, HushEvent, StageKind, StoryEvent};
use hush_common::PerformanceBudget;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Pipeline phase for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    TextPending,
    ParallelPending,
    Done,
}

/// Orchestrates text, visual, and audio generation for story requests
///
/// Constructed once at startup; every request runs on its own task and
/// shares nothing mutable with other requests except the asset directory,
/// which is collision-free by fresh-identifier writes.
pub struct GenerationOrchestrator {
    text_stage: TextGenerationStage,
    visual_stage: VisualGenerationStage,
    audio_stage: AudioGenerationStage,
    budget: PerformanceBudget,
    events: EventBus,
}

impl GenerationOrchestrator {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        backend: Option<Arc<RemoteBackendClient>>,
        store: Arc<AssetStore>,
        budget: PerformanceBudget,
        events: EventBus,
        voice_override: Option<String>,
    ) -> Self {
        Self {
            text_stage: TextGenerationStage::new(providers.clone(), backend, budget),
            visual_stage: VisualGenerationStage::new(providers.clone(), store.clone(), budget),
            audio_stage: AudioGenerationStage::new(providers, store, budget, voice_override),
            budget,
            events,
        }
    }

    /// Generate one complete story experience
    ///
    /// Always returns a full result for a valid request, regardless of
    /// provider availability; `InvalidInput` (empty prompt) is the only
    /// caller-visible input failure.
    pub async fn generate_story_experience(
        &self,
        request: &StoryGenerationRequest,
    ) -> Result<StoryExperienceResult> {
        request.validate().map_err(crate::Error::from)?;
        let request = request.normalized();

        let session_id = Uuid::new_v4();
        let total_start = Instant::now();
        let mut phase = Phase::TextPending;

        tracing::info!(
            session_id = %session_id,
            theme = %request.theme,
            num_scenes = request.num_scenes,
            phase = ?phase,
            "Starting story generation"
        );

        // Phase 1: text runs alone; its output feeds the audio stage.
        let text_start = Instant::now();
        let text = self.text_stage.run(&request).await;
        let text_ms = text_start.elapsed().as_millis() as u64;
        self.record_stage(session_id, StageKind::Text, &text.attempts, text.satisfied_by, text_ms);

        phase = Phase::ParallelPending;
        tracing::debug!(session_id = %session_id, phase = ?phase, "Text complete, launching media stages");

        // Phase 2: two independent tasks, wait for both. No early return on
        // first completion; the result needs both media kinds.
        let parallel_start = Instant::now();
        let (visual, audio) = tokio::join!(
            self.visual_stage.run(&request),
            self.audio_stage.run(&text.story_text, &request),
        );
        let visual: VisualOutput = visual?;
        let audio: AudioOutput = audio?;
        let parallel_ms = parallel_start.elapsed().as_millis() as u64;

        self.record_stage(
            session_id,
            StageKind::Visual,
            &visual.attempts,
            visual.satisfied_by,
            parallel_ms,
        );
        self.record_stage(
            session_id,
            StageKind::Audio,
            &audio.attempts,
            audio.satisfied_by,
            parallel_ms,
        );

        phase = Phase::Done;
        let total_ms = total_start.elapsed().as_millis() as u64;

        if total_start.elapsed() > self.budget.total.target {
            tracing::warn!(
                session_id = %session_id,
                total_ms,
                target_ms = self.budget.total.target.as_millis() as u64,
                "Story generation exceeded total latency target"
            );
        }

        self.events.emit(HushEvent::ExperienceCompleted {
            session_id,
            text_ms,
            parallel_ms,
            total_ms,
            timestamp: chrono::Utc::now(),
        });

        tracing::info!(
            session_id = %session_id,
            phase = ?phase,
            text_tier = text.satisfied_by,
            visual_tier = visual.satisfied_by,
            audio_tier = audio.satisfied_by,
            voice = %audio.voice,
            total_ms,
            "Story generation complete"
        );

        Ok(StoryExperienceResult {
            story_text: text.story_text,
            theme: request.theme.clone(),
            assets: StoryAssets {
                audio_path: audio.audio_path,
                frames: visual.frames,
                video_path: String::new(),
            },
            session_id,
        })
    }

    /// Incremental variant: server-push text events for the same input
    ///
    /// Emits exactly one `start`, one `text` event per sentence-delimited
    /// chunk of the generated story, then exactly one terminal `done`. A
    /// malformed request yields a single `error` event instead.
    pub fn generate_story_stream(
        self: Arc<Self>,
        request: StoryGenerationRequest,
    ) -> impl Stream<Item = StoryEvent> + Send {
        async_stream::stream! {
            if let Err(e) = request.validate() {
                yield StoryEvent::Error { message: e.to_string() };
                return;
            }
            let request = request.normalized();

            let session_id = Uuid::new_v4();
            yield StoryEvent::Start { session_id };

            let text_start = Instant::now();
            let text: TextOutput = self.text_stage.run(&request).await;
            let text_ms = text_start.elapsed().as_millis() as u64;
            self.record_stage(session_id, StageKind::Text, &text.attempts, text.satisfied_by, text_ms);

            for chunk in split_sentences(&text.story_text) {
                yield StoryEvent::Text { content: chunk };
            }

            yield StoryEvent::Done { session_id };
        }
    }

    /// Emit attempt telemetry and the stage completion record
    fn record_stage(
        &self,
        session_id: Uuid,
        stage: StageKind,
        attempts: &[GenerationAttempt],
        satisfied_by: &str,
        elapsed_ms: u64,
    ) {
        for attempt in attempts {
            self.events.emit(HushEvent::AttemptRecorded {
                session_id,
                stage,
                attempt: attempt.clone(),
                timestamp: chrono::Utc::now(),
            });
        }
        self.events.emit(HushEvent::StageCompleted {
            session_id,
            stage,
            satisfied_by: satisfied_by.to_string(),
            elapsed_ms,
            timestamp: chrono::Utc::now(),
        });
    }
}

/// Split story text into sentence-delimited chunks
///
/// A chunk ends at `.`, `!`, or `?` followed by whitespace (or end of
/// input). Concatenating the chunks reproduces the story text up to the
/// whitespace between sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |n| n.is_whitespace()) {
            while chars.peek().map_or(false, |n| n.is_whitespace()) {
                chars.next();
            }
            let chunk = current.trim().to_string();
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
            current.clear();
        }
    }

    let tail = current.trim().to_string();
    if !tail.is_empty() {
        chunks.push(tail);
    }
    chunks
}
