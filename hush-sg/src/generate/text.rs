//! Text generation stage
//!
//! Fallback order: remote backend (only when one is configured), on-device
//! model, deterministic template composer. The story text this stage returns
//! is a hard dependency of the audio stage, so the orchestrator always runs
//! it to completion before anything else.

use super::fallback::{FallbackChain, Tier, TierOutcome};
use super::template;
use crate::providers::{ProviderRegistry, RemoteBackendClient};
use hush_common::api::StoryGenerationRequest;
use hush_common::events::GenerationAttempt;
use hush_common::PerformanceBudget;
use std::sync::Arc;

/// Sampling temperature for the on-device model
const TEMPERATURE: f32 = 0.8;

/// Floor for the converted token budget, so tiny target lengths don't
/// produce degenerate requests
const MIN_TOKEN_BUDGET: u32 = 64;

/// Rough character-per-token ratio used to convert `target_length`
const CHARS_PER_TOKEN: u32 = 4;

/// Result of the text stage
pub struct TextOutput {
    pub story_text: String,
    pub satisfied_by: &'static str,
    pub attempts: Vec<GenerationAttempt>,
}

/// Stage driving the story-text fallback chain
pub struct TextGenerationStage {
    providers: Arc<ProviderRegistry>,
    backend: Option<Arc<RemoteBackendClient>>,
    budget: PerformanceBudget,
}

impl TextGenerationStage {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        backend: Option<Arc<RemoteBackendClient>>,
        budget: PerformanceBudget,
    ) -> Self {
        Self {
            providers,
            backend,
            budget,
        }
    }

    /// Produce story text for a request; cannot fail
    pub async fn run(&self, request: &StoryGenerationRequest) -> TextOutput {
        let mut chain = FallbackChain::new("template_composer", {
            let req = request.clone();
            move || async move { template::compose(&req) }
        });

        // Remote tier crosses a network boundary and may itself be doing
        // heavy generation, so it gets the generous timeout.
        if let Some(backend) = self.backend.clone().filter(|b| b.is_remote()) {
            let req = request.clone();
            chain.push_tier(Tier::new(
                "remote_backend",
                self.budget.remote_text_timeout(),
                move || async move {
                    match backend.generate_story(&req).await {
                        Ok(text) if text.trim().is_empty() => TierOutcome::Empty,
                        Ok(text) => TierOutcome::Success(text),
                        Err(e) => TierOutcome::Error(e.to_string()),
                    }
                },
            ));
        }

        if let Some(model) = self.providers.text.clone() {
            let prompt = build_model_prompt(request);
            let max_tokens = token_budget(request.target_length);
            chain.push_tier(Tier::new(
                "on_device_model",
                self.budget.local_text_timeout(),
                move || async move {
                    match model.generate(&prompt, max_tokens, TEMPERATURE).await {
                        Ok(text) if text.trim().is_empty() => TierOutcome::Empty,
                        Ok(text) => TierOutcome::Success(text),
                        Err(e) => TierOutcome::Error(e.to_string()),
                    }
                },
            ));
        }

        let out = chain.run().await;
        TextOutput {
            story_text: out.value,
            satisfied_by: out.satisfied_by,
            attempts: out.attempts,
        }
    }
}

/// Convert the requested character length to an approximate token budget
fn token_budget(target_length: u32) -> u32 {
    (target_length / CHARS_PER_TOKEN).max(MIN_TOKEN_BUDGET)
}

/// Build the context-enriched prompt for the on-device model
fn build_model_prompt(request: &StoryGenerationRequest) -> String {
    let mut prompt = format!(
        "Write a gentle bedtime story for a young child.\nTheme: {}\nStory idea: {}\n",
        request.theme, request.prompt
    );

    if let Some(profile) = &request.profile {
        if let Some(mood) = profile.mood.as_deref().filter(|m| !m.is_empty()) {
            prompt.push_str(&format!("The child is feeling {} tonight.\n", mood));
        }
        if let Some(routine) = profile.routine.as_deref().filter(|r| !r.is_empty()) {
            prompt.push_str(&format!("Their bedtime routine is: {}.\n", routine));
        }
        if !profile.preferences.is_empty() {
            prompt.push_str(&format!(
                "They especially love {}.\n",
                profile.preferences.join(", ")
            ));
        }
        if let Some(character) = profile.favorite_characters.first() {
            prompt.push_str(&format!("Include their favorite character, {}.\n", character));
        }
    }

    prompt.push_str("Keep the tone calm and soothing, and end with the child falling asleep.");
    prompt
}
