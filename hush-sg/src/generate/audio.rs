//! Audio generation stage
//!
//! Fallback order: on-device speech model, native text-to-speech, silent
//! waveform. Voice selection runs before the chain (see [`super::voice`]).
//! The terminal tier builds a one-second silent WAV from first principles so
//! that any downstream audio player can open the result without error even
//! with zero network and zero loaded models.

use super::fallback::{FallbackChain, Tier, TierOutcome};
use super::voice::select_voice;
use crate::assets::{AssetKind, AssetStore};
use crate::providers::ProviderRegistry;
use crate::Result;
use hush_common::api::StoryGenerationRequest;
use hush_common::events::GenerationAttempt;
use hush_common::PerformanceBudget;
use std::sync::Arc;

/// Sample rate of the silent fallback waveform
pub const FALLBACK_SAMPLE_RATE: u32 = 22_050;

/// Normal narration rate for the on-device speech model
const SPEECH_RATE: f32 = 1.0;

/// Slowed rate for the platform engine, tuned for bedtime narration
const NATIVE_TTS_RATE: f32 = 0.5;
const NATIVE_TTS_VOLUME: f32 = 1.0;
const NATIVE_TTS_PITCH: f32 = 1.0;

/// Result of the audio stage
pub struct AudioOutput {
    /// Servable path of the narration file
    pub audio_path: String,
    /// Voice the decision table resolved to
    pub voice: String,
    pub satisfied_by: &'static str,
    pub attempts: Vec<GenerationAttempt>,
}

/// Stage driving the narration fallback chain
pub struct AudioGenerationStage {
    providers: Arc<ProviderRegistry>,
    store: Arc<AssetStore>,
    budget: PerformanceBudget,
    voice_override: Option<String>,
}

impl AudioGenerationStage {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        store: Arc<AssetStore>,
        budget: PerformanceBudget,
        voice_override: Option<String>,
    ) -> Self {
        Self {
            providers,
            store,
            budget,
            voice_override,
        }
    }

    /// Synthesize and persist narration for the final story text
    ///
    /// The chain itself cannot fail; the only error here is asset
    /// persistence.
    pub async fn run(
        &self,
        story_text: &str,
        request: &StoryGenerationRequest,
    ) -> Result<AudioOutput> {
        let mood = request.profile.as_ref().and_then(|p| p.mood.as_deref());
        let voice = select_voice(&request.theme, mood, self.voice_override.as_deref());

        tracing::debug!(voice = %voice, theme = %request.theme, "Narration voice selected");

        let mut chain =
            FallbackChain::new("silent_waveform", || async { silent_wav(FALLBACK_SAMPLE_RATE) });

        if let Some(model) = self.providers.speech.clone() {
            let text = story_text.to_string();
            let voice = voice.clone();
            chain.push_tier(Tier::new(
                "on_device_speech",
                self.budget.speech_timeout(),
                move || async move {
                    match model.synthesize(&text, &voice, SPEECH_RATE).await {
                        Ok(bytes) if bytes.is_empty() => TierOutcome::Empty,
                        Ok(bytes) => TierOutcome::Success(bytes),
                        Err(e) => TierOutcome::Error(e.to_string()),
                    }
                },
            ));
        }

        if let Some(engine) = self.providers.native_tts.clone() {
            let text = story_text.to_string();
            let voice = voice.clone();
            chain.push_tier(Tier::new(
                "native_tts",
                self.budget.native_tts_timeout(),
                move || async move {
                    // The platform engine needs explicit initialization;
                    // failing to come up fails the tier, not the request.
                    if let Err(e) = engine.initialize().await {
                        return TierOutcome::Error(format!("initialization failed: {}", e));
                    }
                    match engine
                        .synthesize_to_file(
                            &text,
                            &voice,
                            NATIVE_TTS_RATE,
                            NATIVE_TTS_VOLUME,
                            NATIVE_TTS_PITCH,
                        )
                        .await
                    {
                        Ok(bytes) if bytes.is_empty() => TierOutcome::Empty,
                        Ok(bytes) => TierOutcome::Success(bytes),
                        Err(e) => TierOutcome::Error(e.to_string()),
                    }
                },
            ));
        }

        let out = chain.run().await;
        let asset = self.store.write(AssetKind::Audio, &out.value).await?;

        Ok(AudioOutput {
            audio_path: asset.relative_path,
            voice,
            satisfied_by: out.satisfied_by,
            attempts: out.attempts,
        })
    }
}

/// Build a one-second, 16-bit mono PCM WAV of silence
///
/// Header fields are written from first principles: RIFF container, 16-byte
/// fmt chunk, zeroed sample data.
pub fn silent_wav(sample_rate: u32) -> Vec<u8> {
    let num_samples = sample_rate; // one second, mono
    let data_len = num_samples * 2; // 16-bit samples

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(wav.len() + data_len as usize, 0);
    wav
}
