//! Provider capability seams
//!
//! Each inference capability the pipeline consumes is a trait, with
//! implementations selected at construction time and handed to the
//! orchestrator through a [`ProviderRegistry`]. There are no global provider
//! singletons: an absent registry slot simply means "model not loaded", which
//! a fallback chain treats as an ordinary tier failure.

mod backend;

pub use backend::{RemoteBackendClient, DEFAULT_LOCAL_BACKEND};

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// On-device text generation capability
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate up to `max_tokens` tokens of text for `prompt`
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

/// On-device image generation capability
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate `num_images` images; each element is one encoded image
    async fn generate(
        &self,
        prompt: &str,
        num_images: u32,
        width: u32,
        height: u32,
        steps: u32,
    ) -> Result<Vec<Vec<u8>>>;
}

/// On-device speech synthesis capability
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize narration audio for `text` with the given voice
    async fn synthesize(&self, text: &str, voice: &str, rate: f32) -> Result<Vec<u8>>;
}

/// Platform text-to-speech capability
///
/// Unlike [`SpeechProvider`], the platform engine requires explicit
/// initialization; an initialization failure fails the tier, never the
/// request.
#[async_trait]
pub trait NativeTts: Send + Sync {
    async fn initialize(&self) -> Result<()>;

    async fn synthesize_to_file(
        &self,
        text: &str,
        voice: &str,
        rate: f32,
        volume: f32,
        pitch: f32,
    ) -> Result<Vec<u8>>;
}

/// The set of provider capabilities available to one orchestrator
///
/// Constructed once at startup and passed by reference into the pipeline.
/// Every slot is optional; a fully empty registry still yields a playable
/// story experience via the deterministic fallback tiers.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    pub text: Option<Arc<dyn TextProvider>>,
    pub image: Option<Arc<dyn ImageProvider>>,
    pub speech: Option<Arc<dyn SpeechProvider>>,
    pub native_tts: Option<Arc<dyn NativeTts>>,
}

impl ProviderRegistry {
    /// Registry with no loaded providers
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, provider: Arc<dyn TextProvider>) -> Self {
        self.text = Some(provider);
        self
    }

    pub fn with_image(mut self, provider: Arc<dyn ImageProvider>) -> Self {
        self.image = Some(provider);
        self
    }

    pub fn with_speech(mut self, provider: Arc<dyn SpeechProvider>) -> Self {
        self.speech = Some(provider);
        self
    }

    pub fn with_native_tts(mut self, provider: Arc<dyn NativeTts>) -> Self {
        self.native_tts = Some(provider);
        self
    }
}
