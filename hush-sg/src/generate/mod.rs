//! Story generation pipeline
//!
//! Each stage wraps its own fallback chain; the orchestrator sequences the
//! text stage ahead of the concurrent visual and audio stages.

pub mod audio;
pub mod fallback;
pub mod orchestrator;
pub mod template;
pub mod text;
pub mod visual;
pub mod voice;

pub use audio::AudioGenerationStage;
pub use fallback::{FallbackChain, Tier, TierOutcome};
pub use orchestrator::{split_sentences, GenerationOrchestrator};
pub use text::TextGenerationStage;
pub use visual::VisualGenerationStage;
