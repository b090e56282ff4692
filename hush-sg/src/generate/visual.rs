//! Visual generation stage
//!
//! Fallback order: on-device diffusion, remote backend (reserved, currently
//! an immediate fall-through), synthetic placeholder frames. The chain
//! produces encoded image batches; the stage persists every accepted image
//! through the asset store under a fresh frame identifier and returns the
//! servable paths in scene order.
//!
//! A diffusion batch smaller than the requested scene count fails the tier
//! outright rather than being topped up, so a result set is never a mix of
//! model frames and placeholders.

use super::fallback::{FallbackChain, Tier, TierOutcome};
use crate::assets::{AssetKind, AssetStore};
use crate::providers::ProviderRegistry;
use crate::Result;
use hush_common::api::StoryGenerationRequest;
use hush_common::events::GenerationAttempt;
use hush_common::PerformanceBudget;
use std::sync::Arc;
use std::time::Duration;

/// Reduced-resolution frame size for the on-device diffusion tier
const FRAME_WIDTH: u32 = 384;
const FRAME_HEIGHT: u32 = 384;

/// Reduced step count for the on-device diffusion tier
const DIFFUSION_STEPS: u32 = 10;

/// Minimal valid 1x1 PNG used by the placeholder tier, one copy per scene
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Result of the visual stage
pub struct VisualOutput {
    /// Servable frame paths, in scene order; length equals `num_scenes`
    pub frames: Vec<String>,
    pub satisfied_by: &'static str,
    pub attempts: Vec<GenerationAttempt>,
}

/// Stage driving the scene-frame fallback chain
pub struct VisualGenerationStage {
    providers: Arc<ProviderRegistry>,
    store: Arc<AssetStore>,
    budget: PerformanceBudget,
}

impl VisualGenerationStage {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        store: Arc<AssetStore>,
        budget: PerformanceBudget,
    ) -> Self {
        Self {
            providers,
            store,
            budget,
        }
    }

    /// Generate and persist `num_scenes` frames for a request
    ///
    /// The chain itself cannot fail; the only error here is asset
    /// persistence.
    pub async fn run(&self, request: &StoryGenerationRequest) -> Result<VisualOutput> {
        let num_scenes = request.num_scenes as usize;

        let mut chain = FallbackChain::new("placeholder_frames", move || async move {
            vec![PLACEHOLDER_PNG.to_vec(); num_scenes]
        });

        if let Some(model) = self.providers.image.clone() {
            let prompt = illustration_prompt(request);
            chain.push_tier(Tier::new(
                "on_device_diffusion",
                self.budget.image_batch_timeout(num_scenes),
                move || async move {
                    match model
                        .generate(
                            &prompt,
                            num_scenes as u32,
                            FRAME_WIDTH,
                            FRAME_HEIGHT,
                            DIFFUSION_STEPS,
                        )
                        .await
                    {
                        Ok(images) if images.is_empty() => TierOutcome::Empty,
                        Ok(mut images) if images.len() >= num_scenes => {
                            images.truncate(num_scenes);
                            TierOutcome::Success(images)
                        }
                        Ok(images) => TierOutcome::Error(format!(
                            "partial batch: {} of {} images",
                            images.len(),
                            num_scenes
                        )),
                        Err(e) => TierOutcome::Error(e.to_string()),
                    }
                },
            ));
        }

        // Reserved extension point: a remote image backend would slot in
        // here. Until one exists the tier reports empty and falls through.
        chain.push_tier(Tier::new("remote_backend", Duration::from_secs(1), || async {
            TierOutcome::Empty
        }));

        let out = chain.run().await;

        let mut frames = Vec::with_capacity(out.value.len());
        for bytes in &out.value {
            let asset = self.store.write(AssetKind::Frame, bytes).await?;
            frames.push(asset.relative_path);
        }

        Ok(VisualOutput {
            frames,
            satisfied_by: out.satisfied_by,
            attempts: out.attempts,
        })
    }
}

/// Prompt for one batch of scene illustrations
fn illustration_prompt(request: &StoryGenerationRequest) -> String {
    format!(
        "Soft storybook illustration for a bedtime story. Theme: {}. Scene: {}",
        request.theme, request.prompt
    )
}
