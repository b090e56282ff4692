//! Performance budget configuration
//!
//! Soft target/maximum durations per generation stage. The budget is read-only
//! after initialization: every fallback tier draws its timeout from here, and
//! the orchestrator compares total elapsed time against the total target when
//! deciding whether to log a latency warning.

use std::time::Duration;

/// Target and maximum duration for a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageBudget {
    /// Duration the stage should normally stay under
    pub target: Duration,
    /// Hard ceiling used for tier timeouts
    pub max: Duration,
}

impl StageBudget {
    pub const fn new(target: Duration, max: Duration) -> Self {
        Self { target, max }
    }
}

/// Process-wide latency budget for the generation pipeline
///
/// Defaults reflect the intended interactive experience: the whole pipeline
/// should finish within 30 seconds, with the remote text tier allowed to run
/// much longer than the on-device tiers because it crosses a network boundary
/// and may itself be doing heavy generation.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceBudget {
    pub text: StageBudget,
    /// Budget per requested image, scaled by scene count for batch timeouts
    pub image_per_unit: StageBudget,
    pub audio: StageBudget,
    pub total: StageBudget,
}

impl Default for PerformanceBudget {
    fn default() -> Self {
        Self {
            text: StageBudget::new(Duration::from_secs(5), Duration::from_secs(180)),
            image_per_unit: StageBudget::new(Duration::from_secs(10), Duration::from_secs(20)),
            audio: StageBudget::new(Duration::from_secs(8), Duration::from_secs(20)),
            total: StageBudget::new(Duration::from_secs(30), Duration::from_secs(60)),
        }
    }
}

impl PerformanceBudget {
    /// Timeout for the remote text backend tier (generous, crosses the network)
    pub fn remote_text_timeout(&self) -> Duration {
        self.text.max
    }

    /// Timeout for the on-device text model tier
    ///
    /// Deliberately short: its purpose is to keep the pipeline from hanging
    /// when no model is loaded.
    pub fn local_text_timeout(&self) -> Duration {
        self.text.target
    }

    /// Timeout for a diffusion batch of `num_images` images
    pub fn image_batch_timeout(&self, num_images: usize) -> Duration {
        self.image_per_unit.max * num_images.max(1) as u32
    }

    /// Timeout for the on-device speech model tier
    pub fn speech_timeout(&self) -> Duration {
        self.audio.max
    }

    /// Timeout for the native text-to-speech tier
    pub fn native_tts_timeout(&self) -> Duration {
        self.audio.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_total_target_is_thirty_seconds() {
        let budget = PerformanceBudget::default();
        assert_eq!(budget.total.target, Duration::from_secs(30));
    }

    #[test]
    fn local_text_timeout_is_single_digit_seconds() {
        let budget = PerformanceBudget::default();
        assert!(budget.local_text_timeout() < Duration::from_secs(10));
    }

    #[test]
    fn remote_text_timeout_is_generous() {
        let budget = PerformanceBudget::default();
        assert!(budget.remote_text_timeout() >= Duration::from_secs(60));
    }

    #[test]
    fn image_batch_timeout_scales_with_count() {
        let budget = PerformanceBudget::default();
        let one = budget.image_batch_timeout(1);
        let four = budget.image_batch_timeout(4);
        assert_eq!(four, one * 4);
        // Zero images still gets a non-zero window
        assert_eq!(budget.image_batch_timeout(0), one);
    }
}
