//! API request/response types
//!
//! Wire types shared between the generation service and its clients. A
//! request is immutable once received; normalization produces a fresh copy
//! with clamped scene counts rather than mutating in place.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default story length in characters
pub const DEFAULT_TARGET_LENGTH: u32 = 1160;

/// Default number of illustrated scenes
pub const DEFAULT_NUM_SCENES: u32 = 4;

/// Scene count bounds for the standard pipeline
pub const SCENE_RANGE: (u32, u32) = (1, 5);

/// Scene count bounds for the fast pipeline variant
pub const SCENE_RANGE_FAST: (u32, u32) = (1, 2);

/// Optional per-child context attached to a story request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryProfile {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub routine: Option<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub favorite_characters: Vec<String>,
}

/// A request for one generated story experience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryGenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default = "default_target_length")]
    pub target_length: u32,
    #[serde(default = "default_num_scenes")]
    pub num_scenes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<StoryProfile>,
    #[serde(default)]
    pub include_text_overlay: bool,
}

fn default_target_length() -> u32 {
    DEFAULT_TARGET_LENGTH
}

fn default_num_scenes() -> u32 {
    DEFAULT_NUM_SCENES
}

impl StoryGenerationRequest {
    /// Validate caller-supplied fields
    ///
    /// An empty (or all-whitespace) prompt is the only hard input failure;
    /// every other field has a usable default.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::InvalidInput("prompt must not be empty".to_string()));
        }
        Ok(())
    }

    /// Copy of this request with `num_scenes` clamped to the standard range
    pub fn normalized(&self) -> Self {
        self.clamped(SCENE_RANGE)
    }

    /// Copy of this request with `num_scenes` clamped to the fast range
    pub fn normalized_fast(&self) -> Self {
        self.clamped(SCENE_RANGE_FAST)
    }

    fn clamped(&self, (lo, hi): (u32, u32)) -> Self {
        let mut req = self.clone();
        req.num_scenes = req.num_scenes.clamp(lo, hi);
        req
    }
}

/// Servable asset paths for one story experience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryAssets {
    /// Relative path of the narration audio file
    pub audio_path: String,
    /// Relative paths of the scene frames, in scene order
    pub frames: Vec<String>,
    /// Reserved; currently always empty
    pub video_path: String,
}

/// The complete result of one story generation request
///
/// Immutable; owned by the caller after return. `story_text` is non-empty
/// for every request that passes validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryExperienceResult {
    pub story_text: String,
    pub theme: String,
    pub assets: StoryAssets,
    pub session_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in_missing_fields() {
        let req: StoryGenerationRequest =
            serde_json::from_str(r#"{"prompt": "a sleepy fox"}"#).unwrap();
        assert_eq!(req.target_length, 1160);
        assert_eq!(req.num_scenes, 4);
        assert!(req.theme.is_empty());
        assert!(req.profile.is_none());
        assert!(!req.include_text_overlay);
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let req = StoryGenerationRequest {
            prompt: "   ".to_string(),
            theme: "Forest Friends".to_string(),
            target_length: DEFAULT_TARGET_LENGTH,
            num_scenes: DEFAULT_NUM_SCENES,
            profile: None,
            include_text_overlay: false,
        };
        assert!(matches!(req.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn num_scenes_clamps_to_standard_and_fast_ranges() {
        let mut req: StoryGenerationRequest =
            serde_json::from_str(r#"{"prompt": "p", "num_scenes": 9}"#).unwrap();
        assert_eq!(req.normalized().num_scenes, 5);
        assert_eq!(req.normalized_fast().num_scenes, 2);

        req.num_scenes = 0;
        assert_eq!(req.normalized().num_scenes, 1);
        assert_eq!(req.normalized_fast().num_scenes, 1);
    }
}
