//! Narration voice selection
//!
//! A small pure decision table, not a fallback chain: an explicit
//! caller-supplied voice wins; otherwise the theme keyword match picks a
//! voice, narrowed by mood (anxious or restless moods always resolve to the
//! calmest voice); with no signal at all the calmest default is used. The
//! result is reproducible for the same (theme, mood, override) triple.

use super::template::ThemeFamily;

/// Calmest voice; the default and the anxious/restless override
pub const VOICE_CALM: &str = "willow-soft";
pub const VOICE_ADVENTURE: &str = "finch-lively";
pub const VOICE_FANTASY: &str = "sage-warm";
pub const VOICE_NATURE: &str = "fern-mellow";

const UNSETTLED_MOODS: &[&str] = &["anxious", "restless", "worried", "fussy"];

/// Select the narration voice for a story
pub fn select_voice(theme: &str, mood: Option<&str>, override_voice: Option<&str>) -> String {
    if let Some(voice) = override_voice.map(str::trim).filter(|v| !v.is_empty()) {
        return voice.to_string();
    }

    if let Some(mood) = mood {
        let mood = mood.to_lowercase();
        if UNSETTLED_MOODS.iter().any(|m| mood.contains(m)) {
            return VOICE_CALM.to_string();
        }
    }

    let voice = match ThemeFamily::classify(theme) {
        ThemeFamily::Adventure => VOICE_ADVENTURE,
        ThemeFamily::Fantasy => VOICE_FANTASY,
        ThemeFamily::Nature => VOICE_NATURE,
        ThemeFamily::Calming | ThemeFamily::Gentle => VOICE_CALM,
    };
    voice.to_string()
}
