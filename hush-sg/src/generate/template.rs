//! Deterministic template composer
//!
//! The terminal tier of the text chain: a pure function of
//! (prompt, theme, profile) that always produces a complete story. Phrase
//! tables are keyed by theme family; the caller's literal prompt text is
//! interpolated into the body so the request is always recognizable in the
//! output, even fully offline.

use hush_common::api::StoryGenerationRequest;

/// Coarse theme classification shared by the phrase tables and voice selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFamily {
    Calming,
    Adventure,
    Fantasy,
    Nature,
    /// No keyword matched; soft generic phrasing
    Gentle,
}

const CALMING_KEYWORDS: &[&str] = &[
    "dream", "star", "aurora", "cloud", "sleep", "moon", "lullaby", "night",
];
const ADVENTURE_KEYWORDS: &[&str] = &[
    "space", "explor", "adventure", "rocket", "pirate", "quest", "journey",
];
const FANTASY_KEYWORDS: &[&str] = &[
    "dragon", "magic", "fairy", "castle", "wizard", "unicorn", "enchant",
];
const NATURE_KEYWORDS: &[&str] = &[
    "forest", "friend", "ocean", "garden", "meadow", "animal", "river", "sea",
];

impl ThemeFamily {
    /// Classify a theme string by keyword match
    pub fn classify(theme: &str) -> Self {
        let theme = theme.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|k| theme.contains(k));

        if matches(CALMING_KEYWORDS) {
            Self::Calming
        } else if matches(ADVENTURE_KEYWORDS) {
            Self::Adventure
        } else if matches(FANTASY_KEYWORDS) {
            Self::Fantasy
        } else if matches(NATURE_KEYWORDS) {
            Self::Nature
        } else {
            Self::Gentle
        }
    }
}

/// Protagonist for a theme when the profile names no favorite character
fn default_protagonist(family: ThemeFamily) -> &'static str {
    match family {
        ThemeFamily::Calming => "Luna the sleepy owl",
        ThemeFamily::Adventure => "Milo the small explorer",
        ThemeFamily::Fantasy => "Ember the young dragon",
        ThemeFamily::Nature => "Fern the little fox",
        ThemeFamily::Gentle => "Willow the little rabbit",
    }
}

fn opening(family: ThemeFamily, protagonist: &str) -> String {
    match family {
        ThemeFamily::Calming => format!(
            "As the first stars blinked awake, {} settled into a nest of soft clouds. ",
            protagonist
        ),
        ThemeFamily::Adventure => format!(
            "Just before bedtime, {} zipped up a cozy jacket for one last gentle adventure. ",
            protagonist
        ),
        ThemeFamily::Fantasy => format!(
            "In a kingdom where the lanterns hummed lullabies, {} tiptoed out of the castle garden. ",
            protagonist
        ),
        ThemeFamily::Nature => format!(
            "Deep in the quiet woods, {} padded softly between the mossy trees. ",
            protagonist
        ),
        ThemeFamily::Gentle => format!(
            "One peaceful evening, {} curled up by the window to watch the sky turn lavender. ",
            protagonist
        ),
    }
}

fn body(family: ThemeFamily, protagonist: &str, prompt: &str) -> String {
    let wonder = match family {
        ThemeFamily::Calming => "The night was hushed and kind",
        ThemeFamily::Adventure => "The path ahead glowed with friendly lights",
        ThemeFamily::Fantasy => "A sprinkle of sleepy magic drifted down",
        ThemeFamily::Nature => "The leaves whispered a welcome",
        ThemeFamily::Gentle => "Everything felt warm and safe",
    };
    format!(
        "Tonight's tale began with {}. {} as {} wandered along, finding small wonders at every turn. \
         Each one made the evening feel a little softer, and each step made little eyelids a little heavier. ",
        prompt, wonder, protagonist
    )
}

fn closing(family: ThemeFamily, protagonist: &str) -> String {
    match family {
        ThemeFamily::Calming => format!(
            "At last {} yawned a tiny yawn, tucked in beneath a blanket of starlight, and drifted off to sleep. Goodnight. ",
            protagonist
        ),
        ThemeFamily::Adventure => format!(
            "With the adventure complete, {} sailed home on a slow breeze and fell fast asleep before landing. Goodnight. ",
            protagonist
        ),
        ThemeFamily::Fantasy => format!(
            "The sleepy magic settled like snow, and {} dreamed of gentle dragons until morning. Goodnight. ",
            protagonist
        ),
        ThemeFamily::Nature => format!(
            "The forest hummed its softest song, and {} curled up in a bed of ferns, sound asleep. Goodnight. ",
            protagonist
        ),
        ThemeFamily::Gentle => format!(
            "And with one last happy sigh, {} closed both eyes and slipped into the sweetest dream. Goodnight. ",
            protagonist
        ),
    }
}

/// Compose a complete story from the template tables
///
/// Total for every input; identical input yields identical output.
pub fn compose(request: &StoryGenerationRequest) -> String {
    let family = ThemeFamily::classify(&request.theme);

    let protagonist = request
        .profile
        .as_ref()
        .and_then(|p| p.favorite_characters.first())
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| default_protagonist(family).to_string());

    let mut story = String::new();
    story.push_str(&opening(family, &protagonist));
    story.push_str(&body(family, &protagonist, request.prompt.trim()));

    if let Some(profile) = &request.profile {
        if let Some(mood) = profile.mood.as_deref().filter(|m| !m.is_empty()) {
            story.push_str(&format!(
                "Even a {} feeling grew quiet here, soothed by the calm of the night. ",
                mood.trim().to_lowercase()
            ));
        }
        if let Some(routine) = profile.routine.as_deref().filter(|r| !r.is_empty()) {
            story.push_str(&format!(
                "It was just like {}, familiar and snug. ",
                routine.trim().to_lowercase()
            ));
        }
    }

    story.push_str(&closing(family, &protagonist));
    story.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hush_common::api::StoryProfile;

    fn request(prompt: &str, theme: &str) -> StoryGenerationRequest {
        serde_json::from_value(serde_json::json!({ "prompt": prompt, "theme": theme })).unwrap()
    }

    #[test]
    fn theme_classification_matches_keyword_sets() {
        assert_eq!(ThemeFamily::classify("Aurora Dreams"), ThemeFamily::Calming);
        assert_eq!(ThemeFamily::classify("Space Explorer"), ThemeFamily::Adventure);
        assert_eq!(ThemeFamily::classify("Dragon Castle"), ThemeFamily::Fantasy);
        assert_eq!(ThemeFamily::classify("Forest Friends"), ThemeFamily::Nature);
        assert_eq!(ThemeFamily::classify("Tuesday"), ThemeFamily::Gentle);
    }

    #[test]
    fn prompt_text_is_interpolated_literally() {
        let story = compose(&request("a sleepy fox", "Forest Friends"));
        assert!(story.contains("a sleepy fox"));
        assert!(!story.is_empty());
    }

    #[test]
    fn identical_input_yields_identical_output() {
        let req = request("a sleepy fox", "Forest Friends");
        assert_eq!(compose(&req), compose(&req));
    }

    #[test]
    fn favorite_character_becomes_protagonist() {
        let mut req = request("a kite", "Aurora Dreams");
        req.profile = Some(StoryProfile {
            favorite_characters: vec!["Captain Paws".to_string()],
            ..Default::default()
        });
        let story = compose(&req);
        assert!(story.contains("Captain Paws"));
    }

    #[test]
    fn mood_and_routine_are_woven_in() {
        let mut req = request("a boat", "Ocean Garden");
        req.profile = Some(StoryProfile {
            mood: Some("Restless".to_string()),
            routine: Some("warm milk and one song".to_string()),
            ..Default::default()
        });
        let story = compose(&req);
        assert!(story.contains("restless"));
        assert!(story.contains("warm milk and one song"));
    }
}
