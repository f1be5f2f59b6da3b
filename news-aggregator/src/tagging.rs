use crate::types::{Item, Tag, TagCategory};
use std::collections::HashSet;
use std::sync::OnceLock;
use uuid::Uuid;

/// Region keyword table. Declaration order decides ties: the first region
/// with any matching keyword wins.
const REGION_KEYWORDS: &[(&str, &[&str])] = &[
    ("north-america", &["usa", "canada", "mexico", "united states", "american"]),
    ("south-america", &["brazil", "argentina", "chile", "colombia", "venezuela"]),
    (
        "europe",
        &["eu", "european union", "uk", "britain", "germany", "france", "italy", "spain"],
    ),
    ("asia", &["china", "japan", "india", "korea", "asian"]),
    ("africa", &["africa", "nigeria", "egypt", "south africa", "kenya"]),
    ("oceania", &["australia", "new zealand", "pacific"]),
];

/// Marker words per language, in tie-break priority order.
const LANGUAGE_MARKERS: &[(&str, &[&str])] = &[
    ("english", &["the", "and", "in", "of", "to"]),
    ("spanish", &["el", "la", "en", "de", "por"]),
    ("french", &["le", "la", "les", "en", "de"]),
    ("german", &["der", "die", "das", "und", "in"]),
];

pub const DEFAULT_LANGUAGE: &str = "english";

const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("politics", &["politics", "government", "election", "president", "minister"]),
    ("economy", &["economy", "market", "stock", "trade", "financial"]),
    ("technology", &["technology", "software", "digital", "cyber"]),
    ("science", &["science", "research", "study", "discovery"]),
    ("health", &["health", "medical", "disease", "treatment", "covid"]),
    ("sports", &["sports", "game", "tournament", "championship", "player"]),
    ("entertainment", &["entertainment", "movie", "music", "celebrity", "art"]),
    ("environment", &["environment", "climate", "pollution", "sustainable"]),
];

/// The fixed, process-wide system tag catalog.
pub fn system_tags() -> &'static [Tag] {
    static CATALOG: OnceLock<Vec<Tag>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        use TagCategory::*;
        vec![
            Tag::new("north-america", "North America", "#FF6B6B", Region),
            Tag::new("south-america", "South America", "#4ECDC4", Region),
            Tag::new("europe", "Europe", "#45B7D1", Region),
            Tag::new("asia", "Asia", "#96CEB4", Region),
            Tag::new("africa", "Africa", "#FFEEAD", Region),
            Tag::new("oceania", "Oceania", "#D4A5A5", Region),
            Tag::new("english", "English", "#9B59B6", Language),
            Tag::new("spanish", "Spanish", "#E67E22", Language),
            Tag::new("french", "French", "#F1C40F", Language),
            Tag::new("german", "German", "#2ECC71", Language),
            Tag::new("politics", "Politics", "#E74C3C", Topic),
            Tag::new("economy", "Economy", "#27AE60", Topic),
            Tag::new("technology", "Technology", "#3498DB", Topic),
            Tag::new("science", "Science", "#8E44AD", Topic),
            Tag::new("health", "Health", "#2C3E50", Topic),
            Tag::new("sports", "Sports", "#F39C12", Topic),
            Tag::new("entertainment", "Entertainment", "#D35400", Topic),
            Tag::new("environment", "Environment", "#16A085", Topic),
        ]
    })
}

pub fn system_tag(id: &str, category: TagCategory) -> Option<&'static Tag> {
    system_tags()
        .iter()
        .find(|tag| tag.id == id && tag.category == category)
}

/// Region id for `text`, or an empty string when no keyword matches.
pub fn detect_region(text: &str) -> &'static str {
    let text = text.to_lowercase();
    REGION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(region, _)| *region)
        .unwrap_or("")
}

/// Language with the most exact marker-word hits. Ties go to the language
/// listed first; no hits at all means English.
pub fn detect_language(text: &str) -> &'static str {
    let text = text.to_lowercase();
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut detected = DEFAULT_LANGUAGE;
    let mut max_count = 0;

    for (language, markers) in LANGUAGE_MARKERS {
        let count = words.iter().filter(|w| markers.contains(*w)).count();
        if count > max_count {
            max_count = count;
            detected = *language;
        }
    }

    detected
}

/// Topic ids whose keyword table matches `text`, each at most once.
pub fn detect_topics(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(topic, _)| *topic)
        .collect()
}

/// Builds a user tag with a fresh short id.
pub fn new_user_tag(name: &str, color: &str) -> Tag {
    let id = Uuid::new_v4().simple().to_string()[..8].to_string();
    Tag::new(&id, name.trim(), color, TagCategory::User)
}

/// Assigns region, language, topic and user tags to normalized items.
#[derive(Debug, Clone, Default)]
pub struct AutoTagger {
    user_tags: Vec<Tag>,
}

impl AutoTagger {
    pub fn new(user_tags: Vec<Tag>) -> Self {
        Self { user_tags }
    }

    pub fn tag(&self, item: &mut Item) {
        let text = item.combined_text();
        let lowered = text.to_lowercase();

        item.region = detect_region(&text).to_string();
        item.language = detect_language(&text).to_string();

        let mut tags = Vec::new();

        if let Some(tag) = system_tag(&item.region, TagCategory::Region) {
            tags.push(tag.clone());
        }
        if let Some(tag) = system_tag(&item.language, TagCategory::Language) {
            tags.push(tag.clone());
        }

        tags.extend(
            detect_topics(&text)
                .into_iter()
                .filter_map(|topic| system_tag(topic, TagCategory::Topic))
                .cloned(),
        );

        tags.extend(
            self.user_tags
                .iter()
                .filter(|tag| {
                    let name = tag.name.trim().to_lowercase();
                    !name.is_empty() && lowered.contains(&name)
                })
                .cloned(),
        );

        let mut seen = HashSet::new();
        tags.retain(|tag| seen.insert(tag.id.clone()));

        item.tags = tags;
    }
}
