use crate::preferences::Preferences;
use crate::types::{ContentType, Item};
use tracing::debug;

/// Reduces items to those matching the user's content types, categories and
/// interests. An empty dimension places no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceFilter {
    pub content_types: Vec<ContentType>,
    pub categories: Vec<String>,
    pub interests: Vec<String>,
}

impl PreferenceFilter {
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            content_types: preferences.content_types.clone(),
            categories: preferences.categories.clone(),
            interests: preferences.interests.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.categories.is_empty() && self.interests.is_empty()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if !self.content_types.is_empty() && !self.content_types.contains(&item.content_type) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&item.category) {
            return false;
        }

        if !self.interests.is_empty() {
            let text = item.combined_text().to_lowercase();
            if !self
                .interests
                .iter()
                .any(|interest| text.contains(&interest.to_lowercase()))
            {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, items: Vec<Item>) -> Vec<Item> {
        if self.is_empty() {
            return items;
        }

        let total = items.len();
        let filtered: Vec<Item> = items.into_iter().filter(|item| self.matches(item)).collect();
        debug!("Preference filter kept {}/{} items", filtered.len(), total);

        filtered
    }
}
