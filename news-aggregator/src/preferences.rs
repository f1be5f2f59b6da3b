use crate::types::{AggregatorError, ContentType, ItemTag, Result, Source, Tag};
use crate::utils::url::is_valid_feed_url;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The user's preference document: sources, filters, credentials and tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub news_tags: Vec<ItemTag>,
}

impl Preferences {
    /// Starter document: a handful of general and technology feeds, no
    /// filtering.
    pub fn with_default_sources() -> Self {
        Self {
            sources: default_sources(),
            ..Default::default()
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let preferences: Preferences = serde_json::from_str(data)
            .map_err(|e| AggregatorError::Config(format!("malformed preferences document: {}", e)))?;
        preferences.validate()?;
        Ok(preferences)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Source names must be present and unique, URLs must be http(s).
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();

        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AggregatorError::Config(format!(
                    "source with URL {} has no name",
                    source.url
                )));
            }
            if !names.insert(source.name.as_str()) {
                return Err(AggregatorError::Config(format!(
                    "duplicate source name: {}",
                    source.name
                )));
            }
            if !is_valid_feed_url(&source.url) {
                return Err(AggregatorError::Config(format!(
                    "invalid URL for source {}: {}",
                    source.name, source.url
                )));
            }
        }

        Ok(())
    }

    /// Enabled sources with their API credential resolved: the source's own
    /// key wins over the document-level `apiKeys` entry.
    pub fn enabled_sources(&self) -> Vec<Source> {
        self.sources
            .iter()
            .filter(|source| source.enabled)
            .map(|source| {
                let mut source = source.clone();
                if source.api_key.as_deref().map_or(true, str::is_empty) {
                    source.api_key = self.api_keys.get(&source.name).cloned();
                }
                source
            })
            .collect()
    }

    /// Replace every manual tag assignment of `item_id` with `tags`.
    pub fn set_item_tags(&mut self, item_id: &str, tags: &[Tag]) {
        self.news_tags.retain(|nt| nt.news_id != item_id);
        self.news_tags.extend(tags.iter().map(|tag| ItemTag {
            news_id: item_id.to_string(),
            tag_id: tag.id.clone(),
        }));
    }
}

pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new("NPR News", "https://feeds.npr.org/1001/rss.xml", "General", ContentType::Rss),
        Source::new(
            "BBC World",
            "http://feeds.bbci.co.uk/news/world/rss.xml",
            "World News",
            ContentType::Rss,
        ),
        Source::new(
            "The Guardian",
            "https://www.theguardian.com/world/rss",
            "World News",
            ContentType::Rss,
        ),
        Source::new("TechCrunch", "https://techcrunch.com/feed/", "Technology", ContentType::Rss),
    ]
}

/// Load / replace access to the persisted preference document.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn load(&self) -> Result<Preferences>;

    async fn save(&self, preferences: &Preferences) -> Result<()>;
}

/// Preferences kept in a pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferencesStore for JsonFileStore {
    async fn load(&self) -> Result<Preferences> {
        if !tokio::fs::try_exists(&self.path).await? {
            info!(
                "No preferences at {}, writing defaults",
                self.path.display()
            );
            let preferences = Preferences::with_default_sources();
            self.save(&preferences).await?;
            return Ok(preferences);
        }

        let data = tokio::fs::read_to_string(&self.path).await?;
        let preferences = Preferences::from_json(&data)?;
        debug!(
            "Loaded preferences from {} ({} sources)",
            self.path.display(),
            preferences.sources.len()
        );

        Ok(preferences)
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, preferences.to_json()?).await?;
        debug!("Saved preferences to {}", self.path.display());

        Ok(())
    }
}

/// In-process store, used by tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    preferences: RwLock<Preferences>,
}

impl MemoryStore {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences: RwLock::new(preferences),
        }
    }
}

#[async_trait]
impl PreferencesStore for MemoryStore {
    async fn load(&self) -> Result<Preferences> {
        Ok(self.preferences.read().await.clone())
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        *self.preferences.write().await = preferences.clone();
        Ok(())
    }
}
