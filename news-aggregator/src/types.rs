use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Kind of content a source publishes. Selects the normalizer used to read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Rss,
    Video,
    Podcast,
    Api,
    /// A declared type no normalizer understands, kept verbatim. Fetching a
    /// source of this type fails for that source only.
    Unsupported(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Rss => "rss",
            ContentType::Video => "video",
            ContentType::Podcast => "podcast",
            ContentType::Api => "api",
            ContentType::Unsupported(name) => name,
        }
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "rss" | "syndication" | "article" => ContentType::Rss,
            "video" => ContentType::Video,
            "podcast" | "audio" => ContentType::Podcast,
            "api" => ContentType::Api,
            _ => ContentType::Unsupported(value.to_string()),
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        ContentType::from(value.as_str())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured external feed or API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl Source {
    pub fn new(name: &str, url: &str, category: &str, content_type: ContentType) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
            content_type,
            api_key: None,
            enabled: true,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Region,
    Language,
    Topic,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
    pub category: TagCategory,
}

impl Tag {
    pub fn new(id: &str, name: &str, color: &str, category: TagCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            category,
        }
    }
}

/// Manual tag assignment for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTag {
    pub news_id: String,
    pub tag_id: String,
}

/// Canonical content record produced by the normalize + tag pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: DateTime<Utc>,
    pub source: String,
    pub category: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
}

impl Item {
    /// Builds an untagged item carrying the source's name, category and type.
    /// The id stays empty until the orchestrator assigns it.
    pub fn from_source(
        source: &Source,
        title: String,
        link: String,
        description: String,
        published: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            title,
            link,
            description,
            published,
            source: source.name.clone(),
            category: source.category.clone(),
            content_type: source.content_type.clone(),
            thumbnail: None,
            duration: None,
            audio_url: None,
            video_url: None,
            tags: Vec::new(),
            region: String::new(),
            language: String::new(),
        }
    }

    /// Title and description joined the way every text heuristic reads them.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Stable identity of an item: hex SHA-256 over title, link and source name.
/// Each field is length-prefixed so shifting bytes between fields changes
/// the digest.
pub fn content_id(title: &str, link: &str, source: &str) -> String {
    let mut hasher = Sha256::new();
    for field in [title, link, source] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; NewsReader/1.0)".to_string(),
            timeout_seconds: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("API key not found for {source_name}")]
    MissingCredential { source_name: String },

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Invalid preferences: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
