use crate::types::{AggregatorError, Result};
use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Feed, MediaContent};
use feed_rs::parser;
use std::time::Duration;
use tracing::debug;

/// Field extraction shared by the feed-based normalizers.
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &[u8]) -> Result<Feed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        parser::parse(content)
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))
    }

    pub fn title(entry: &Entry) -> String {
        entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default()
    }

    /// The entry's primary link: the first `alternate` (or untyped) link,
    /// otherwise whatever link comes first.
    pub fn link(entry: &Entry) -> Option<String> {
        entry
            .links
            .iter()
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .or_else(|| entry.links.first())
            .map(|l| l.href.trim().to_string())
            .filter(|href| !href.is_empty())
    }

    pub fn published_or_now(entry: &Entry) -> DateTime<Utc> {
        entry.published.or(entry.updated).unwrap_or_else(Utc::now)
    }

    /// Summary text, falling back to the full content body.
    pub fn description(entry: &Entry) -> String {
        let summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.clone())
            .unwrap_or_default();

        if !summary.trim().is_empty() {
            return summary;
        }

        entry
            .content
            .as_ref()
            .and_then(|c| c.body.clone())
            .unwrap_or(summary)
    }

    pub fn media_description(entry: &Entry) -> Option<String> {
        entry
            .media
            .iter()
            .find_map(|m| m.description.as_ref())
            .map(|d| d.content.clone())
            .filter(|d| !d.trim().is_empty())
    }

    /// Explicit thumbnail first, then any media attachment that is an image.
    pub fn thumbnail(entry: &Entry) -> Option<String> {
        Self::media_thumbnail(entry).or_else(|| {
            entry
                .media
                .iter()
                .flat_map(|m| m.content.iter())
                .filter(|c| is_image(c))
                .find_map(|c| c.url.as_ref().map(|u| u.to_string()))
        })
    }

    pub fn media_thumbnail(entry: &Entry) -> Option<String> {
        entry
            .media
            .iter()
            .flat_map(|m| m.thumbnails.iter())
            .map(|t| t.image.uri.trim().to_string())
            .find(|uri| !uri.is_empty())
    }

    /// URL of the first non-image attachment, i.e. the enclosure.
    pub fn enclosure_url(entry: &Entry) -> Option<String> {
        entry
            .media
            .iter()
            .flat_map(|m| m.content.iter())
            .filter(|c| !is_image(c))
            .find_map(|c| c.url.as_ref().map(|u| u.to_string()))
    }

    pub fn duration(entry: &Entry) -> Option<String> {
        entry
            .media
            .iter()
            .find_map(|m| m.duration.or_else(|| m.content.iter().find_map(|c| c.duration)))
            .map(format_duration)
    }

    pub fn feed_image(feed: &Feed) -> Option<String> {
        feed.logo
            .as_ref()
            .or(feed.icon.as_ref())
            .map(|image| image.uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Typed attachments are images when their MIME type says so. Untyped ones
/// (`medium="image"` or no type at all) are judged by the URL's extension.
fn is_image(content: &MediaContent) -> bool {
    match &content.content_type {
        Some(mime) => mime.to_string().starts_with("image/"),
        None => content
            .url
            .as_ref()
            .and_then(|url| url.path().rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()))
            .map_or(false, |ext| IMAGE_EXTENSIONS.contains(&ext.as_str())),
    }
}

/// `H:MM:SS`, or `M:SS` below one hour.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
