use super::feed_headers;
use crate::parser::FeedParser;
use crate::traits::{Normalizer, Transport};
use crate::types::{ContentType, Item, Result, Source};
use async_trait::async_trait;
use feed_rs::model::{Entry, Feed};
use tracing::{debug, warn};

/// Generic RSS / Atom article feeds.
pub struct RssNormalizer;

impl RssNormalizer {
    pub fn items_from_feed(feed: &Feed, source: &Source) -> Vec<Item> {
        feed.entries
            .iter()
            .filter_map(|entry| Self::item_from_entry(entry, source))
            .collect()
    }

    pub(crate) fn item_from_entry(entry: &Entry, source: &Source) -> Option<Item> {
        let Some(link) = FeedParser::link(entry) else {
            debug!("Skipping entry without link in {}", source.name);
            return None;
        };

        let mut item = Item::from_source(
            source,
            FeedParser::title(entry),
            link,
            FeedParser::description(entry),
            FeedParser::published_or_now(entry),
        );
        item.thumbnail = FeedParser::thumbnail(entry);

        Some(item)
    }
}

#[async_trait]
impl Normalizer for RssNormalizer {
    fn content_type(&self) -> ContentType {
        ContentType::Rss
    }

    async fn normalize(&self, source: &Source, transport: &dyn Transport) -> Result<Vec<Item>> {
        let body = transport.get(&source.url, &feed_headers()).await?;
        let feed = FeedParser::parse_feed(&body)?;

        let items = Self::items_from_feed(&feed, source);
        if items.is_empty() {
            warn!("No items found in feed from {}", source.name);
        }

        Ok(items)
    }
}
