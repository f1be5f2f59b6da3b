use super::feed_headers;
use super::rss_feed::RssNormalizer;
use crate::parser::FeedParser;
use crate::traits::{Normalizer, Transport};
use crate::types::{ContentType, Item, Result, Source};
use async_trait::async_trait;
use feed_rs::model::Feed;
use tracing::warn;

/// Podcast feeds: RSS plus enclosure and iTunes metadata.
pub struct PodcastNormalizer;

impl PodcastNormalizer {
    pub fn items_from_feed(feed: &Feed, source: &Source) -> Vec<Item> {
        let feed_image = FeedParser::feed_image(feed);

        feed.entries
            .iter()
            .filter_map(|entry| {
                let mut item = RssNormalizer::item_from_entry(entry, source)?;
                item.audio_url = FeedParser::enclosure_url(entry);
                item.duration = FeedParser::duration(entry);
                item.thumbnail = FeedParser::media_thumbnail(entry).or_else(|| feed_image.clone());
                Some(item)
            })
            .collect()
    }
}

#[async_trait]
impl Normalizer for PodcastNormalizer {
    fn content_type(&self) -> ContentType {
        ContentType::Podcast
    }

    async fn normalize(&self, source: &Source, transport: &dyn Transport) -> Result<Vec<Item>> {
        let body = transport.get(&source.url, &feed_headers()).await?;
        let feed = FeedParser::parse_feed(&body)?;

        let items = Self::items_from_feed(&feed, source);
        if items.is_empty() {
            warn!("No items found in podcast feed from {}", source.name);
        }

        Ok(items)
    }
}
