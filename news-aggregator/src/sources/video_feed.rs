use crate::parser::FeedParser;
use crate::traits::{Normalizer, Transport};
use crate::types::{ContentType, Item, Result, Source};
use async_trait::async_trait;
use feed_rs::model::Feed;
use tracing::warn;

/// Video platform channel feeds (Atom with a `media:group` per entry).
pub struct VideoNormalizer;

impl VideoNormalizer {
    pub fn items_from_feed(feed: &Feed, source: &Source) -> Vec<Item> {
        feed.entries
            .iter()
            .filter_map(|entry| {
                let title = FeedParser::title(entry);
                let link = FeedParser::link(entry)?;
                if title.is_empty() {
                    return None;
                }

                let description = FeedParser::media_description(entry)
                    .unwrap_or_else(|| FeedParser::description(entry));

                let mut item = Item::from_source(
                    source,
                    title,
                    link.clone(),
                    description,
                    FeedParser::published_or_now(entry),
                );
                item.thumbnail = FeedParser::media_thumbnail(entry);
                item.video_url = Some(link);

                Some(item)
            })
            .collect()
    }
}

#[async_trait]
impl Normalizer for VideoNormalizer {
    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    async fn normalize(&self, source: &Source, transport: &dyn Transport) -> Result<Vec<Item>> {
        let body = transport.get(&source.url, &[]).await?;
        let feed = FeedParser::parse_feed(&body)?;

        let items = Self::items_from_feed(&feed, source);
        if items.is_empty() {
            warn!("No items found in video feed from {}", source.name);
        }

        Ok(items)
    }
}
