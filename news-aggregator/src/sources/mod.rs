pub mod api_feed;
pub mod podcast_feed;
pub mod rss_feed;
pub mod video_feed;

pub use api_feed::ApiNormalizer;
pub use podcast_feed::PodcastNormalizer;
pub use rss_feed::RssNormalizer;
pub use video_feed::VideoNormalizer;

use crate::traits::Normalizer;
use crate::types::ContentType;
use std::collections::HashMap;
use std::sync::Arc;

/// Headers most syndication servers expect before they hand out XML.
pub(crate) fn feed_headers() -> Vec<(&'static str, String)> {
    vec![(
        "Accept",
        "application/rss+xml, application/xml, application/atom+xml, text/xml".to_string(),
    )]
}

/// Maps each content type to the normalizer that reads it.
#[derive(Clone)]
pub struct NormalizerRegistry {
    normalizers: HashMap<ContentType, Arc<dyn Normalizer>>,
}

impl NormalizerRegistry {
    pub fn empty() -> Self {
        Self {
            normalizers: HashMap::new(),
        }
    }

    pub fn register(&mut self, normalizer: Arc<dyn Normalizer>) {
        self.normalizers.insert(normalizer.content_type(), normalizer);
    }

    pub fn get(&self, content_type: &ContentType) -> Option<Arc<dyn Normalizer>> {
        self.normalizers.get(content_type).cloned()
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(RssNormalizer));
        registry.register(Arc::new(VideoNormalizer));
        registry.register(Arc::new(PodcastNormalizer));
        registry.register(Arc::new(ApiNormalizer));
        registry
    }
}
