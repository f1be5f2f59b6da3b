pub mod types;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod sources;
pub mod tagging;
pub mod filter;
pub mod trending;
pub mod preferences;
pub mod aggregator;
pub mod utils;

pub use types::*;
pub use traits::{Normalizer, Transport};
pub use fetcher::HttpTransport;
pub use parser::FeedParser;
pub use sources::{ApiNormalizer, NormalizerRegistry, PodcastNormalizer, RssNormalizer, VideoNormalizer};
pub use tagging::AutoTagger;
pub use filter::PreferenceFilter;
pub use trending::{trending_topics, TrendingReport, TrendingTopic};
pub use preferences::{JsonFileStore, MemoryStore, Preferences, PreferencesStore};
pub use aggregator::Aggregator;
