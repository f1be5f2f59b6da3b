use crate::filter::PreferenceFilter;
use crate::preferences::{Preferences, PreferencesStore};
use crate::sources::NormalizerRegistry;
use crate::tagging::{new_user_tag, system_tags, AutoTagger};
use crate::traits::Transport;
use crate::trending::TrendingReport;
use crate::types::{content_id, AggregatorError, Item, Result, Source, Tag};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Most recent items per source name.
type ItemCache = HashMap<String, Vec<Item>>;

/// Owns the active preferences and the per-source item cache, and runs
/// fetch cycles over the enabled sources.
pub struct Aggregator {
    store: Arc<dyn PreferencesStore>,
    preferences: RwLock<Preferences>,
    cache: Arc<RwLock<ItemCache>>,
    transport: Arc<dyn Transport>,
    registry: Arc<NormalizerRegistry>,
}

impl Aggregator {
    pub async fn new(store: Arc<dyn PreferencesStore>, transport: Arc<dyn Transport>) -> Result<Self> {
        let preferences = store.load().await?;

        Ok(Self {
            store,
            preferences: RwLock::new(preferences),
            cache: Arc::new(RwLock::new(HashMap::new())),
            transport,
            registry: Arc::new(NormalizerRegistry::default()),
        })
    }

    pub fn with_registry(mut self, registry: NormalizerRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Run one fetch cycle: every enabled source is fetched, normalized and
    /// tagged concurrently. A failing source is logged and keeps whatever
    /// the previous cycle cached for it. Returns the merged cache once every
    /// source has finished.
    pub async fn fetch_all(&self) -> Vec<Item> {
        let (sources, tagger) = {
            let preferences = self.preferences.read().await;
            (
                preferences.enabled_sources(),
                Arc::new(AutoTagger::new(preferences.tags.clone())),
            )
        };

        info!("Fetching {} enabled sources", sources.len());

        let mut tasks = JoinSet::new();
        for source in sources {
            let registry = self.registry.clone();
            let transport = self.transport.clone();
            let cache = self.cache.clone();
            let tagger = tagger.clone();

            tasks.spawn(async move {
                let result = fetch_source(&source, &registry, transport.as_ref(), &tagger).await;
                match result {
                    Ok(items) => {
                        let count = items.len();
                        cache.write().await.insert(source.name.clone(), items);
                        debug!("Cached {} items from {}", count, source.name);
                        Ok(count)
                    }
                    Err(e) => {
                        warn!("Fetch error for {}: {}", source.name, e);
                        Err(e)
                    }
                }
            });
        }

        let mut successful = 0;
        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(_)) => successful += 1,
                Ok(Err(_)) => failed += 1,
                Err(e) => {
                    error!("Source fetch task failed: {}", e);
                    failed += 1;
                }
            }
        }

        info!("Fetch cycle finished: {} succeeded, {} failed", successful, failed);
        self.cached_items().await
    }

    /// Fetch cycle followed by the active preference filter.
    pub async fn fetch_filtered(&self) -> Vec<Item> {
        let items = self.fetch_all().await;
        self.filter_items(items).await
    }

    /// Everything currently cached, without fetching.
    pub async fn cached_items(&self) -> Vec<Item> {
        let cache = self.cache.read().await;
        cache.values().flat_map(|items| items.iter().cloned()).collect()
    }

    pub async fn cached_sources(&self) -> Vec<String> {
        let cache = self.cache.read().await;
        let mut names: Vec<String> = cache.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn filter_items(&self, items: Vec<Item>) -> Vec<Item> {
        let filter = PreferenceFilter::from_preferences(&*self.preferences.read().await);
        filter.apply(items)
    }

    /// Trending topics over the cached items.
    pub async fn trending(&self) -> TrendingReport {
        TrendingReport::from_items(&self.cached_items().await)
    }

    pub async fn preferences(&self) -> Preferences {
        self.preferences.read().await.clone()
    }

    /// Validate, persist, then activate a new preference document.
    pub async fn update_preferences(&self, preferences: Preferences) -> Result<()> {
        preferences.validate()?;

        let mut current = self.preferences.write().await;
        self.store.save(&preferences).await?;
        *current = preferences;

        info!("Preferences updated ({} sources)", current.sources.len());
        Ok(())
    }

    /// System catalog and user-defined tags.
    pub async fn tags(&self) -> (Vec<Tag>, Vec<Tag>) {
        let user_tags = self.preferences.read().await.tags.clone();
        (system_tags().to_vec(), user_tags)
    }

    pub async fn create_tag(&self, name: &str, color: &str) -> Result<Tag> {
        if name.trim().is_empty() {
            return Err(AggregatorError::Config("tag name must not be empty".to_string()));
        }

        let tag = new_user_tag(name, color);

        let mut current = self.preferences.write().await;
        let mut updated = current.clone();
        updated.tags.push(tag.clone());
        self.store.save(&updated).await?;
        *current = updated;

        info!("Created user tag {} ({})", tag.name, tag.id);
        Ok(tag)
    }

    /// Replace the manual tag assignments of one item.
    pub async fn set_item_tags(&self, item_id: &str, tags: &[Tag]) -> Result<()> {
        let mut current = self.preferences.write().await;
        let mut updated = current.clone();
        updated.set_item_tags(item_id, tags);
        self.store.save(&updated).await?;
        *current = updated;

        Ok(())
    }
}

/// One unit of work: normalize a source, then assign ids and tags.
async fn fetch_source(
    source: &Source,
    registry: &NormalizerRegistry,
    transport: &dyn Transport,
    tagger: &AutoTagger,
) -> Result<Vec<Item>> {
    let normalizer = registry
        .get(&source.content_type)
        .ok_or_else(|| AggregatorError::UnsupportedContentType(source.content_type.to_string()))?;

    let mut items = normalizer.normalize(source, transport).await?;

    for item in &mut items {
        item.id = content_id(&item.title, &item.link, &item.source);
        tagger.tag(item);
    }

    Ok(items)
}
