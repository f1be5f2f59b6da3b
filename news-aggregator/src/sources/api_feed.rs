use crate::traits::{Normalizer, Transport};
use crate::types::{AggregatorError, ContentType, Item, Result, Source};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Authenticated JSON news APIs returning an `articles` array.
pub struct ApiNormalizer;

#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    url_to_image: Option<String>,
}

impl ApiNormalizer {
    pub fn items_from_body(body: &[u8], source: &Source) -> Result<Vec<Item>> {
        let response: ArticlesResponse = serde_json::from_slice(body).map_err(|e| {
            AggregatorError::Decode(format!("error decoding response from {}: {}", source.name, e))
        })?;

        let items = response
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title.filter(|t| !t.is_empty())?;
                let link = article.url.filter(|u| !u.is_empty())?;

                let published = article
                    .published_at
                    .as_deref()
                    .and_then(|p| DateTime::parse_from_rfc3339(p).ok())
                    .map(|p| p.with_timezone(&Utc))
                    .unwrap_or_else(Utc::now);

                let mut item = Item::from_source(
                    source,
                    title,
                    link,
                    article.description.unwrap_or_default(),
                    published,
                );
                item.thumbnail = article.url_to_image.filter(|u| !u.is_empty());

                Some(item)
            })
            .collect();

        Ok(items)
    }
}

#[async_trait]
impl Normalizer for ApiNormalizer {
    fn content_type(&self) -> ContentType {
        ContentType::Api
    }

    async fn normalize(&self, source: &Source, transport: &dyn Transport) -> Result<Vec<Item>> {
        let api_key = source
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AggregatorError::MissingCredential {
                source_name: source.name.clone(),
            })?;

        let headers = [("Authorization", format!("Bearer {}", api_key))];
        let body = transport.get(&source.url, &headers).await?;

        let items = Self::items_from_body(&body, source)?;
        if items.is_empty() {
            warn!("No items found in API response from {}", source.name);
        }

        Ok(items)
    }
}
