//! Trending terms and two-word phrases across a set of items.

use crate::types::Item;
use crate::utils::{clean_token, contains_digit, is_significant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_TRENDING_TOPICS: usize = 10;
const TITLE_WEIGHT: u32 = 2;
const DESCRIPTION_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub frequency: u32,
}

/// Trending topics stamped with the time they were computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingReport {
    pub topics: Vec<TrendingTopic>,
    pub count: usize,
    pub time: DateTime<Utc>,
}

impl TrendingReport {
    pub fn from_items(items: &[Item]) -> Self {
        let topics = trending_topics(items);
        Self {
            count: topics.len(),
            topics,
            time: Utc::now(),
        }
    }
}

/// Candidate terms of one text: significant single words followed by
/// bigrams of adjacent tokens whose halves are both significant.
pub fn extract_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().map(clean_token).collect();

    let mut terms: Vec<String> = words
        .iter()
        .filter(|word| is_significant(word) && !contains_digit(word))
        .map(|word| word.to_string())
        .collect();

    terms.extend(
        words
            .windows(2)
            .filter(|pair| is_significant(pair[0]) && is_significant(pair[1]))
            .map(|pair| format!("{} {}", pair[0], pair[1])),
    );

    terms
}

/// Up to ten terms with weighted frequency above one, most frequent first.
/// Equal frequencies are ordered alphabetically.
pub fn trending_topics(items: &[Item]) -> Vec<TrendingTopic> {
    let mut frequency: HashMap<String, u32> = HashMap::new();

    for item in items {
        for term in extract_terms(&item.title) {
            *frequency.entry(term).or_insert(0) += TITLE_WEIGHT;
        }
        for term in extract_terms(&item.description) {
            *frequency.entry(term).or_insert(0) += DESCRIPTION_WEIGHT;
        }
    }

    let mut topics: Vec<TrendingTopic> = frequency
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(topic, frequency)| TrendingTopic { topic, frequency })
        .collect();

    topics.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.topic.cmp(&b.topic)));
    topics.truncate(MAX_TRENDING_TOPICS);

    topics
}
