use chrono::Utc;
use news_aggregator::trending::extract_terms;
use news_aggregator::{
    trending_topics, ContentType, Item, PreferenceFilter, Preferences, Source, TrendingReport,
};

fn item(title: &str, description: &str, category: &str, content_type: ContentType) -> Item {
    let source = Source::new("Example", "https://example.com/feed", category, content_type);
    Item::from_source(
        &source,
        title.to_string(),
        format!("https://example.com/{}", title.len()),
        description.to_string(),
        Utc::now(),
    )
}

fn sample_items() -> Vec<Item> {
    vec![
        item("Rust 2.0 released", "Systems programming news", "Technology", ContentType::Rss),
        item("Cup final tonight", "Football fans gather", "Sports", ContentType::Video),
        item("Markets calm", "Investors watch rust belt factories", "Business", ContentType::Api),
        item("Deep sea science", "A podcast on ocean research", "Science", ContentType::Podcast),
    ]
}

fn titles(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.title.as_str()).collect()
}

#[test]
fn empty_filter_is_identity() {
    let filter = PreferenceFilter::default();
    assert!(filter.is_empty());

    let items = sample_items();
    assert_eq!(filter.apply(items.clone()), items);
}

#[test]
fn default_preferences_do_not_filter() {
    let filter = PreferenceFilter::from_preferences(&Preferences::with_default_sources());
    assert!(filter.is_empty());
    assert_eq!(filter.apply(sample_items()).len(), 4);
}

#[test]
fn content_type_dimension() {
    let filter = PreferenceFilter {
        content_types: vec![ContentType::Video, ContentType::Podcast],
        ..Default::default()
    };

    let kept = filter.apply(sample_items());
    assert_eq!(titles(&kept), vec!["Cup final tonight", "Deep sea science"]);
}

#[test]
fn category_dimension_is_exact() {
    let filter = PreferenceFilter {
        categories: vec!["Technology".to_string(), "science".to_string()],
        ..Default::default()
    };

    let kept = filter.apply(sample_items());
    assert_eq!(titles(&kept), vec!["Rust 2.0 released"]);
}

#[test]
fn interest_dimension_is_case_insensitive_substring() {
    let filter = PreferenceFilter {
        interests: vec!["RUST".to_string()],
        ..Default::default()
    };

    let kept = filter.apply(sample_items());
    assert_eq!(titles(&kept), vec!["Rust 2.0 released", "Markets calm"]);
}

#[test]
fn dimensions_combine_with_and() {
    let filter = PreferenceFilter {
        content_types: vec![ContentType::Rss, ContentType::Api],
        categories: vec!["Business".to_string()],
        interests: vec!["rust".to_string(), "ocean".to_string()],
    };

    let kept = filter.apply(sample_items());
    assert_eq!(titles(&kept), vec!["Markets calm"]);
}

#[test]
fn filtering_is_idempotent() {
    let filter = PreferenceFilter {
        interests: vec!["rust".to_string()],
        ..Default::default()
    };

    let once = filter.apply(sample_items());
    let twice = filter.apply(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn terms_skip_short_stop_and_numeric_words() {
    let terms = extract_terms("Officials said covid19 cases fell (again) in Brazil.");

    assert!(terms.contains(&"officials".to_string()));
    assert!(terms.contains(&"cases".to_string()));
    assert!(terms.contains(&"brazil".to_string()));
    assert!(!terms.contains(&"said".to_string()));
    assert!(!terms.contains(&"covid19".to_string()));
    assert!(!terms.iter().any(|t| t.contains('(') || t.contains('.')));
}

#[test]
fn bigrams_need_two_significant_neighbours() {
    let terms = extract_terms("Climate policy shifts in Europe");

    assert!(terms.contains(&"climate policy".to_string()));
    assert!(terms.contains(&"policy shifts".to_string()));
    assert!(!terms.contains(&"shifts in".to_string()));
    assert!(!terms.contains(&"in europe".to_string()));
}

#[test]
fn title_terms_weigh_double() {
    let items = vec![item(
        "Artificial intelligence breakthrough",
        "artificial systems",
        "Technology",
        ContentType::Rss,
    )];

    let topics = trending_topics(&items);
    let ranked: Vec<(&str, u32)> = topics.iter().map(|t| (t.topic.as_str(), t.frequency)).collect();

    assert_eq!(
        ranked,
        vec![
            ("artificial", 3),
            ("artificial intelligence", 2),
            ("breakthrough", 2),
            ("intelligence", 2),
            ("intelligence breakthrough", 2),
        ]
    );
}

#[test]
fn title_and_description_occurrences_accumulate() {
    let items = vec![
        item("Artificial Intelligence", "", "Technology", ContentType::Rss),
        item("", "Artificial Intelligence", "Technology", ContentType::Rss),
    ];

    let topics = trending_topics(&items);
    let artificial = topics.iter().find(|t| t.topic == "artificial").unwrap();
    let phrase = topics
        .iter()
        .find(|t| t.topic == "artificial intelligence")
        .unwrap();

    assert_eq!(artificial.frequency, 3);
    assert_eq!(phrase.frequency, 3);
}

#[test]
fn trending_is_capped_and_excludes_singletons() {
    let title = "alpha bravo charlie delta echoes foxtrot golfing hotel india juliet kilos lima mike november oscar";
    let items = vec![item(title, "papa quebec romeo", "General", ContentType::Rss)];

    let topics = trending_topics(&items);

    assert_eq!(topics.len(), 10);
    assert!(topics.iter().all(|t| t.frequency > 1));
    assert!(topics.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    assert!(!topics.iter().any(|t| t.topic == "papa"));
}

#[test]
fn trending_of_nothing_is_empty() {
    let report = TrendingReport::from_items(&[]);
    assert!(report.topics.is_empty());
    assert_eq!(report.count, 0);
}
