use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use news_aggregator::utils::{text, url};
use news_aggregator::{
    Aggregator, FetchConfig, HttpTransport, Item, JsonFileStore, Preferences, TrendingReport,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "news-aggregator", about = "Aggregate, tag and filter news feeds")]
struct Cli {
    /// Preferences document (created with defaults when missing)
    #[arg(long, env = "NEWS_PREFS", default_value = "preferences.json")]
    prefs: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch every enabled source and print the items as JSON
    Fetch {
        /// Skip the preference filter
        #[arg(long)]
        unfiltered: bool,
        /// One line per item instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Fetch, then print the trending topics
    Trending,
    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagCommand,
    },
    /// Show or replace the preferences document
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// List system and user tags
    List,
    /// Create a user tag
    Create {
        name: String,
        #[arg(long, default_value = "#607D8B")]
        color: String,
    },
    /// Replace the tags manually assigned to an item
    Assign { item_id: String, tag_ids: Vec<String> },
}

#[derive(Debug, Subcommand)]
enum PrefsCommand {
    Show,
    /// Validate and activate a new preferences document
    Set { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let fetch_config = FetchConfig {
        timeout_seconds: cli.timeout,
        ..FetchConfig::default()
    };
    let transport = Arc::new(HttpTransport::new(fetch_config).context("building HTTP client")?);
    let store = Arc::new(JsonFileStore::new(&cli.prefs));

    let aggregator = Aggregator::new(store, transport)
        .await
        .with_context(|| format!("loading preferences from {}", cli.prefs.display()))?;

    match cli.command {
        Command::Fetch {
            unfiltered,
            summary,
        } => {
            let items = if unfiltered {
                aggregator.fetch_all().await
            } else {
                aggregator.fetch_filtered().await
            };
            info!("Returning {} items", items.len());

            if summary {
                for item in &items {
                    println!("{}", summary_line(item));
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
        }
        Command::Trending => {
            aggregator.fetch_all().await;
            let report: TrendingReport = aggregator.trending().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Tag { action } => match action {
            TagCommand::List => {
                let (system_tags, user_tags) = aggregator.tags().await;
                let listing = serde_json::json!({
                    "systemTags": system_tags,
                    "userTags": user_tags,
                });
                println!("{}", serde_json::to_string_pretty(&listing)?);
            }
            TagCommand::Create { name, color } => {
                let tag = aggregator.create_tag(&name, &color).await?;
                println!("{}", serde_json::to_string_pretty(&tag)?);
            }
            TagCommand::Assign { item_id, tag_ids } => {
                let (system_tags, user_tags) = aggregator.tags().await;
                let mut tags = Vec::new();
                for tag_id in &tag_ids {
                    match system_tags.iter().chain(&user_tags).find(|t| &t.id == tag_id) {
                        Some(tag) => tags.push(tag.clone()),
                        None => bail!("unknown tag id: {}", tag_id),
                    }
                }
                aggregator.set_item_tags(&item_id, &tags).await?;
                println!("{}", serde_json::to_string_pretty(&tags)?);
            }
        },
        Command::Prefs { action } => match action {
            PrefsCommand::Show => {
                let preferences = aggregator.preferences().await;
                println!("{}", preferences.to_json()?);
            }
            PrefsCommand::Set { file } => {
                let data = tokio::fs::read_to_string(&file)
                    .await
                    .with_context(|| format!("reading {}", file.display()))?;
                let preferences = Preferences::from_json(&data)?;
                aggregator.update_preferences(preferences).await?;
                println!("{}", aggregator.preferences().await.to_json()?);
            }
        },
    }

    Ok(())
}

fn summary_line(item: &Item) -> String {
    let domain = url::extract_domain(&item.link).unwrap_or_else(|| item.source.clone());
    format!(
        "{} [{}] {} ({})",
        item.published.format("%Y-%m-%d %H:%M"),
        item.source,
        text::truncate(&item.title, 80),
        domain
    )
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "news_aggregator=info".into());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
