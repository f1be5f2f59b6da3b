#![allow(dead_code)]

use async_trait::async_trait;
use news_aggregator::{AggregatorError, Result, Transport};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use tokio::sync::{Barrier, Notify};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

/// Canned response for one URL.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(Vec<u8>),
    Status(u16),
}

/// Holds a request open until the test releases it.
#[derive(Clone)]
pub enum Gate {
    /// Released once every party sharing the barrier has arrived.
    Barrier(Arc<Barrier>),
    /// Released by `notify_one` from the test.
    Notify(Arc<Notify>),
}

/// In-memory transport: serves canned bodies and records every request.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    gates: Mutex<HashMap<String, Gate>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.set(url, Reply::Body(body.as_bytes().to_vec()));
        self
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.set(url, Reply::Status(status));
        self
    }

    pub fn with_gate(self, url: &str, gate: Gate) -> Self {
        self.gates.lock().unwrap().insert(url.to_string(), gate);
        self
    }

    pub fn set(&self, url: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(url.to_string(), reply);
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn header_for(&self, url: &str, name: &str) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .flat_map(|(_, headers)| headers.iter())
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        ));

        let gate = self.gates.lock().unwrap().get(url).cloned();
        match gate {
            Some(Gate::Barrier(barrier)) => {
                barrier.wait().await;
            }
            Some(Gate::Notify(notify)) => notify.notified().await,
            None => {}
        }

        let reply = self.replies.lock().unwrap().get(url).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(AggregatorError::Status {
                status,
                url: url.to_string(),
            }),
            None => Err(AggregatorError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

pub fn rss_feed(items: &[(&str, &str, &str)]) -> String {
    let body: String = items
        .iter()
        .map(|(title, link, description)| {
            format!(
                "<item><title>{}</title><link>{}</link><description>{}</description>\
                 <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate></item>",
                title, link, description
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
<title>Test Feed</title>
<link>https://example.com</link>
<description>Test feed</description>
{}
</channel>
</rss>"#,
        body
    )
}

pub const RSS_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
<title>Test Feed</title>
<link>https://example.com</link>
<description>Test feed</description>
<item>
  <title>Election results in the United States</title>
  <link>https://example.com/a</link>
  <description>The government announced the results of the election.</description>
  <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
</item>
<item>
  <title>Body only</title>
  <link>https://example.com/b</link>
  <content:encoded><![CDATA[<p>Full body text</p>]]></content:encoded>
</item>
<item>
  <title>No link here</title>
  <description>orphan</description>
</item>
</channel>
</rss>"#;

pub const RSS_MEDIA_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
<channel>
<title>Media Feed</title>
<link>https://media.example.com</link>
<description>Items with images</description>
<item>
  <title>Thumbnail element</title>
  <link>https://media.example.com/a</link>
  <media:thumbnail url="https://media.example.com/img/a.jpg"/>
</item>
<item>
  <title>Image enclosure</title>
  <link>https://media.example.com/b</link>
  <enclosure url="https://media.example.com/img/b.jpg" length="100" type="image/jpeg"/>
</item>
<item>
  <title>Untyped media content</title>
  <link>https://media.example.com/c</link>
  <media:content width="140" url="https://media.example.com/img/c.jpg"/>
</item>
<item>
  <title>Image medium</title>
  <link>https://media.example.com/d</link>
  <media:content medium="image" url="https://media.example.com/img/d.PNG"/>
</item>
<item>
  <title>No image</title>
  <link>https://media.example.com/e</link>
  <media:content url="https://media.example.com/clip.mp4" type="video/mp4"/>
</item>
</channel>
</rss>"#;

pub const VIDEO_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns:media="http://search.yahoo.com/mrss/" xmlns="http://www.w3.org/2005/Atom">
 <id>yt:channel:test</id>
 <title>Test Channel</title>
 <updated>2025-01-05T12:00:00+00:00</updated>
 <entry>
  <id>yt:video:abc</id>
  <yt:videoId>abc</yt:videoId>
  <title>Climate summit highlights</title>
  <link rel="alternate" href="https://www.youtube.com/watch?v=abc"/>
  <published>2025-01-05T12:00:00+00:00</published>
  <updated>2025-01-05T12:30:00+00:00</updated>
  <media:group>
   <media:title>Climate summit highlights</media:title>
   <media:content url="https://www.youtube.com/v/abc" type="application/x-shockwave-flash" width="640" height="390"/>
   <media:thumbnail url="https://i.ytimg.com/vi/abc/hqdefault.jpg" width="480" height="360"/>
   <media:description>Leaders discuss pollution targets</media:description>
  </media:group>
 </entry>
 <entry>
  <id>yt:video:def</id>
  <title></title>
  <link rel="alternate" href="https://www.youtube.com/watch?v=def"/>
  <published>2025-01-04T12:00:00+00:00</published>
  <updated>2025-01-04T12:00:00+00:00</updated>
 </entry>
</feed>"#;

pub const PODCAST_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
<channel>
<title>Test Podcast</title>
<link>https://pod.example.com</link>
<description>A podcast</description>
<image>
  <url>https://pod.example.com/cover.jpg</url>
  <title>Test Podcast</title>
  <link>https://pod.example.com</link>
</image>
<item>
  <title>Episode 1</title>
  <link>https://pod.example.com/1</link>
  <description>A talk about new research</description>
  <pubDate>Tue, 07 Jan 2025 08:00:00 GMT</pubDate>
  <enclosure url="https://pod.example.com/1.mp3" length="1000" type="audio/mpeg"/>
</item>
<item>
  <title>Episode 2</title>
  <link>https://pod.example.com/2</link>
  <description>An interview about the economy</description>
  <pubDate>Tue, 14 Jan 2025 08:00:00 GMT</pubDate>
  <enclosure url="https://pod.example.com/2.mp3" length="2000" type="audio/mpeg"/>
  <itunes:duration>1:02:03</itunes:duration>
  <itunes:image href="https://pod.example.com/ep2.jpg"/>
</item>
</channel>
</rss>"#;

pub const API_FIXTURE: &str = r#"{
  "status": "ok",
  "articles": [
    {
      "title": "Stock market rallies",
      "url": "https://api.example.com/stocks",
      "description": "Trade optimism lifts the financial sector",
      "publishedAt": "2025-01-06T09:30:00Z",
      "urlToImage": "https://api.example.com/stocks.jpg"
    },
    {
      "title": "",
      "url": "https://api.example.com/untitled"
    },
    {
      "title": "Missing link"
    },
    {
      "title": "Odd timestamp",
      "url": "https://api.example.com/odd",
      "publishedAt": "yesterday"
    }
  ]
}"#;
