//! Syndication-feed headline source.
//!
//! Fetches an RSS document and extracts every item title in document order.
//! An empty feed is a valid, empty result; fetch and parse failures both
//! collapse into [`TesseraError::News`] with the underlying message attached.
use async_trait::async_trait;
use tessera_common::{Result, TesseraError};
use tessera_http::{HttpClient, RequestOpts};

/// Google News front-page RSS, US English edition.
pub const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en";

/// Anything that can produce an ordered list of current headlines.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self) -> Result<Vec<String>>;
}

pub struct RssHeadlineClient {
    client: HttpClient,
    url: String,
}

impl RssHeadlineClient {
    /// Client for the default Google News feed.
    pub fn new() -> Result<Self> {
        Self::with_url(GOOGLE_NEWS_RSS)
    }

    pub fn with_url(url: &str) -> Result<Self> {
        let client = HttpClient::new(url)
            .map_err(|e| TesseraError::News(format!("HttpClient init failed: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl HeadlineSource for RssHeadlineClient {
    async fn fetch_headlines(&self) -> Result<Vec<String>> {
        let body = self
            .client
            .get_bytes(
                &self.url,
                RequestOpts {
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| TesseraError::News(format!("feed fetch failed: {e}")))?;

        let headlines = parse_headlines(&body)?;
        tracing::debug!(count = headlines.len(), "news.headlines");
        Ok(headlines)
    }
}

/// Extract item titles from an RSS/Atom document, preserving feed order.
pub fn parse_headlines(body: &[u8]) -> Result<Vec<String>> {
    let feed = feed_rs::parser::parse(body)
        .map_err(|e| TesseraError::News(format!("feed parse failed: {e}")))?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .collect())
}
