//! Job-offer fetching: turns a job-offer URL into plain text for the prompt.
//!
//! Best-effort by contract: every failure path logs and yields an empty string,
//! which downstream treats as "no job offer".
//!
//! `AppState` holds an `Arc<dyn JobOfferFetcher>` so tests can swap in a fixed text.

pub mod html;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::job_offer::html::{compact_ws, indeed_sections, visible_text};

/// Scraped text beyond this many chars is dropped.
pub const MAX_SCRAPED_CHARS: usize = 50_000;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Markers of a bot wall returned instead of the page.
const BLOCKED_MARKERS: &[&str] = &["Unavailable For Legal Reasons", "Just a moment..."];

const MIN_READER_CHARS: usize = 100;
const MIN_INDEED_READER_CHARS: usize = 500;

#[async_trait]
pub trait JobOfferFetcher: Send + Sync {
    /// Returns the job-offer text, or an empty string when nothing usable was found.
    async fn fetch(&self, url: &str) -> String;
}

/// Fetcher backed by a reader proxy, falling back to a direct fetch and local
/// HTML extraction.
pub struct ReaderFetcher {
    client: Client,
    reader_base_url: String,
}

impl ReaderFetcher {
    pub fn new(reader_base_url: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .user_agent(BROWSER_USER_AGENT)
                .build()?,
            reader_base_url,
        })
    }

    async fn via_reader(&self, url: &str, is_indeed: bool) -> Option<String> {
        let reader_url = format!("{}{url}", self.reader_base_url);
        let response = match self.client.get(&reader_url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!("Reader returned {} for {url}", r.status());
                return None;
            }
            Err(e) => {
                warn!("Reader request failed for {url}: {e}");
                return None;
            }
        };

        let text = response.text().await.ok()?;
        if reader_text_usable(&text, is_indeed) {
            Some(text)
        } else {
            warn!("Reader blocked or returned incomplete content for {url}. Falling back.");
            None
        }
    }

    async fn via_direct_fetch(&self, url: &str, is_indeed: bool) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Direct fetch failed for {url}: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            if matches!(status, StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED) {
                warn!("Direct fetch of {url} refused with {status}; page likely needs a browser");
            } else {
                warn!("Direct fetch of {url} failed with {status}");
            }
            return None;
        }

        let body = response.text().await.ok()?;

        if is_indeed {
            if let Some(sections) = indeed_sections(&body) {
                info!("Indeed extraction succeeded for {url}");
                return Some(sections);
            }
        }

        let text = visible_text(&body);
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl JobOfferFetcher for ReaderFetcher {
    async fn fetch(&self, url: &str) -> String {
        let is_indeed = url.contains("indeed.com");

        if let Some(text) = self.via_reader(url, is_indeed).await {
            return truncate_chars(&text, MAX_SCRAPED_CHARS);
        }

        match self.via_direct_fetch(url, is_indeed).await {
            Some(text) => truncate_chars(&text, MAX_SCRAPED_CHARS),
            None => {
                warn!("No job-offer content could be retrieved from {url}");
                String::new()
            }
        }
    }
}

/// Fetcher that always returns the same text.
#[cfg(test)]
pub struct StaticFetcher(pub String);

#[cfg(test)]
#[async_trait]
impl JobOfferFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> String {
        self.0.clone()
    }
}

fn reader_text_usable(text: &str, is_indeed: bool) -> bool {
    let blocked = BLOCKED_MARKERS.iter().any(|marker| text.contains(marker))
        || (is_indeed && text.len() < MIN_INDEED_READER_CHARS);
    !blocked && text.len() > MIN_READER_CHARS
}

fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Normalizes a user-supplied URL, rejecting anything that is not http(s).
pub fn normalize_job_url(raw: &str) -> Option<String> {
    let url = compact_ws(raw);
    if url.is_empty() || url.contains(' ') {
        return None;
    }
    let lower = url.to_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then_some(url)
}
