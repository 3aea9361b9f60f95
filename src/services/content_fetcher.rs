//! Page title lookup for bookmarks added without an explicit title.
//!
//! The HTTP fetcher streams the response body and stops reading as soon as a
//! closing `</title>` or `</header>` marker has arrived, so only the head of
//! a page is downloaded.

use std::time::Duration;

use crate::config::Config;
use crate::types::errors::FetchError;

/// Upper bound on bytes read when no closing marker shows up.
pub const MAX_HEAD_BYTES: usize = 1024 * 1024;

const CLOSING_MARKERS: [&str; 2] = ["</title>", "</header>"];

/// Fetches a page and extracts its title.
pub trait ContentFetcher {
    /// `Ok(None)` means the page was downloaded but has no `<title>`.
    fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError>;
}

/// Fetcher backed by `reqwest`, driven on a single-threaded `tokio` runtime.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        Self {
            timeout,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let settings = config.settings();
        Self::new(
            Duration::from_secs(settings.fetch_timeout_secs),
            &settings.user_agent,
        )
    }
}

#[cfg(feature = "network")]
impl HttpFetcher {
    async fn fetch_head(&self, url: &str) -> Result<String, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let response = client.get(url).send().await.map_err(|e| {
            if e.is_builder() {
                FetchError::InvalidUrl(url.to_string())
            } else {
                FetchError::Network(e.to_string())
            }
        })?;
        let mut response = response
            .error_for_status()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let mut head = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?
        {
            let scanned = head.len();
            head.extend_from_slice(&chunk);
            if has_closing_marker(&head, scanned) || head.len() >= MAX_HEAD_BYTES {
                break;
            }
        }
        log::debug!("read {} bytes from {}", head.len(), url);

        Ok(String::from_utf8_lossy(&head).into_owned())
    }
}

#[cfg(feature = "network")]
impl ContentFetcher for HttpFetcher {
    fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FetchError::Runtime(e.to_string()))?;
        let head = runtime.block_on(self.fetch_head(url))?;
        Ok(extract_title(&head))
    }
}

#[cfg(not(feature = "network"))]
impl ContentFetcher for HttpFetcher {
    fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError> {
        Err(FetchError::Network(format!(
            "built without network support, pass a title for {}",
            url
        )))
    }
}

/// Whether the bytes read so far contain a closing title or header tag.
///
/// `head[..scanned]` was already checked, so only the tail is searched, with
/// enough overlap to catch a marker split across two chunks.
pub fn has_closing_marker(head: &[u8], scanned: usize) -> bool {
    let overlap = CLOSING_MARKERS.iter().map(|m| m.len()).max().map_or(0, |len| len - 1);
    let tail = &head[scanned.saturating_sub(overlap).min(head.len())..];
    CLOSING_MARKERS.iter().any(|marker| {
        tail.windows(marker.len())
            .any(|w| w.eq_ignore_ascii_case(marker.as_bytes()))
    })
}

/// Extracts the text of the first `<title>` element.
///
/// Whitespace runs collapse to one space and the common character entities
/// are decoded. Returns `None` when the element is missing or unterminated.
pub fn extract_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_len = lower[content_start..].find("</title>")?;
    let raw = &html[content_start..content_start + content_len];

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    Some(decode_entities(&collapsed))
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
