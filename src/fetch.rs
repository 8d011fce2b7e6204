use std::time::Duration;

use scraper::Html;
use tracing::error;
use url::Url;

use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Something that can turn a URL into a parsed page.
pub trait PageSource {
    /// `None` when the page could not be retrieved; the failure is logged here.
    async fn fetch(&self, url: &Url) -> Option<Html>;
}

/// Plain HTTP GET with a browser user agent, a fixed timeout and no retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Option<Html> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                error!(url = %url, error = %e, "An error occurred when getting HTML");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(url = %url, status = %status, "An error occurred when getting HTML");
            return None;
        }

        // Decode as UTF-8 regardless of what the server declares.
        let body = match response.bytes().await {
            Ok(b) => String::from_utf8_lossy(&b).into_owned(),
            Err(e) => {
                error!(url = %url, error = %e, "An error occurred when reading HTML");
                return None;
            }
        };

        Some(Html::parse_document(&body))
    }
}

// ── Tests ──
