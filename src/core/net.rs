// src/core/net.rs
// Blocking HTTP GET behind a small trait, so the fetch boundaries can be
// exercised offline with a stub.

use std::time::Duration;

use tracing::debug;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, SITE_BASE, USER_AGENT};
use crate::error::{Result, ScrapeError};

/// Text-or-failure page source.
pub trait Fetch {
    /// GET `url` with `query` pairs appended (percent-encoded by the
    /// implementation) and return the body as text.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self { Self::new() }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let t = std::time::Instant::now();
        let mut req = self.agent.get(url);
        for (k, v) in query {
            req = req.query(k, v);
        }
        let resp = req.call().map_err(|e| ScrapeError::from_ureq(url, e))?;
        let body = resp.into_string().map_err(|e| ScrapeError::Transport {
            url: s!(url),
            message: e.to_string(),
        })?;
        debug!("GET {url} -> {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}

/// Turn a site-relative href into an absolute URL on the mirror.
pub fn absolutize(href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        s!(href)
    } else if let Some(rest) = href.strip_prefix("//") {
        join!("https://", rest)
    } else {
        join!(SITE_BASE.trim_end_matches('/'), "/", href.trim_start_matches('/'))
    }
}

/// Tab links in search results point at `www`; the mirror serves tabs
/// from the `tabs` host.
pub fn tab_host(url: &str) -> String {
    url.replacen("https://www", "https://tabs", 1)
}
