// src/error.rs
//! Error type shared by the fetch layer and the local store.
//!
//! Parsing never fails: malformed markup degrades to sentinel fields.
//! Only I/O (network, disk) and JSON decoding produce a `ScrapeError`,
//! and the public fetch boundaries in `scrape` swallow those too.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// DNS, connect, timeout, TLS or a broken body stream.
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Server answered, but not with a success status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Empty query or URL; nothing was requested.
    #[error("empty {0}")]
    EmptyInput(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => ScrapeError::Http { status, url: s!(url) },
            ureq::Error::Transport(t) => ScrapeError::Transport { url: s!(url), message: t.to_string() },
        }
    }

    /// Transport and HTTP failures; the kind the fetch boundaries degrade on.
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Transport { .. } | ScrapeError::Http { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
