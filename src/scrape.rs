// src/scrape.rs
//! Library boundary used by a UI (or the CLI).
//!
//! The plain `fetch_*` functions never return an error: a transport failure,
//! a bad status or an empty input degrades to "nothing found" (an empty list,
//! or a `TabDocument` with every field at its sentinel) and is logged. The
//! `try_fetch_*` variants return the `ScrapeError` for callers that want to
//! tell "no results" from "couldn't ask".

use tracing::{info, warn};

use crate::{
    chords::detect_chords,
    core::net::{tab_host, Fetch, HttpFetcher},
    data::{ChordSpan, SongSummary, TabDocument},
    error::{Result, ScrapeError},
    specs,
    store::Cache,
};

pub fn try_fetch_search_results(fetcher: &dyn Fetch, query: &str) -> Result<Vec<SongSummary>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ScrapeError::EmptyInput("query"));
    }
    specs::search::fetch(fetcher, query)
}

pub fn try_fetch_tab_document(fetcher: &dyn Fetch, url: &str) -> Result<TabDocument> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScrapeError::EmptyInput("url"));
    }
    specs::tab::fetch(fetcher, &tab_host(url))
}

pub fn fetch_search_results_with(fetcher: &dyn Fetch, query: &str) -> Vec<SongSummary> {
    try_fetch_search_results(fetcher, query).unwrap_or_else(|e| {
        warn!("Search {query:?} failed: {e}");
        Vec::new()
    })
}

pub fn fetch_tab_document_with(fetcher: &dyn Fetch, url: &str) -> TabDocument {
    try_fetch_tab_document(fetcher, url).unwrap_or_else(|e| {
        warn!("Tab {url:?} failed: {e}");
        TabDocument::default()
    })
}

/// Search the mirror over HTTP.
pub fn fetch_search_results(query: &str) -> Vec<SongSummary> {
    fetch_search_results_with(&HttpFetcher::new(), query)
}

/// Fetch and parse one tab page over HTTP.
pub fn fetch_tab_document(url: &str) -> TabDocument {
    fetch_tab_document_with(&HttpFetcher::new(), url)
}

/// Search, answering from `cache` when the same query was seen before.
/// Empty result lists are not cached, so a failed search is retried next time.
pub fn search_cached(cache: &mut Cache, fetcher: &dyn Fetch, query: &str) -> Vec<SongSummary> {
    if let Some(hit) = cache.search(query) {
        info!("Search {query:?}: {} results from cache", hit.len());
        return hit.to_vec();
    }
    let songs = fetch_search_results_with(fetcher, query);
    if !songs.is_empty() {
        cache.insert_search(query, songs.clone());
    }
    songs
}

/// Tab lookup through `cache`; failed (all-sentinel) documents aren't stored.
pub fn tab_cached(cache: &mut Cache, fetcher: &dyn Fetch, url: &str) -> TabDocument {
    if let Some(hit) = cache.song(url) {
        info!("Tab {url}: from cache");
        return hit.clone();
    }
    let doc = fetch_tab_document_with(fetcher, url);
    if !doc.is_empty() {
        cache.insert_song(url, doc.clone());
    }
    doc
}

/// A document together with the chord spans of its body, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTab {
    pub doc: TabDocument,
    pub chords: Vec<ChordSpan>,
}

pub fn render_tab(doc: TabDocument) -> RenderedTab {
    let chords = detect_chords(&doc.body);
    RenderedTab { doc, chords }
}
