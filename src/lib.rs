// src/lib.rs
//! Guitar tab scraper: find tab pages on a mirror site, pull song metadata and
//! the tablature text out of loosely structured HTML, clean that text up, and
//! mark the chord names in it.
//!
//! Pipeline: raw HTML → `core::html` tokens → `specs::{search, tab}` →
//! `core::sanitize::normalize_body` → `chords::detect_chords`.

#[macro_use]
pub mod macros;

pub mod chords;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod log;
pub mod scrape;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use chords::detect_chords;
pub use crate::core::sanitize::normalize_body;
pub use data::{ChordSpan, DifficultyLevel, SongSummary, TabDocument};
pub use error::ScrapeError;
pub use scrape::{
    fetch_search_results, fetch_tab_document, render_tab, try_fetch_search_results,
    try_fetch_tab_document, RenderedTab,
};
