// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! One module per remote page. Each spec knows *where the ground truth lives in
//! the HTML* of its page and how to read it tolerantly.
//!
//! ## What lives here
//! - **Pure HTML parsing**: `parse_doc(&str)` per page, driven by the
//!   `core::html` token stream. Testable offline against saved or synthetic pages.
//! - A thin `fetch(&dyn Fetch, …)` per page that GETs and parses.
//!
//! ## What does **not** live here
//! - **Caching/persistence** (`store`), **error degradation** (`scrape`), and any
//!   display concerns (chord highlighting lives in `chords`).
//!
//! ## Conventions & invariants
//! - Scanner state is a private struct built fresh inside each `parse_doc` call,
//!   so parsing is reentrant.
//! - Malformed markup never errors; fields fall back to their defaults.
//!
//! ## Current specs
//! - `search` – results table → `Vec<SongSummary>`.
//! - `tab` – tab page → `TabDocument` (body already normalized).
pub mod search;
pub mod tab;
