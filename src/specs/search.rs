// src/specs/search.rs
//! Scraping *spec* for the search-results page.
//!
//! Purpose:
//! - Parse the **remote HTML** of `search?search_term=…` into an ordered list of
//!   `SongSummary`, one per results-table row.
//! - Cells are identified by their `class` attribute, not by position: the first of
//!   `artist`, `song`, `type`, `rating` found as a substring of the class decides
//!   where a cell's text goes.
//!
//! Row rules:
//! - `<tr>` opens a record, `</tr>` closes it. A record is kept only if some field
//!   was filled (header rows have `<th>` cells and fill nothing) and it has a song
//!   link to open.
//! - Within one cell, the last non-empty text wins.
//! - A rating cell may carry the numeric score in `data-value`; its text is the
//!   display label.
//! - Song links are made absolute against the mirror's base URL.
//!
//! Non-Responsibilities:
//! - **No caching**, no retry. A transport failure is the facade's problem.

use tracing::debug;

use crate::config::consts::{SEARCH_PARAM, SEARCH_PATH, SENTINEL, SITE_BASE};
use crate::core::html::{tokenize, Attrs, Event};
use crate::core::net::{absolutize, Fetch};
use crate::data::SongSummary;
use crate::error::Result;

/// Class substrings, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field { Artist, Song, Kind, Rating }

impl Field {
    fn from_class(class: &str) -> Option<Self> {
        [
            ("artist", Field::Artist),
            ("song", Field::Song),
            ("type", Field::Kind),
            ("rating", Field::Rating),
        ]
        .into_iter()
        .find(|(needle, _)| class.contains(needle))
        .map(|(_, f)| f)
    }
}

#[derive(Default)]
struct RowFields {
    title: Option<String>,
    artist: Option<String>,
    artist_url: Option<String>,
    song_url: Option<String>,
    kind: Option<String>,
    rating: Option<f32>,
    rating_label: Option<String>,
}

impl RowFields {
    fn is_populated(&self) -> bool {
        self.title.is_some()
            || self.artist.is_some()
            || self.artist_url.is_some()
            || self.song_url.is_some()
            || self.kind.is_some()
            || self.rating.is_some()
            || self.rating_label.is_some()
    }

    fn finish(self) -> Option<SongSummary> {
        let song_url = self.song_url?;
        Some(SongSummary {
            title: self.title.unwrap_or_else(|| s!(SENTINEL)),
            artist: self.artist,
            artist_url: self.artist_url,
            song_url,
            kind: self.kind,
            rating: self.rating,
            rating_label: self.rating_label,
        })
    }
}

/// Per-call scanner state. Never outlives one `parse_doc`.
#[derive(Default)]
struct SearchState {
    in_row: bool,
    /// Field selected by the open cell's class; `None` outside cells or
    /// for cells we don't read.
    cell: Option<Field>,
    in_cell: bool,
    row: RowFields,
    songs: Vec<SongSummary>,
}

impl SearchState {
    fn start_tag(&mut self, name: &str, attrs: &Attrs) {
        match name {
            "tr" => {
                // A missing </tr> must not swallow the previous row.
                if self.in_row {
                    self.end_row();
                }
                self.in_row = true;
                self.row = RowFields::default();
            }
            "td" => {
                self.in_cell = true;
                self.cell = attrs.get("class").and_then(Field::from_class);
                if self.cell == Some(Field::Rating) {
                    if let Some(v) = attrs.get("data-value") {
                        self.row.rating = v.trim().parse::<f32>().ok();
                    }
                }
            }
            "a" if self.in_cell => {
                let href = attrs.get("href").unwrap_or("");
                match self.cell {
                    Some(Field::Artist) => self.row.artist_url = Some(s!(href)),
                    Some(Field::Song) if !href.is_empty() => self.row.song_url = Some(absolutize(href)),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "td" => {
                self.in_cell = false;
                self.cell = None;
            }
            "tr" if self.in_row => self.end_row(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !self.in_row || !self.in_cell {
            return;
        }
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let slot = match self.cell {
            Some(Field::Artist) => &mut self.row.artist,
            Some(Field::Song) => &mut self.row.title,
            Some(Field::Kind) => &mut self.row.kind,
            Some(Field::Rating) => &mut self.row.rating_label,
            None => return,
        };
        *slot = Some(s!(text));
    }

    fn end_row(&mut self) {
        self.in_row = false;
        self.in_cell = false;
        self.cell = None;
        let row = std::mem::take(&mut self.row);
        if !row.is_populated() {
            return;
        }
        match row.finish() {
            Some(song) => self.songs.push(song),
            None => debug!("Search: dropped row without a song link"),
        }
    }
}

/// Split out for unit tests.
pub fn parse_doc(html_doc: &str) -> Vec<SongSummary> {
    let mut st = SearchState::default();
    for ev in tokenize(html_doc) {
        match ev {
            Event::StartTag { name, attrs, .. } => st.start_tag(&name, &attrs),
            Event::EndTag { name, .. } => st.end_tag(&name),
            Event::Text { text, .. } => st.text(&text),
        }
    }
    // Unclosed last row at EOF.
    if st.in_row {
        st.end_row();
    }
    st.songs
}

pub fn search_url() -> String {
    join!(SITE_BASE, SEARCH_PATH)
}

pub fn fetch(fetcher: &dyn Fetch, query: &str) -> Result<Vec<SongSummary>> {
    let html_doc = fetcher.get(&search_url(), &[(SEARCH_PARAM, query)])?;
    let t = std::time::Instant::now();
    let out = parse_doc(&html_doc);
    debug!("Search: parsed {} rows for {query:?} in {:?}", out.len(), t.elapsed());
    Ok(out)
}
