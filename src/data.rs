// src/data.rs
//
// Records handed across the library boundary.
//
// - SongSummary: one row of a search-results page.
// - TabDocument: one tab page, metadata + cleaned body. Every text field
//                reads "N/A" when the page didn't provide it.
// - ChordSpan:   a highlighted range in a TabDocument body.
//
// All of them serialize, because the UI keeps favorites and caches on disk.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::consts::SENTINEL;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SongSummary {
    pub title: String,
    pub artist: Option<String>,
    pub artist_url: Option<String>,
    /// Always absolute.
    pub song_url: String,
    /// "Chords", "Tab", "Bass", …
    pub kind: Option<String>,
    pub rating: Option<f32>,
    pub rating_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDocument {
    pub title: String,
    pub artist: String,
    pub tuning: String,
    pub difficulty: String,
    pub capo: String,
    pub kind: String,
    pub source_url: String,
    /// Normalized tablature text; chord spans index into this exact string.
    pub body: String,
}

impl Default for TabDocument {
    fn default() -> Self {
        Self {
            title: s!(SENTINEL),
            artist: s!(SENTINEL),
            tuning: s!(SENTINEL),
            difficulty: s!(SENTINEL),
            capo: s!(SENTINEL),
            kind: s!(SENTINEL),
            source_url: s!(SENTINEL),
            body: s!(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyLevel { Easy, Medium, Hard, Unknown }

impl TabDocument {
    /// Nothing usable was extracted: what a failed fetch degrades to.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.title == SENTINEL && self.artist == SENTINEL
    }

    /// Coarse bucket of the free-form difficulty label.
    pub fn difficulty_level(&self) -> DifficultyLevel {
        let d = self.difficulty.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| d.contains(w));
        if has(&["easy", "novice", "beginner"]) {
            DifficultyLevel::Easy
        } else if has(&["medium", "intermediate"]) {
            DifficultyLevel::Medium
        } else if has(&["hard", "expert"]) {
            DifficultyLevel::Hard
        } else {
            DifficultyLevel::Unknown
        }
    }

    /// One-line metadata summary, as shown above the body.
    pub fn details_line(&self) -> String {
        format!(
            "Tuning: {} | Capo: {} | Difficulty: {} | Type: {}",
            self.tuning, self.capo, self.difficulty, self.kind
        )
    }
}

/// Half-open byte range `[start, end)` into a TabDocument body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordSpan {
    pub start: usize,
    pub end: usize,
}

impl ChordSpan {
    pub fn range(&self) -> Range<usize> { self.start..self.end }

    /// The chord text this span covers in `body`.
    pub fn text<'a>(&self, body: &'a str) -> &'a str {
        &body[self.range()]
    }

    /// Same span counted in chars, for renderers that index text that way.
    pub fn char_range(&self, body: &str) -> Range<usize> {
        let start = body[..self.start].chars().count();
        start..start + body[self.range()].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_is_sentinel() {
        let d = TabDocument::default();
        assert_eq!(d.capo, "N/A");
        assert_eq!(d.source_url, "N/A");
        assert!(d.is_empty());
        assert_eq!(d.difficulty_level(), DifficultyLevel::Unknown);
    }

    #[test]
    fn difficulty_buckets() {
        let mut d = TabDocument::default();
        for (label, lvl) in [
            ("novice", DifficultyLevel::Easy),
            ("Intermediate", DifficultyLevel::Medium),
            ("advanced / expert", DifficultyLevel::Hard),
            ("absolute beginner", DifficultyLevel::Easy),
        ] {
            d.difficulty = s!(label);
            assert_eq!(d.difficulty_level(), lvl, "{label}");
        }
    }

    #[test]
    fn char_range_counts_multibyte() {
        let body = "é G";
        let span = ChordSpan { start: 3, end: 4 };
        assert_eq!(span.text(body), "G");
        assert_eq!(span.char_range(body), 2..3);
    }
}
