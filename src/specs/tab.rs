// src/specs/tab.rs
//! Scraping *spec* for a single tab page.
//!
//! Purpose:
//! - Turn the **remote HTML** of a tab page into a `TabDocument`: title, artist,
//!   type, link to the source page, difficulty/capo/tuning, and the tablature
//!   body rebuilt as plain text.
//!
//! Two passes over the same page:
//! 1. **Structural** (token stream): title/artist from the `<h5>` heading, the
//!    source link, the tab type, and the body. The body starts at the first
//!    `<hr>`; everything above it is page furniture. Line-breaking tags
//!    (`br p div tr`) become newlines on open *and* close. Whitespace-only text
//!    is kept verbatim: in a tab, spacing is content.
//! 2. **Raw** (regex over the untouched source): difficulty, capo and tuning sit
//!    in label-prefixed fragments that the structural pass doesn't visit cleanly.
//!
//! The chord-diagram widget (`id="chordVisuals"`) repeats every chord name as
//! layout-only markup. Its whole subtree is skipped by tracking container depth.
//!
//! Nothing in here fails; missing pieces stay at the "N/A" sentinel.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::consts::{NO_REDIRECT, SENTINEL, SOURCE_PREFIX};
use crate::core::html::{tokenize, Attrs, Event};
use crate::core::net::Fetch;
use crate::core::sanitize::{normalize_body, normalize_ws, plain_text};
use crate::data::TabDocument;
use crate::error::Result;

/// `id` of the chord-diagram widget.
const CHORD_DIAGRAMS_ID: &str = "chordVisuals";

/// Heading holding "<a>Artist</a> - Title".
const TITLE_HEADING: &str = "h5";

/// Container tags counted while inside the chord-diagram widget. Void
/// elements (`input`, `img`, ...) have no end tag and must not be listed.
const IGNORE_CONTAINERS: &[&str] = &["div", "script", "table", "tbody", "tr", "td", "th"];

/// Tags that break a line in the body (on open and on close).
const LINE_BREAKS: &[&str] = &["br", "p", "div", "tr"];

/// Marks the body start.
const BODY_START: &str = "hr";

const VERSION_SUFFIX: &str = "(ver 1)";

static DIFFICULTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Difficulty:\s*(.*?)\s*<br\s*/?>").unwrap());
static CAPO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Capo:\s*(.*?)\s*</div>").unwrap());
static TUNING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Tuning:\s*(.*?)\s*(?:\(Standard\))?\s*<br\s*/?>").unwrap());

/// Everything one structural pass needs. Built per call, dropped after.
struct ParseState {
    doc: TabDocument,
    /// Inside the title heading.
    in_heading: bool,
    /// Inside the heading's artist link.
    in_artist_link: bool,
    body_started: bool,
    /// Open containers inside the chord-diagram widget; 0 = not ignoring.
    ignore_depth: usize,
    body: String,
}

impl ParseState {
    fn new() -> Self {
        Self {
            doc: TabDocument::default(),
            in_heading: false,
            in_artist_link: false,
            body_started: false,
            ignore_depth: 0,
            body: String::new(),
        }
    }

    #[inline]
    fn ignoring(&self) -> bool { self.ignore_depth > 0 }

    fn artist_found(&self) -> bool { self.doc.artist != SENTINEL }
    fn title_found(&self) -> bool { self.doc.title != SENTINEL }

    fn start_tag(&mut self, name: &str, attrs: &Attrs, self_closing: bool) {
        if name == BODY_START {
            self.body_started = true;
        }

        if IGNORE_CONTAINERS.contains(&name) && !self_closing {
            if attrs.get("id") == Some(CHORD_DIAGRAMS_ID) || self.ignoring() {
                self.ignore_depth += 1;
            }
        }
        if self.ignoring() {
            return;
        }

        match name {
            _ if name == TITLE_HEADING => self.in_heading = true,
            "a" if self.in_heading && !self.artist_found() => self.in_artist_link = true,
            "a" => {
                if let Some(href) = attrs.get("href").filter(|h| h.starts_with(SOURCE_PREFIX)) {
                    self.doc.source_url = href.replace(NO_REDIRECT, "");
                }
            }
            "span" if attrs.class_contains("favorite") => {
                self.doc.kind = s!(attrs.get("data-type").unwrap_or(SENTINEL));
            }
            _ => {}
        }

        if self.body_started && LINE_BREAKS.contains(&name) {
            self.body.push('\n');
        }
    }

    fn end_tag(&mut self, name: &str) {
        if name == TITLE_HEADING {
            self.in_heading = false;
        } else if name == "a" {
            self.in_artist_link = false;
        }

        if self.ignoring() {
            if IGNORE_CONTAINERS.contains(&name) {
                self.ignore_depth -= 1;
            }
            // The widget's own closing tag still ends a line.
            if self.ignoring() {
                return;
            }
        }

        if self.body_started && LINE_BREAKS.contains(&name) {
            self.body.push('\n');
        }
    }

    fn text(&mut self, text: &str) {
        if self.ignoring() {
            return;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            if self.body_started {
                self.body.push_str(text);
            }
            return;
        }

        if self.in_artist_link && !self.artist_found() {
            self.doc.artist = normalize_ws(trimmed);
        } else if self.in_heading && self.artist_found() && !self.title_found() {
            // "Artist - Title" may arrive as one text node or as separate ones.
            let candidate = normalize_ws(trimmed.trim_start_matches(['-', '\u{2013}']));
            if !candidate.is_empty() && candidate != self.doc.artist {
                let title = normalize_ws(&candidate.replace(VERSION_SUFFIX, ""));
                if !title.is_empty() {
                    self.doc.title = title;
                }
            }
        } else if self.body_started {
            self.body.push_str(text);
        }
    }
}

/// First capture of `re` in the raw page, tags stripped; `None` if absent/empty.
fn raw_field(re: &Regex, html_doc: &str) -> Option<String> {
    let cap = re.captures(html_doc)?.get(1)?;
    let v = plain_text(cap.as_str());
    (!v.is_empty()).then_some(v)
}

/// Pass 2: label-prefixed metadata straight from the source.
fn apply_raw_metadata(doc: &mut TabDocument, html_doc: &str) {
    if let Some(v) = raw_field(&DIFFICULTY_RE, html_doc) {
        doc.difficulty = v;
    }
    if let Some(v) = raw_field(&CAPO_RE, html_doc) {
        doc.capo = v;
    }
    if let Some(v) = raw_field(&TUNING_RE, html_doc) {
        doc.tuning = v;
    }
}

/// Body as reconstructed by the structural pass, before cleanup.
pub fn raw_body(html_doc: &str) -> String {
    structural_pass(html_doc).body
}

fn structural_pass(html_doc: &str) -> ParseState {
    let mut st = ParseState::new();
    for ev in tokenize(html_doc) {
        match ev {
            Event::StartTag { name, attrs, self_closing, .. } => st.start_tag(&name, &attrs, self_closing),
            Event::EndTag { name, .. } => st.end_tag(&name),
            Event::Text { text, .. } => st.text(&text),
        }
    }
    st
}

/// Split out for unit tests.
pub fn parse_doc(html_doc: &str) -> TabDocument {
    let st = structural_pass(html_doc);
    let mut doc = st.doc;
    apply_raw_metadata(&mut doc, html_doc);
    doc.body = normalize_body(&st.body);
    doc
}

pub fn fetch(fetcher: &dyn Fetch, url: &str) -> Result<TabDocument> {
    let html_doc = fetcher.get(url, &[])?;
    let t = std::time::Instant::now();
    let out = parse_doc(&html_doc);
    debug!("Tab: parsed {url} ({} body bytes) in {:?}", out.body.len(), t.elapsed());
    Ok(out)
}
