// src/core/html.rs
//! Tolerant, forward-only HTML tokenizer.
//!
//! Turns a page into a lazy stream of [`Event`]s: start tags (with their
//! attributes in source order), end tags and text. Tag and attribute names
//! are ASCII-lowercased; text and attribute values have character
//! references decoded. Comments, doctypes and processing instructions are
//! skipped.
//!
//! Nothing here fails. Anything that does not parse as markup (a stray `<`,
//! a tag cut off at end of input, an unclosed quote) is handed back as text,
//! so the scanner always makes forward progress.
//!
//! Every event carries the byte range it was read from, so callers can go
//! back to the raw source for a second pass.

use std::borrow::Cow;
use std::ops::Range;

use super::entities::{decode_attr, decode_entities};

/// Elements whose content is taken verbatim up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[(&str, &str)] = &[("script", "</script"), ("style", "</style")];

/// Attributes of one start tag, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attrs(Vec<(String, String)>);

impl Attrs {
    /// Value of `name`. A repeated attribute resolves to its last occurrence.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Case-sensitive substring test against the `class` attribute.
    pub fn class_contains(&self, needle: &str) -> bool {
        self.get("class").is_some_and(|c| c.contains(needle))
    }

}

#[derive(Clone, Debug, PartialEq)]
pub enum Event<'a> {
    StartTag {
        name: String,
        attrs: Attrs,
        self_closing: bool,
        span: Range<usize>,
    },
    EndTag {
        name: String,
        span: Range<usize>,
    },
    Text {
        text: Cow<'a, str>,
        span: Range<usize>,
    },
}

impl Event<'_> {
    /// Byte range in the source this event was read from.
    pub fn span(&self) -> Range<usize> {
        match self {
            Event::StartTag { span, .. } | Event::EndTag { span, .. } | Event::Text { span, .. } => {
                span.clone()
            }
        }
    }
}

enum Markup<'a> {
    Event(Event<'a>),
    Skipped,
    NotMarkup,
}

pub struct Tokenizer<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    raw_until: Option<&'static str>,
}

pub fn tokenize(s: &str) -> Tokenizer<'_> {
    Tokenizer::new(s)
}

#[inline]
fn is_ws(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b'\x0c')
}

#[inline]
fn is_name_end(c: u8) -> bool {
    is_ws(c) || c == b'/' || c == b'>'
}

impl<'a> Tokenizer<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), raw_until: None }
    }

    /// Could the `<` at `j` open a tag, comment or declaration?
    #[inline]
    fn looks_like_markup(&self, j: usize) -> bool {
        match self.b.get(j + 1) {
            Some(c) if c.is_ascii_alphabetic() => true,
            Some(b'/') | Some(b'!') | Some(b'?') => true,
            _ => false,
        }
    }

    #[inline]
    fn skip_ws(&self, mut j: usize) -> usize {
        while j < self.n && is_ws(self.b[j]) {
            j += 1;
        }
        j
    }

    fn read_name(&self, mut j: usize) -> (String, usize) {
        let start = j;
        while j < self.n && !is_name_end(self.b[j]) {
            j += 1;
        }
        (self.s[start..j].to_ascii_lowercase(), j)
    }

    /// Text run from `self.i` up to the next plausible markup start.
    fn text(&mut self) -> Event<'a> {
        let start = self.i;
        // Always consume the first char so a rejected '<' still moves us on.
        self.i += self.s[start..].chars().next().map_or(1, char::len_utf8);
        while self.i < self.n {
            match self.s[self.i..].find('<') {
                None => self.i = self.n,
                Some(rel) => {
                    let j = self.i + rel;
                    if self.looks_like_markup(j) {
                        self.i = j;
                        break;
                    }
                    self.i = j + 1;
                }
            }
        }
        let end = self.i;
        let s: &'a str = self.s;
        Event::Text { text: decode_entities(&s[start..end]), span: start..end }
    }

    /// Verbatim content of a script/style element.
    fn raw_text(&mut self, close: &str) -> Option<Event<'a>> {
        let start = self.i;
        let hay = &self.b[start..];
        let close_b = close.as_bytes();
        let end = hay
            .windows(close_b.len())
            .position(|w| w.eq_ignore_ascii_case(close_b))
            .map(|p| start + p)
            .unwrap_or(self.n);
        self.i = end;
        let s: &'a str = self.s;
        (end > start).then(|| Event::Text { text: Cow::Borrowed(&s[start..end]), span: start..end })
    }

    fn markup(&mut self) -> Markup<'a> {
        let start = self.i;
        let rest = &self.s[start..];

        if rest.starts_with("<!--") {
            self.i = match rest[4..].find("-->") {
                Some(e) => start + 4 + e + 3,
                None => self.n,
            };
            return Markup::Skipped;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            return match rest.find('>') {
                Some(e) => {
                    self.i = start + e + 1;
                    Markup::Skipped
                }
                None => Markup::NotMarkup,
            };
        }

        if rest.starts_with("</") {
            if !self.b.get(start + 2).is_some_and(|c| c.is_ascii_alphabetic()) {
                return Markup::NotMarkup;
            }
            let (name, j) = self.read_name(start + 2);
            return match self.s[j..].find('>') {
                Some(e) => {
                    self.i = j + e + 1;
                    Markup::Event(Event::EndTag { name, span: start..self.i })
                }
                None => Markup::NotMarkup,
            };
        }

        match self.start_tag(start) {
            Some(ev) => Markup::Event(ev),
            None => Markup::NotMarkup,
        }
    }

    /// `<name attr=value ...>`; `None` if the tag never closes.
    fn start_tag(&mut self, start: usize) -> Option<Event<'a>> {
        if !self.b.get(start + 1).is_some_and(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let (name, mut j) = self.read_name(start + 1);
        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            j = self.skip_ws(j);
            if j >= self.n {
                return None;
            }
            match self.b[j] {
                b'>' => {
                    j += 1;
                    break;
                }
                b'/' => {
                    if self.b.get(j + 1) == Some(&b'>') {
                        self_closing = true;
                        j += 2;
                        break;
                    }
                    j += 1;
                }
                _ => {
                    let ns = j;
                    while j < self.n && !is_name_end(self.b[j]) && self.b[j] != b'=' {
                        j += 1;
                    }
                    if j == ns {
                        // Stray '=' or similar; step over it.
                        j += 1;
                        continue;
                    }
                    let key = self.s[ns..j].to_ascii_lowercase();

                    let mut value = "";
                    let k = self.skip_ws(j);
                    if self.b.get(k) == Some(&b'=') {
                        let v = self.skip_ws(k + 1);
                        match self.b.get(v) {
                            Some(&q) if q == b'"' || q == b'\'' => {
                                let close = self.s[v + 1..].find(q as char)?;
                                value = &self.s[v + 1..v + 1 + close];
                                j = v + 1 + close + 1;
                            }
                            Some(_) => {
                                let mut e = v;
                                while e < self.n && !is_ws(self.b[e]) && self.b[e] != b'>' {
                                    e += 1;
                                }
                                value = &self.s[v..e];
                                j = e;
                            }
                            None => return None,
                        }
                    }
                    attrs.push((key, decode_attr(value).into_owned()));
                }
            }
        }

        self.i = j;
        if !self_closing {
            if let Some((_, close)) = RAW_TEXT_ELEMENTS.iter().find(|(el, _)| *el == name) {
                self.raw_until = Some(*close);
            }
        }
        Some(Event::StartTag { name, attrs: Attrs(attrs), self_closing, span: start..j })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            if let Some(close) = self.raw_until.take() {
                if let Some(ev) = self.raw_text(close) {
                    return Some(ev);
                }
                continue;
            }
            if self.b[self.i] == b'<' {
                match self.markup() {
                    Markup::Event(ev) => return Some(ev),
                    Markup::Skipped => continue,
                    Markup::NotMarkup => {}
                }
            }
            return Some(self.text());
        }
        None
    }
}
