// src/chords.rs
//! Chord-span detection over a cleaned tab body.
//!
//! A chord token is: a root `A`–`G`, an optional accidental (`#`/`b`), any
//! run of quality suffixes (`m min maj sus aug dim add 7 9 11 13`), and an
//! optional slash bass (`/` root accidental?). The token must start and end
//! on a word boundary, so `Em` inside `Emma` is not a chord.
//!
//! Matching is longest-first and non-overlapping: a token is consumed whole
//! before the scan moves on. A token that would run into a word character
//! is shortened to its longest prefix that ends cleanly, so `G/B7` reads as
//! `G` then `B7`. The accidental is never split off the root.

use crate::data::ChordSpan;

/// Longer suffixes first so `maj` wins over `m`.
const QUALITIES: &[&str] = &["maj", "min", "sus", "aug", "dim", "add", "11", "13", "m", "7", "9"];

#[inline]
fn is_root(c: u8) -> bool {
    matches!(c, b'A'..=b'G')
}

#[inline]
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Root letter plus optional accidental at `i`; returns the end.
fn note(b: &[u8], i: usize) -> Option<usize> {
    if !b.get(i).copied().is_some_and(is_root) {
        return None;
    }
    match b.get(i + 1) {
        Some(b'#') | Some(b'b') => Some(i + 2),
        _ => Some(i + 1),
    }
}

/// End of the longest chord token starting at `i` that ends on a word
/// boundary. Candidate ends are after the note, after each quality and after
/// the slash bass; the scan backs off from the longest one.
fn token_end(body: &str, i: usize) -> Option<usize> {
    let b = body.as_bytes();
    let mut j = note(b, i)?;
    let mut ends = vec![j];

    'quality: loop {
        for q in QUALITIES {
            if b[j..].starts_with(q.as_bytes()) {
                j += q.len();
                ends.push(j);
                continue 'quality;
            }
        }
        break;
    }

    if b.get(j) == Some(&b'/') {
        if let Some(k) = note(b, j + 1) {
            ends.push(k);
        }
    }

    ends.into_iter()
        .rev()
        .find(|&e| body[e..].chars().next().is_none_or(|c| !is_word(c)))
}

/// Lower-case-only tokens are words, not chords.
fn plausible(token: &str) -> bool {
    token.chars().any(|c| c.is_uppercase())
}

/// Scan `body` left to right and return every plausible chord token as a
/// byte span into `body`, in order.
pub fn detect_chords(body: &str) -> Vec<ChordSpan> {
    let b = body.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0usize;

    while i < b.len() {
        // Roots are ASCII, so `i` is on a char boundary whenever this holds.
        if is_root(b[i]) && body[..i].chars().next_back().is_none_or(|c| !is_word(c)) {
            if let Some(end) = token_end(body, i) {
                if plausible(&body[i..end]) {
                    spans.push(ChordSpan { start: i, end });
                }
                i = end;
                continue;
            }
        }
        i += 1;
    }
    spans
}

/// Wrap every span in brackets: `G D/F#` → `[G] [D/F#]`.
/// Spans must come from `detect_chords(body)`.
pub fn bracket_chords(body: &str, spans: &[ChordSpan]) -> String {
    let mut out = String::with_capacity(body.len() + spans.len() * 2);
    let mut last = 0usize;
    for sp in spans {
        out.push_str(&body[last..sp.start]);
        out.push('[');
        out.push_str(sp.text(body));
        out.push(']');
        last = sp.end;
    }
    out.push_str(&body[last..]);
    out
}
