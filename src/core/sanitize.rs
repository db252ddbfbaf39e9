// src/core/sanitize.rs

use super::html::{tokenize, Event};

/// Trailing cruft the tab page appends after the tablature itself.
/// Everything from the first marker onward is dropped.
pub const TRAILER_MARKERS: &[&str] = &["$(document)", "Alternative versions"];

/// Collapse any whitespace run (including NBSP) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Visible text of a markup fragment, whitespace-normalized.
pub fn plain_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for ev in tokenize(fragment) {
        if let Event::Text { text, .. } = ev {
            out.push_str(&text);
        }
    }
    normalize_ws(&out)
}

/// Cut `s` at the earliest trailer marker, if any.
fn truncate_at_trailer(s: &str) -> &str {
    let cut = TRAILER_MARKERS
        .iter()
        .filter_map(|m| s.find(m))
        .min()
        .unwrap_or(s.len());
    &s[..cut]
}

/// Clean a reconstructed tab body for display.
///
/// 1. truncate at the first trailer marker,
/// 2. right-trim every line,
/// 3. collapse blank-line runs to a single blank line,
/// 4. drop leading and trailing blank lines,
/// 5. rejoin with `\n`.
///
/// Truncation runs first so the cut can't leave an uncollapsed blank tail.
/// Leading indentation is kept; in tablature it is content.
pub fn normalize_body(raw: &str) -> String {
    let content = truncate_at_trailer(raw);

    let mut lines: Vec<&str> = Vec::new();
    for line in content.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            if lines.last().is_some_and(|prev| !prev.is_empty()) {
                lines.push("");
            }
        } else {
            lines.push(line);
        }
    }
    // Leading blanks never get in (the push above needs a non-blank
    // predecessor); at most one trailing blank can.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
