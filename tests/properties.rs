// tests/properties.rs
//
// Invariants of body cleanup and chord detection, checked over generated input.
//
use proptest::prelude::*;
use rstest::rstest;
use tab_scrape::core::tokenize;
use tab_scrape::specs::{search, tab};
use tab_scrape::{detect_chords, normalize_body};

/// Tab-ish text: chord letters, accidentals, blank-line runs, NBSP, markers.
fn tabish() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Ga-g][#bm7/]{0,3}",
            "[a-z]{1,6}",
            Just(s(" ")),
            Just(s("\n")),
            Just(s("\n\n\n")),
            Just(s("\u{a0}")),
            Just(s("\t")),
            Just(s("Alternative versions")),
            Just(s("|--0--|")),
        ],
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

/// Markup fragments with multibyte text, stray brackets and cut-off tags.
fn markupish() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "<(div|p|tr|td|h5|hr|br|a|span|input|script)( (class|id|href|data-type|data-value)=\"[a-zé ]{0,8}\")?/?>",
            "</(div|p|tr|td|h5|a|span|script)>",
            "[a-zA-ZÉéÇçüñ\u{a0} \n]{1,12}",
            "&(nbsp|amp|Eacute|eacute|#233|#x41|bogus);?",
            Just(s("<")),
            Just(s("<div id=\"chordVisuals\">")),
            Just(s("<td class=\"song\"><a href=\"/t/1\">")),
            Just(s("<!-- ")),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn s(v: &str) -> String {
    v.to_string()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in any::<String>()) {
        let once = normalize_body(&raw);
        prop_assert_eq!(normalize_body(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_tab_text(raw in tabish()) {
        let once = normalize_body(&raw);
        prop_assert_eq!(normalize_body(&once), once);
    }

    #[test]
    fn no_blank_edges_or_blank_runs(raw in tabish()) {
        let out = normalize_body(&raw);
        if !out.is_empty() {
            let lines: Vec<&str> = out.split('\n').collect();
            prop_assert!(!is_blank(lines[0]));
            prop_assert!(!is_blank(lines[lines.len() - 1]));
            for pair in lines.windows(2) {
                prop_assert!(!(is_blank(pair[0]) && is_blank(pair[1])), "blank run in {:?}", out);
            }
        }
    }

    #[test]
    fn chord_spans_are_valid(body in tabish()) {
        let spans = detect_chords(&body);
        let mut prev_end = 0usize;
        for sp in &spans {
            prop_assert!(sp.start < sp.end);
            prop_assert!(sp.end <= body.len());
            prop_assert!(sp.start >= prev_end, "overlap or disorder at {:?}", sp);
            prop_assert!(body.is_char_boundary(sp.start) && body.is_char_boundary(sp.end));
            prev_end = sp.end;
        }
    }

    #[test]
    fn tokenize_never_panics(src in any::<String>()) {
        for ev in tokenize(&src) {
            let span = ev.span();
            prop_assert!(span.end <= src.len());
            prop_assert!(src.is_char_boundary(span.start) && src.is_char_boundary(span.end));
        }
    }

    #[test]
    fn tokenize_covers_markupish_input(src in markupish()) {
        let mut last = 0usize;
        for ev in tokenize(&src) {
            let span = ev.span();
            prop_assert!(span.start >= last, "events out of order at {:?}", span);
            last = span.end;
        }
        prop_assert!(last <= src.len());
    }

    #[test]
    fn extractors_never_panic(src in any::<String>()) {
        let doc = tab::parse_doc(&src);
        prop_assert_eq!(normalize_body(&doc.body), doc.body);
        let _ = search::parse_doc(&src);
    }

    #[test]
    fn extractors_never_panic_on_markupish_input(src in markupish()) {
        let doc = tab::parse_doc(&src);
        prop_assert_eq!(normalize_body(&doc.body), doc.body.clone());
        for song in search::parse_doc(&src) {
            prop_assert!(song.song_url.starts_with("http"));
        }
    }

    #[test]
    fn chord_detection_never_panics(body in any::<String>()) {
        let spans = detect_chords(&body);
        for sp in &spans {
            prop_assert!(sp.end <= body.len());
        }
    }
}

#[rstest]
#[case("G", &["G"])]
#[case("G D/F# Am7", &["G", "D/F#", "Am7"])]
#[case("Cmaj7 Bbm", &["Cmaj7", "Bbm"])]
#[case("Asus4", &[])]
#[case("Emma Cats", &[])]
#[case("(Dsus) [E7]", &["Dsus", "E7"])]
#[case("am i going", &[])]
#[case("Dead Bad Cab", &[])]
#[case("Gm\tC\u{a0}F", &["Gm", "C", "F"])]
fn chord_cases(#[case] body: &str, #[case] expected: &[&str]) {
    let found: Vec<&str> = detect_chords(body).iter().map(|sp| sp.text(body)).collect();
    assert_eq!(found, expected);
}

#[test]
fn lower_case_candidate_is_not_flagged() {
    let body = "am i going";
    assert!(detect_chords(body).iter().all(|sp| sp.text(body) != "am"));
}
