// tests/search_results.rs
//
// Search-results extraction against a synthetic results page.
//
use tab_scrape::specs::search::parse_doc;

const RESULTS: &str = r#"
<!DOCTYPE html>
<html><body>
<table class="results">
  <thead>
    <tr><th>Artist</th><th>Song</th><th>Rating</th><th>Type</th></tr>
  </thead>
  <tr>
    <td class="artist"><a href="/artist/nirvana">Nirvana</a></td>
    <td class="song"><a href="/tab/nirvana/come-as-you-are-chords-1234">Come As You Are</a></td>
    <td class="rating" data-value="4.7">4.7</td>
    <td class="type">Chords</td>
  </tr>
  <tr></tr>
</table>
</body></html>
"#;

#[test]
fn header_and_empty_rows_are_filtered() {
    let songs = parse_doc(RESULTS);
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].title, "Come As You Are");
    assert_eq!(songs[0].artist.as_deref(), Some("Nirvana"));
    assert_eq!(songs[0].kind.as_deref(), Some("Chords"));
    assert_eq!(songs[0].rating, Some(4.7));
}

#[test]
fn relative_song_href_becomes_absolute() {
    let doc = r#"<table><tr><td class="song"><a href="/tab/123">X</a></td></tr></table>"#;
    let songs = parse_doc(doc);
    assert_eq!(songs.len(), 1);
    assert!(songs[0].song_url.starts_with("https://freetar.habedieeh.re/"));
    assert_eq!(songs[0].song_url, "https://freetar.habedieeh.re/tab/123");
}

#[test]
fn rows_keep_page_order() {
    let doc = r#"<table>
        <tr><td class="song"><a href="/tab/1">First</a></td></tr>
        <tr><td class="song"><a href="/tab/2">Second</a></td></tr>
        <tr><td class="song"><a href="/tab/3">Third</a></td></tr>
    </table>"#;
    let titles: Vec<String> = parse_doc(doc).into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn garbage_yields_nothing() {
    assert!(parse_doc("").is_empty());
    assert!(parse_doc("<tr><td class=song><a href=").is_empty());
    assert!(parse_doc("not html at all < > &").is_empty());
}

#[test]
fn accented_rows_and_entities() {
    let doc = r#"<table><tr>
        <td class="artist"><a href="/artist/edith-piaf">&Eacute;dith Piaf</a></td>
        <td class="song"><a href="/tab/edith-piaf/la-vie-en-rose">La Vie en rose</a></td>
        <td class="type">Chords</td></tr>
        <tr><td class="artist">Plastic Bertrand</td>
        <td class="song"><a href="/tab/plastic-bertrand/ca-plane">Ça plane pour moi</a></td></tr>
    </table>"#;
    let songs = parse_doc(doc);
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0].artist.as_deref(), Some("Édith Piaf"));
    assert_eq!(songs[1].title, "Ça plane pour moi");
}
