// tests/fetch_degradation.rs
//
// Fetch boundaries with a stub page source: failures degrade, inputs are
// checked before any request, and the caches only keep useful answers.
//
use std::cell::RefCell;

use tab_scrape::core::net::Fetch;
use tab_scrape::error::{Result, ScrapeError};
use tab_scrape::scrape::{
    fetch_search_results_with, fetch_tab_document_with, search_cached, tab_cached,
    try_fetch_search_results, try_fetch_tab_document,
};
use tab_scrape::store::Cache;

/// Records every request; answers with `page` or a transport error.
struct Stub {
    page: Option<&'static str>,
    calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl Stub {
    fn failing() -> Self {
        Self { page: None, calls: RefCell::new(Vec::new()) }
    }

    fn serving(page: &'static str) -> Self {
        Self { page: Some(page), calls: RefCell::new(Vec::new()) }
    }

    fn calls(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetch for Stub {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        self.calls.borrow_mut().push((
            url.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        ));
        match self.page {
            Some(p) => Ok(p.to_string()),
            None => Err(ScrapeError::Transport { url: url.to_string(), message: "connection refused".into() }),
        }
    }
}

const RESULTS: &str = r#"<table>
  <tr><td class="artist"><a href="/artist/a">A</a></td>
      <td class="song"><a href="/tab/a/one">One</a></td></tr>
</table>"#;

const TAB: &str = r#"<h5><a href="/artist/a">A</a> - One</h5><hr><div>G  C</div>"#;

#[test]
fn transport_error_degrades_to_empty() {
    let stub = Stub::failing();
    assert!(fetch_search_results_with(&stub, "creep").is_empty());

    let doc = fetch_tab_document_with(&stub, "https://www.example.org/tab/1");
    assert!(doc.is_empty());
    assert_eq!(doc.title, "N/A");
    assert_eq!(doc.capo, "N/A");
    assert_eq!(doc.body, "");
    assert_eq!(stub.calls(), 2);
}

#[test]
fn try_variants_surface_the_error() {
    let stub = Stub::failing();
    let err = try_fetch_search_results(&stub, "creep").unwrap_err();
    assert!(err.is_network());
    let err = try_fetch_tab_document(&stub, "https://x.org/t").unwrap_err();
    assert!(matches!(err, ScrapeError::Transport { .. }));
}

#[test]
fn empty_input_makes_no_request() {
    let stub = Stub::serving(RESULTS);
    assert!(fetch_search_results_with(&stub, "   ").is_empty());
    assert!(fetch_tab_document_with(&stub, "").is_empty());
    assert!(matches!(try_fetch_search_results(&stub, ""), Err(ScrapeError::EmptyInput("query"))));
    assert!(matches!(try_fetch_tab_document(&stub, " "), Err(ScrapeError::EmptyInput("url"))));
    assert_eq!(stub.calls(), 0);
}

#[test]
fn search_sends_query_parameter() {
    let stub = Stub::serving(RESULTS);
    let songs = fetch_search_results_with(&stub, "  one  ");
    assert_eq!(songs.len(), 1);
    let calls = stub.calls.borrow();
    assert_eq!(calls[0].0, "https://freetar.habedieeh.re/search");
    assert_eq!(calls[0].1, vec![("search_term".to_string(), "one".to_string())]);
}

#[test]
fn tab_fetch_uses_tabs_host() {
    let stub = Stub::serving(TAB);
    let doc = fetch_tab_document_with(&stub, "https://www.ultimate-guitar.com/tab/a/one");
    assert_eq!(doc.title, "One");
    assert_eq!(stub.calls.borrow()[0].0, "https://tabs.ultimate-guitar.com/tab/a/one");
}

#[test]
fn cached_search_skips_the_network() {
    let stub = Stub::serving(RESULTS);
    let mut cache = Cache::default();
    let first = search_cached(&mut cache, &stub, "one");
    let second = search_cached(&mut cache, &stub, "one");
    assert_eq!(first, second);
    assert_eq!(stub.calls(), 1);
}

#[test]
fn failures_are_not_cached() {
    let stub = Stub::failing();
    let mut cache = Cache::default();
    assert!(search_cached(&mut cache, &stub, "one").is_empty());
    assert!(tab_cached(&mut cache, &stub, "https://x.org/t").is_empty());
    assert!(cache.search("one").is_none());
    assert!(cache.song("https://x.org/t").is_none());

    let good = Stub::serving(TAB);
    let doc = tab_cached(&mut cache, &good, "https://x.org/t");
    assert_eq!(doc.body, "G  C");
    assert_eq!(cache.song("https://x.org/t"), Some(&doc));
}
