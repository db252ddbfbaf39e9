// src/cli.rs
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};

use crate::{
    chords::bracket_chords,
    core::net::HttpFetcher,
    log::{self, LogTarget},
    scrape::{render_tab, search_cached, tab_cached},
    store::{self, Cache, Settings},
};

#[derive(Parser, Debug)]
#[command(name = "tabs", version, about = "Search the tab mirror and print tablature")]
pub struct Cli {
    /// Log to stderr instead of .store/debug.log
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Neither read nor write the local cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List songs matching a query
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Print one tab page
    Tab {
        url: String,
        /// Don't bracket chord names
        #[arg(long)]
        no_chords: bool,
    },
    /// List favorites
    Favorites,
    /// Add or remove a song (by URL, from earlier search results) as favorite
    Favorite { url: String },
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    log::init(if cli.verbose { LogTarget::Stderr } else { LogTarget::File })?;

    let cache_path = store::cache_path();
    let mut cache = if cli.no_cache { Cache::default() } else { Cache::load(&cache_path) };
    let fetcher = HttpFetcher::new();

    match cli.command {
        Command::Search { query } => {
            let query = query.join(" ");
            let songs = search_cached(&mut cache, &fetcher, &query);
            if songs.is_empty() {
                println!("No results for {query:?}");
            }
            for s in &songs {
                println!("{}", summary_line(s));
            }
        }
        Command::Tab { url, no_chords } => {
            let doc = tab_cached(&mut cache, &fetcher, &url);
            if doc.is_empty() {
                return Err(eyre!("song not found: {url}"));
            }
            let rendered = render_tab(doc);
            let doc = &rendered.doc;
            println!("Title: {}", doc.title);
            println!("Artist: {}", doc.artist);
            println!("{}", doc.details_line());
            println!("Source: {}", doc.source_url);
            println!();
            if no_chords {
                println!("{}", doc.body);
            } else {
                println!("{}", bracket_chords(&doc.body, &rendered.chords));
            }
        }
        Command::Favorites => {
            let settings = Settings::load(&store::config_path());
            if settings.favorites.is_empty() {
                println!("No favorites yet");
            }
            for s in &settings.favorites {
                println!("{}", summary_line(s));
            }
        }
        Command::Favorite { url } => {
            let path = store::config_path();
            let mut settings = Settings::load(&path);
            let song = cache
                .find_summary(&url)
                .cloned()
                .ok_or_else(|| eyre!("{url} is not in any cached search; search for it first"))?;
            let title = song.title.clone();
            let now = settings.toggle_favorite(song);
            settings.save(&path)?;
            println!("{} {title}", if now { "Added" } else { "Removed" });
        }
    }

    if !cli.no_cache {
        cache.save(&cache_path)?;
    }
    Ok(())
}

fn summary_line(s: &crate::data::SongSummary) -> String {
    format!(
        "{} | {} [{}] {}\n    {}",
        s.title,
        s.artist.as_deref().unwrap_or("N/A"),
        s.kind.as_deref().unwrap_or("N/A"),
        s.rating_label.as_deref().unwrap_or(""),
        s.song_url,
    )
}
