// src/store.rs
//! Local JSON state kept for the UI: viewer settings + favorites, and the
//! query/url caches. The scraping core never touches these files; callers load
//! and save explicitly.
//!
//! Both files tolerate being missing or corrupt: loading falls back to
//! defaults with a warning rather than failing.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::consts::{
    CACHE_DIR_ENV, CACHE_FILE, CONFIG_DIR_ENV, CONFIG_FILE, MAX_CACHED_SEARCHES,
    MAX_CACHED_SONGS, STORE_DIR, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::data::{SongSummary, TabDocument};
use crate::error::Result;

fn dir_from_env(var: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(STORE_DIR))
}

pub fn config_path() -> PathBuf {
    dir_from_env(CONFIG_DIR_ENV).join(CONFIG_FILE)
}

pub fn cache_path() -> PathBuf {
    dir_from_env(CACHE_DIR_ENV).join(CACHE_FILE)
}

fn load_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{}: not found, using defaults", path.display());
            return T::default();
        }
        Err(e) => {
            warn!("{}: {e}", path.display());
            return T::default();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!("{}: malformed ({e}), using defaults", path.display());
        T::default()
    })
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn clamp_zoom(z: f32) -> f32 {
    if z.is_finite() { z.clamp(ZOOM_MIN, ZOOM_MAX) } else { ZOOM_DEFAULT }
}

/* ---------------- settings ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub zoom_size: f32,
    /// Insertion order.
    pub favorites: Vec<SongSummary>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { zoom_size: ZOOM_DEFAULT, favorites: Vec::new() }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        let mut s: Settings = load_json(path);
        s.zoom_size = clamp_zoom(s.zoom_size);
        s
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn set_zoom(&mut self, size: f32) -> f32 {
        self.zoom_size = clamp_zoom(size);
        self.zoom_size
    }

    pub fn zoom_in(&mut self) -> f32 { self.set_zoom(self.zoom_size + ZOOM_STEP) }
    pub fn zoom_out(&mut self) -> f32 { self.set_zoom(self.zoom_size - ZOOM_STEP) }

    pub fn is_favorite(&self, song_url: &str) -> bool {
        self.favorites.iter().any(|f| f.song_url == song_url)
    }

    /// Add if absent, remove if present. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, song: SongSummary) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| f.song_url == song.song_url) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(song);
            true
        }
    }
}

/* ---------------- cache ---------------- */

/// Bounded caches, oldest entry first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cache {
    /// url → document
    pub cached_songs: Vec<(String, TabDocument)>,
    /// query → results
    pub cached_searches: Vec<(String, Vec<SongSummary>)>,
}

/// Insert or refresh `key` at the newest end, evicting the oldest beyond `cap`.
fn push_capped<V>(list: &mut Vec<(String, V)>, key: &str, value: V, cap: usize) {
    if cap == 0 {
        return;
    }
    list.retain(|(k, _)| k != key);
    if list.len() >= cap {
        let excess = list.len() + 1 - cap;
        list.drain(..excess);
    }
    list.push((s!(key), value));
}

fn trim_oldest<V>(list: &mut Vec<(String, V)>, cap: usize) {
    if list.len() > cap {
        let excess = list.len() - cap;
        list.drain(..excess);
    }
}

impl Cache {
    pub fn load(path: &Path) -> Self {
        let mut c: Cache = load_json(path);
        // Failed lookups from older runs may have been stored as empty documents.
        c.cached_songs.retain(|(_, d)| !d.is_empty());
        trim_oldest(&mut c.cached_songs, MAX_CACHED_SONGS);
        trim_oldest(&mut c.cached_searches, MAX_CACHED_SEARCHES);
        c
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn song(&self, url: &str) -> Option<&TabDocument> {
        self.cached_songs.iter().find(|(k, _)| k == url).map(|(_, v)| v)
    }

    pub fn search(&self, query: &str) -> Option<&[SongSummary]> {
        self.cached_searches.iter().find(|(k, _)| k == query).map(|(_, v)| v.as_slice())
    }

    pub fn insert_song(&mut self, url: &str, doc: TabDocument) {
        push_capped(&mut self.cached_songs, url, doc, MAX_CACHED_SONGS);
    }

    pub fn insert_search(&mut self, query: &str, songs: Vec<SongSummary>) {
        push_capped(&mut self.cached_searches, query, songs, MAX_CACHED_SEARCHES);
    }

    /// Any cached search row linking to `song_url`, newest search first.
    pub fn find_summary(&self, song_url: &str) -> Option<&SongSummary> {
        self.cached_searches
            .iter()
            .rev()
            .flat_map(|(_, songs)| songs.iter())
            .find(|s| s.song_url == song_url)
    }
}
