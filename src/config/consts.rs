// src/config/consts.rs

// Net config
pub const SITE_BASE: &str = "https://freetar.habedieeh.re/";
pub const SEARCH_PATH: &str = "search";
pub const SEARCH_PARAM: &str = "search_term";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Tab pages link back to the page they mirror
pub const SOURCE_PREFIX: &str = "https://tabs.ultimate-guitar.com";
pub const NO_REDIRECT: &str = "?no_redirect";

// Placeholder for any metadata field the page did not provide
pub const SENTINEL: &str = "N/A";

// Local store
pub const STORE_DIR: &str = ".store";
pub const CONFIG_FILE: &str = "config.json";
pub const CACHE_FILE: &str = "cache.json";
pub const LOG_FILE: &str = "debug.log";
pub const CONFIG_DIR_ENV: &str = "TABS_CONFIG_DIR";
pub const CACHE_DIR_ENV: &str = "TABS_CACHE_DIR";

// Cache caps (oldest entry evicted first)
pub const MAX_CACHED_SONGS: usize = 1000;
pub const MAX_CACHED_SEARCHES: usize = 1000;

// Viewer zoom (points)
pub const ZOOM_MIN: f32 = 6.0;
pub const ZOOM_MAX: f32 = 36.0;
pub const ZOOM_DEFAULT: f32 = 10.0;
pub const ZOOM_STEP: f32 = 1.0;
