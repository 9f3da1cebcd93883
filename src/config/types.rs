use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub spelling: SpellingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Index storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Path to the SQLite index database
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Spelling correction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SpellingConfig {
    /// Maximum Levenshtein distance for a suggestion
    #[serde(rename = "max-edit-distance", default = "default_max_edit_distance")]
    pub max_edit_distance: usize,

    /// Tokens shorter than this are never corrected
    #[serde(rename = "min-term-length", default = "default_min_term_length")]
    pub min_term_length: usize,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: default_max_edit_distance(),
            min_term_length: default_min_term_length(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    concat!("quarry/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_database_path() -> String {
    "./quarry.db".to_string()
}

fn default_max_edit_distance() -> usize {
    2
}

fn default_min_term_length() -> usize {
    2
}
