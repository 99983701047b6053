//! Configuration management for shelfport.
//!
//! Configuration is read from `~/.config/shelfport/config.toml` (or the path
//! given with `--config`). If the default file doesn't exist, a commented
//! template is created.

use crate::scraper::ScraperConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

/// Path and query appended to a profile URL to reach its library list.
pub const LIBRARY_LIST_SUFFIX: &str = "/biblioteczka/lista?page=1&listId=booksFilteredList&findString=&kolejnosc=data-dodania&listType=list&objectId={object_id}&own=0&paginatorType=Standard";

/// Object id used when the profile URL doesn't carry a numeric one.
pub const DEFAULT_OBJECT_ID: &str = "605200";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileConfig,
    pub scraper: ScraperConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Profile page, e.g. `https://lubimyczytac.pl/profil/605200/stokuj`
    pub url: String,
}

impl ProfileConfig {
    /// Full URL of the first page of the profile's library list.
    pub fn list_url(&self) -> Result<String, ConfigError> {
        let base = self.url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ConfigError::MissingProfileUrl);
        }

        let parsed = Url::parse(base).map_err(|e| ConfigError::InvalidProfileUrl {
            url: base.to_string(),
            source: e,
        })?;

        let object_id = profile_id(&parsed).unwrap_or_else(|| DEFAULT_OBJECT_ID.to_string());
        Ok(format!(
            "{}{}",
            base,
            LIBRARY_LIST_SUFFIX.replace("{object_id}", &object_id)
        ))
    }
}

/// Numeric id following `/profil/` in a profile URL.
fn profile_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    segments.find(|s| *s == "profil")?;
    let id = segments.next()?;
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then(|| id.to_string())
}

/// Where the pipeline reads and writes its CSV files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub books: PathBuf,
    pub enriched: PathBuf,
    pub goodreads: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            books: PathBuf::from("dane/books.csv"),
            enriched: PathBuf::from("dane/books_enriched.csv"),
            goodreads: PathBuf::from("dane/goodreads.csv"),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/shelfport/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("shelfport").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# shelfport configuration

[profile]
# Your lubimyczytac.pl profile page
url = ""

[scraper]
# Run browser in headless mode (no visible window)
headless = true

# Navigation timeout in seconds
timeout_secs = 30

# How long to look for the cookie consent button (milliseconds)
cookie_timeout_ms = 10000
cookie_delay_ms = 1000

# How long to wait for book entries on each listing page (milliseconds)
entry_timeout_ms = 5000

# How long to wait for sections of a book's detail page (milliseconds)
detail_timeout_ms = 5000

# Pause after moving to the next listing page (milliseconds)
page_delay_ms = 1000

# Extra waits on a page without entries before treating it as the last page.
# 0 treats the first timeout as the end of the list.
empty_page_retries = 0

# Stop after this many listing pages
# max_pages = 50

[paths]
books = "dane/books.csv"
enriched = "dane/books_enriched.csv"
goodreads = "dane/goodreads.csv"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No profile URL configured; set [profile] url")]
    MissingProfileUrl,

    #[error("Invalid profile URL {url}: {source}")]
    InvalidProfileUrl {
        url: String,
        source: url::ParseError,
    },
}
