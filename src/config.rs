//! Configuration management for covid-search.
//!
//! The search configuration is an immutable value built once per session.
//! It is read from `<config_dir>/covid-search/config.toml` when present and
//! every missing field falls back to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Error};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::query::TermMapping;

/// Application directory name under the platform config/data dirs.
const APP_DIR: &str = "covid-search";

/// Config filename inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "covid-search.db";

/// Twitter search endpoint.
pub const DEFAULT_SEARCH_BASE: &str = "https://twitter.com/search";

/// A static `{ name, link }` pair shown by `about`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub link: String,
}

impl ResourceLink {
    pub fn new(name: &str, link: &str) -> Self {
        Self {
            name: name.to_string(),
            link: link.to_string(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search endpoint the query is appended to.
    pub search_base: String,
    /// Include words selected at the start of a session.
    pub default_include_words: Vec<String>,
    /// Keys appended to the exclusions when "non-required only" is on.
    pub default_exclude_keys: Vec<String>,
    /// Words offered as one-click include suggestions.
    pub suggested_words: Vec<String>,
    /// Preset quick-pick cities.
    pub cities: Vec<String>,
    /// Initial value of the verified-only flag.
    pub only_verified: bool,
    /// Initial value of the non-required-only flag.
    pub only_non_required: bool,
    /// Whether picking a preset city runs the search immediately.
    pub search_on_city_select: bool,
    /// Number of history records kept.
    pub history_limit: usize,
    /// Keyword expansions used for both include and exclude terms.
    pub term_mapping: TermMapping,
    /// Links listed by `about`.
    pub resources: Vec<ResourceLink>,
    /// Where this config was loaded from (None = built-in defaults).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            default_include_words: to_strings(&["Beds", "Ventilators", "oxygen"]),
            default_exclude_keys: to_strings(&["require", "need", "want"]),
            suggested_words: to_strings(&[
                "Beds",
                "Ventilators",
                "Oxygen",
                "Remdesivir",
                "ICU",
                "Isolation",
                "Fabiflu",
                "Test",
                "Plasma",
                "Favipiravir",
            ]),
            cities: to_strings(&["Pune", "Mumbai", "Delhi", "Agra", "Chennai", "Bangalore"]),
            only_verified: true,
            only_non_required: true,
            search_on_city_select: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            term_mapping: TermMapping::default(),
            resources: vec![ResourceLink::new(
                "Source code",
                "https://github.com/ShubhankarDas/covid-search",
            )],
            source_path: None,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from_path(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_path(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;
        config.source_path = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Find a preset city by case-insensitive name or 1-based index.
    pub fn find_city(&self, needle: &str) -> crate::error::Result<&str> {
        let needle = needle.trim();
        let found = match needle.parse::<usize>() {
            Ok(index) => index.checked_sub(1).and_then(|i| self.cities.get(i)),
            Err(_) => self
                .cities
                .iter()
                .find(|city| city.eq_ignore_ascii_case(needle)),
        };
        found
            .map(|s| s.as_str())
            .ok_or_else(|| Error::UnknownCity(needle.to_string()))
    }
}

/// Runtime settings (where local state lives).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Data dir -> Home dir -> Current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Full path to the local database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }
}
