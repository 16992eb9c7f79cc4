//! Selection state for a single search session.
//!
//! Every update consumes the current value and returns the next one, so a
//! state held elsewhere is never changed behind its owner's back.

use crate::config::Config;

/// Minimum city length (in characters) before a search may run.
pub const MIN_CITY_LEN: usize = 2;

/// What the user has selected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Positive terms, unique.
    include_words: Vec<String>,
    /// Comma-separated extra exclusions, as typed.
    exclude_words: String,
    only_verified: bool,
    only_non_required: bool,
    city: String,
}

impl SelectionState {
    /// Empty selection with both filters off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session defaults from configuration.
    pub fn from_config(config: &Config) -> Self {
        config
            .default_include_words
            .iter()
            .fold(Self::new(), |state, word| state.add(word))
            .with_only_verified(config.only_verified)
            .with_only_non_required(config.only_non_required)
    }

    pub fn include_words(&self) -> &[String] {
        &self.include_words
    }

    pub fn exclude_words(&self) -> &str {
        &self.exclude_words
    }

    pub fn only_verified(&self) -> bool {
        self.only_verified
    }

    pub fn only_non_required(&self) -> bool {
        self.only_non_required
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Whether `word` is currently included (exact match).
    pub fn contains(&self, word: &str) -> bool {
        self.include_words.iter().any(|w| w == word)
    }

    /// Include `word`; no-op if already present.
    #[must_use]
    pub fn add(mut self, word: &str) -> Self {
        if !self.contains(word) {
            self.include_words.push(word.to_string());
        }
        self
    }

    /// Stop including `word`; no-op if absent.
    #[must_use]
    pub fn remove(mut self, word: &str) -> Self {
        self.include_words.retain(|w| w != word);
        self
    }

    /// Remove `word` if included, add it otherwise.
    #[must_use]
    pub fn toggle(self, word: &str) -> Self {
        if self.contains(word) {
            self.remove(word)
        } else {
            self.add(word)
        }
    }

    /// Drop every include word.
    #[must_use]
    pub fn clear_include_words(mut self) -> Self {
        self.include_words.clear();
        self
    }

    /// Set the comma-separated exclusions (trimmed as a whole).
    #[must_use]
    pub fn with_exclude_words(mut self, raw: &str) -> Self {
        self.exclude_words = raw.trim().to_string();
        self
    }

    #[must_use]
    pub fn with_only_verified(mut self, enabled: bool) -> Self {
        self.only_verified = enabled;
        self
    }

    #[must_use]
    pub fn with_only_non_required(mut self, enabled: bool) -> Self {
        self.only_non_required = enabled;
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: &str) -> Self {
        self.city = city.trim().to_string();
        self
    }

    /// A search needs a city of at least [`MIN_CITY_LEN`] characters.
    pub fn can_search(&self) -> bool {
        self.city.chars().count() >= MIN_CITY_LEN
    }
}
