//! Search query builder.
//!
//! Expands include and exclude keywords through the term mapping and
//! assembles them into Twitter advanced-search syntax:
//!
//! `verified <city> (a OR b OR ...) -"x" -"y" -"not verified"`

use url::form_urlencoded;

use super::TermMapping;
use crate::config::{Config, DEFAULT_SEARCH_BASE};
use crate::selection::SelectionState;

/// Leading token for verified-only searches.
const VERIFIED_TOKEN: &str = "verified";

/// Trailing token for verified-only searches.
const NOT_VERIFIED_TOKEN: &str = r#"-"not verified""#;

/// Value of the `f` parameter ("latest" ordering).
const RESULT_FILTER: &str = "live";

/// Builder for search queries and search URLs.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    /// Keyword expansions.
    mapping: TermMapping,
    /// Keys appended to the exclusions in non-required mode.
    default_exclude_keys: Vec<String>,
    /// Search endpoint.
    search_base: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl QueryBuilder {
    /// Create a builder with an empty mapping and no default exclusions.
    pub fn new() -> Self {
        Self {
            mapping: TermMapping::empty(),
            default_exclude_keys: Vec::new(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
        }
    }

    /// Create a builder from the search configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .mapping(config.term_mapping.clone())
            .default_exclude_keys(&config.default_exclude_keys)
            .search_base(&config.search_base)
    }

    /// Use a keyword expansion table.
    pub fn mapping(mut self, mapping: TermMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Keys appended after user exclusions in non-required mode.
    pub fn default_exclude_keys(mut self, keys: &[String]) -> Self {
        self.default_exclude_keys = keys.to_vec();
        self
    }

    /// Search endpoint the query string is appended to.
    pub fn search_base(mut self, base: &str) -> Self {
        self.search_base = base.to_string();
        self
    }

    /// Expand a word through the mapping, or keep it as a trimmed literal.
    pub fn expand_term(&self, word: &str) -> Vec<String> {
        match self.mapping.get(word) {
            Some(tokens) => tokens.to_vec(),
            None => vec![word.trim().to_string()],
        }
    }

    /// Expand an exclusion: mapped keys verbatim, anything else as `-"word"`.
    fn expand_exclusion(&self, word: &str) -> Vec<String> {
        match self.mapping.get(word) {
            Some(tokens) => tokens.to_vec(),
            None => vec![format!("-\"{}\"", word.trim())],
        }
    }

    /// Build the parenthesized OR group. No words gives `()`.
    pub fn include_clause(&self, words: &[String]) -> String {
        let tokens: Vec<String> = words
            .iter()
            .flat_map(|word| self.expand_term(word))
            .collect();
        format!("({})", tokens.join(" OR "))
    }

    /// Build the space-separated exclusions.
    ///
    /// `raw` is split on commas without trimming, so an empty string still
    /// yields one (empty) token rendered as `-""`.
    pub fn exclude_clause(&self, raw: &str, only_non_required: bool) -> String {
        let mut words: Vec<&str> = raw.split(',').collect();

        if only_non_required {
            words.extend(self.default_exclude_keys.iter().map(|k| k.as_str()));
        }

        let tokens: Vec<String> = words
            .into_iter()
            .flat_map(|word| self.expand_exclusion(word))
            .collect();
        tokens.join(" ")
    }

    /// Build the final query string.
    pub fn build(&self, state: &SelectionState) -> String {
        let mut parts = Vec::new();

        if state.only_verified() {
            parts.push(VERIFIED_TOKEN.to_string());
        }

        parts.push(state.city().to_string());
        parts.push(self.include_clause(state.include_words()));
        parts.push(self.exclude_clause(state.exclude_words(), state.only_non_required()));

        if state.only_verified() {
            parts.push(NOT_VERIFIED_TOKEN.to_string());
        }

        parts.join(" ")
    }

    /// Build the search URL: `<base>?q=<query>&f=live`, form-urlencoded.
    pub fn search_url(&self, query: &str) -> String {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .append_pair("f", RESULT_FILTER)
            .finish();
        format!("{}?{}", self.search_base, params)
    }

    /// Build one query per city, sharing the rest of the selection.
    pub fn city_queries(&self, state: &SelectionState, cities: &[String]) -> Vec<(String, String)> {
        cities
            .iter()
            .map(|city| {
                let scoped = state.clone().with_city(city);
                (scoped.city().to_string(), self.build(&scoped))
            })
            .collect()
    }
}
