//! Keyword expansion table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a canonical keyword to the tokens it expands into.
///
/// Expansion tokens are emitted verbatim, so entries used as exclusions carry
/// their own search syntax (e.g. `-"required"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermMapping {
    entries: BTreeMap<String, Vec<String>>,
}

impl TermMapping {
    /// Create an empty mapping.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace the expansion for `key`.
    pub fn with(mut self, key: &str, tokens: &[&str]) -> Self {
        self.entries.insert(
            key.to_string(),
            tokens.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Expansion tokens for an exact key match.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for TermMapping {
    fn default() -> Self {
        Self::empty()
            .with("Beds", &["bed", "beds"])
            .with("Ventilators", &["ventilator", "ventilators"])
            .with("require", &[r#"-"required""#, r#"-"require""#, r#"-"requires""#])
            .with("need", &[r#"-"needs""#, r#"-"need""#, r#"-"needed""#])
            .with(
                "want",
                &[r#"-"wants""#, r#"-"want""#, r#"-"wanted""#, r#"-"wanting""#],
            )
    }
}
