//! Search session: selection state, history and navigation wired together.
//!
//! Mirrors the page controller: words are toggled, a city is picked and
//! "search" builds the query, records it and opens the result.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::history::{HistoryRecord, HistoryStore};
use crate::navigation::{NavigationOutcome, Navigator};
use crate::query::QueryBuilder;
use crate::selection::{SelectionState, MIN_CITY_LEN};
use crate::storage::KeyValueStore;

/// Query and URL for a selection, without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPreview {
    pub query: String,
    pub url: String,
}

/// What happened when a search ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub query: String,
    pub url: String,
    pub navigation: NavigationOutcome,
    /// Set when the search could not be written to history.
    pub history_error: Option<String>,
}

/// One interactive session.
pub struct SearchSession<S, N> {
    config: Config,
    builder: QueryBuilder,
    selection: SelectionState,
    history: Vec<HistoryRecord>,
    store: HistoryStore<S>,
    navigator: N,
    record_history: bool,
}

impl<S: KeyValueStore, N: Navigator> SearchSession<S, N> {
    /// Start a session with default selection and the saved history loaded.
    pub fn new(config: Config, store: S, navigator: N) -> Self {
        let store = HistoryStore::new(store).with_limit(config.history_limit);
        let history = store.load();
        debug!("Session started with {} history records", history.len());

        Self {
            builder: QueryBuilder::from_config(&config),
            selection: SelectionState::from_config(&config),
            config,
            history,
            store,
            navigator,
            record_history: true,
        }
    }

    /// Enable or disable writing history for searches in this session.
    pub fn set_record_history(&mut self, enabled: bool) {
        self.record_history = enabled;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// History as of the last load or search, newest first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Replace the selection with `f(current)`.
    pub fn update_selection(&mut self, f: impl FnOnce(SelectionState) -> SelectionState) {
        let current = std::mem::take(&mut self.selection);
        self.selection = f(current);
    }

    pub fn toggle_include(&mut self, word: &str) {
        self.update_selection(|s| s.toggle(word));
    }

    pub fn remove_include(&mut self, word: &str) {
        self.update_selection(|s| s.remove(word));
    }

    /// Handle the "add word" input: trimmed, ignored below two characters,
    /// otherwise toggled like a tag click. Returns whether it was applied.
    pub fn add_new_included_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.chars().count() < 2 {
            debug!("Ignoring short include word '{}'", word);
            return false;
        }
        self.toggle_include(word);
        true
    }

    pub fn clear_include_words(&mut self) {
        self.update_selection(SelectionState::clear_include_words);
    }

    pub fn set_exclude_words(&mut self, raw: &str) {
        self.update_selection(|s| s.with_exclude_words(raw));
    }

    pub fn set_only_verified(&mut self, enabled: bool) {
        self.update_selection(|s| s.with_only_verified(enabled));
    }

    pub fn set_only_non_required(&mut self, enabled: bool) {
        self.update_selection(|s| s.with_only_non_required(enabled));
    }

    pub fn set_city(&mut self, city: &str) {
        self.update_selection(|s| s.with_city(city));
    }

    /// Suggested words not currently included.
    pub fn suggestions(&self) -> Vec<&str> {
        self.config
            .suggested_words
            .iter()
            .filter(|w| !self.selection.contains(w))
            .map(|w| w.as_str())
            .collect()
    }

    /// Query and URL for the current selection.
    pub fn preview(&self) -> SearchPreview {
        let query = self.builder.build(&self.selection);
        let url = self.builder.search_url(&query);
        SearchPreview { query, url }
    }

    /// Run the search now.
    pub fn start_search(&mut self) -> Option<SearchOutcome> {
        self.start_search_at(Utc::now().timestamp_millis())
    }

    /// Run the search with an explicit timestamp.
    ///
    /// A city shorter than two characters makes this a silent no-op:
    /// nothing is built, recorded or opened. A failed history write is
    /// reported in the outcome and the search still opens.
    pub fn start_search_at(&mut self, now_millis: i64) -> Option<SearchOutcome> {
        if !self.selection.can_search() {
            debug!(
                "City '{}' shorter than {} characters, search skipped",
                self.selection.city(),
                MIN_CITY_LEN
            );
            return None;
        }

        let SearchPreview { query, url } = self.preview();
        info!("Search: {}", query);

        let mut history_error = None;
        if self.record_history {
            match self
                .store
                .record(self.selection.city(), &query, now_millis, &self.history)
            {
                Ok(records) => self.history = records,
                Err(e) => {
                    warn!("Failed to save search history: {}", e);
                    history_error = Some(e.to_string());
                }
            }
        }

        let navigation = self.navigator.open(&url);
        if let NavigationOutcome::Blocked(reason) = &navigation {
            warn!("Search URL was not opened: {}", reason);
        }

        Some(SearchOutcome {
            query,
            url,
            navigation,
            history_error,
        })
    }

    /// Handle a preset city pick. Searches right away when the
    /// `search_on_city_select` policy is on.
    pub fn select_city(&mut self, city: &str) -> Option<SearchOutcome> {
        self.set_city(city);
        if self.config.search_on_city_select {
            self.start_search()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::StorageError;
    use crate::history::HISTORY_KEY;
    use crate::storage::{MemoryStore, StorageResult};

    /// Remembers every URL it was asked to open.
    #[derive(Default)]
    struct RecordingNavigator {
        opened: RefCell<Vec<String>>,
        block: bool,
    }

    impl Navigator for &RecordingNavigator {
        fn open(&self, url: &str) -> NavigationOutcome {
            self.opened.borrow_mut().push(url.to_string());
            if self.block {
                NavigationOutcome::Blocked("popup blocked".to_string())
            } else {
                NavigationOutcome::Opened
            }
        }
    }

    /// Reads from a seeded map; every write fails.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    fn session(nav: &RecordingNavigator) -> SearchSession<MemoryStore, &RecordingNavigator> {
        SearchSession::new(Config::default(), MemoryStore::new(), nav)
    }

    #[test]
    fn default_session_query() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        session.set_city("Pune");

        assert_eq!(
            session.preview().query,
            r#"verified Pune (bed OR beds OR ventilator OR ventilators OR oxygen) -"" -"required" -"require" -"requires" -"needs" -"need" -"needed" -"wants" -"want" -"wanted" -"wanting" -"not verified""#
        );
    }

    #[test]
    fn search_records_and_opens() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        session.set_city("Mumbai");

        let outcome = session.start_search_at(42).unwrap();

        assert_eq!(outcome.navigation, NavigationOutcome::Opened);
        assert_eq!(nav.opened.borrow().as_slice(), [outcome.url.clone()]);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].city, "Mumbai");
        assert_eq!(session.history()[0].timestamp, 42);
        assert_eq!(session.history()[0].params, outcome.query);
    }

    #[test]
    fn failed_history_write_still_opens_search() {
        let nav = RecordingNavigator::default();
        let store = ReadOnlyStore(MemoryStore::new().with_entry(
            HISTORY_KEY,
            r#"[{"city":"Delhi","timestamp":5,"params":"Delhi (ICU)"}]"#,
        ));
        let mut session = SearchSession::new(Config::default(), store, &nav);
        let before = session.history().to_vec();
        session.set_city("Pune");

        let outcome = session.start_search_at(1).unwrap();

        assert_eq!(nav.opened.borrow().as_slice(), [outcome.url.clone()]);
        assert_eq!(outcome.navigation, NavigationOutcome::Opened);
        assert!(outcome.history_error.unwrap().contains("disk full"));
        assert_eq!(session.history(), before.as_slice());
    }

    #[test]
    fn successful_search_has_no_history_error() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        session.set_city("Pune");

        assert_eq!(session.start_search_at(1).unwrap().history_error, None);
    }

    #[test]
    fn short_city_is_silent_noop() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        session.set_city("P");

        assert_eq!(session.start_search_at(1), None);
        assert!(nav.opened.borrow().is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn blocked_navigation_is_not_fatal() {
        let nav = RecordingNavigator {
            block: true,
            ..Default::default()
        };
        let mut session = session(&nav);
        session.set_city("Agra");

        let outcome = session.start_search_at(7).unwrap();
        assert!(!outcome.navigation.is_opened());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn history_can_be_disabled() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        session.set_record_history(false);
        session.set_city("Agra");

        assert!(session.start_search_at(7).is_some());
        assert!(session.history().is_empty());
        assert_eq!(nav.opened.borrow().len(), 1);
    }

    #[test]
    fn session_loads_saved_history() {
        let nav = RecordingNavigator::default();
        let store = MemoryStore::new().with_entry(
            HISTORY_KEY,
            r#"[{"city":"Delhi","timestamp":5,"params":"Delhi (ICU)"}]"#,
        );
        let mut session = SearchSession::new(Config::default(), store, &nav);
        assert_eq!(session.history().len(), 1);

        session.set_city("Pune");
        session.start_search_at(10);
        let cities: Vec<&str> = session.history().iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Pune", "Delhi"]);
    }

    #[test]
    fn add_new_word_requires_two_chars() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);

        assert!(!session.add_new_included_word(" x "));
        assert!(session.add_new_included_word(" Plasma "));
        assert!(session.selection().contains("Plasma"));

        // Adding the same word again toggles it off.
        assert!(session.add_new_included_word("Plasma"));
        assert!(!session.selection().contains("Plasma"));
    }

    #[test]
    fn suggestions_exclude_active_words() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        assert!(!session.suggestions().contains(&"Beds"));
        // "oxygen" is active but the suggestion is "Oxygen".
        assert!(session.suggestions().contains(&"Oxygen"));

        session.toggle_include("ICU");
        assert!(!session.suggestions().contains(&"ICU"));
        session.remove_include("Beds");
        assert!(session.suggestions().contains(&"Beds"));
    }

    #[test]
    fn select_city_searches_when_policy_on() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);

        let outcome = session.select_city("Chennai");
        assert!(outcome.is_some());
        assert_eq!(session.selection().city(), "Chennai");
        assert_eq!(nav.opened.borrow().len(), 1);
    }

    #[test]
    fn select_city_only_sets_city_when_policy_off() {
        let nav = RecordingNavigator::default();
        let mut config = Config::default();
        config.search_on_city_select = false;
        let mut session = SearchSession::new(config, MemoryStore::new(), &nav);

        assert_eq!(session.select_city("Chennai"), None);
        assert_eq!(session.selection().city(), "Chennai");
        assert!(nav.opened.borrow().is_empty());
    }

    #[test]
    fn config_history_limit_applies() {
        let nav = RecordingNavigator::default();
        let mut config = Config::default();
        config.history_limit = 3;
        let mut session = SearchSession::new(config, MemoryStore::new(), &nav);
        session.set_city("Pune");

        for t in 0..5 {
            session.start_search_at(t);
        }
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history()[0].timestamp, 4);
    }

    #[test]
    fn flags_change_query() {
        let nav = RecordingNavigator::default();
        let mut session = session(&nav);
        session.clear_include_words();
        session.toggle_include("ICU");
        session.set_only_verified(false);
        session.set_only_non_required(false);
        session.set_exclude_words("fake, sold");
        session.set_city("Agra");

        assert_eq!(session.preview().query, r#"Agra (ICU) -"fake" -"sold""#);
    }
}
