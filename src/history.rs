//! Search history: a capped, newest-first log of generated queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageResult};

/// Storage key for the serialized history list.
pub const HISTORY_KEY: &str = "history";

/// Number of records retained by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One past search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub city: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// The generated query string.
    pub params: String,
}

impl HistoryRecord {
    pub fn new(city: &str, query: &str, timestamp: i64) -> Self {
        Self {
            city: city.to_string(),
            timestamp,
            params: query.to_string(),
        }
    }

    /// Timestamp as a UTC datetime (None if out of range).
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }
}

/// History persisted as a JSON array under a single key.
pub struct HistoryStore<S> {
    store: S,
    key: String,
    limit: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Create a history store over `store` with the default key and limit.
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: HISTORY_KEY.to_string(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Store under a different key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the saved history.
    ///
    /// Missing, unreadable or malformed data yields an empty list.
    pub fn load(&self) -> Vec<HistoryRecord> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved history under '{}'", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Ignoring malformed history: {}", e);
                Vec::new()
            }
        }
    }

    /// Record a search and persist the updated list.
    ///
    /// `current` is left untouched; the returned list is sorted newest first
    /// and truncated to the limit.
    pub fn record(
        &mut self,
        city: &str,
        query: &str,
        now_millis: i64,
        current: &[HistoryRecord],
    ) -> StorageResult<Vec<HistoryRecord>> {
        let mut records = current.to_vec();
        records.push(HistoryRecord::new(city, query, now_millis));
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(self.limit);

        let payload = serde_json::to_string(&records)?;
        self.store.set(&self.key, &payload)?;
        debug!("Recorded search for {} ({} in history)", city, records.len());

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn load_empty_store() {
        let history = HistoryStore::new(MemoryStore::new());
        assert!(history.load().is_empty());
    }

    #[test]
    fn load_invalid_json_is_empty() {
        let store = MemoryStore::new().with_entry(HISTORY_KEY, "{not json");
        assert!(HistoryStore::new(store).load().is_empty());
    }

    #[test]
    fn load_wrong_shape_is_empty() {
        let store = MemoryStore::new().with_entry(HISTORY_KEY, r#"{"city":"Pune"}"#);
        assert!(HistoryStore::new(store).load().is_empty());

        let store = MemoryStore::new().with_entry(HISTORY_KEY, r#"[{"city":"Pune"}]"#);
        assert!(HistoryStore::new(store).load().is_empty());
    }

    #[test]
    fn load_reads_persisted_format() {
        let store = MemoryStore::new().with_entry(
            HISTORY_KEY,
            r#"[{"city":"Pune","timestamp":1619000000000,"params":"Pune (ICU)"}]"#,
        );
        let records = HistoryStore::new(store).load();
        assert_eq!(records, vec![HistoryRecord::new("Pune", "Pune (ICU)", 1_619_000_000_000)]);
    }

    #[test]
    fn record_persists_and_returns_new_list() {
        let mut history = HistoryStore::new(MemoryStore::new());
        let current: Vec<HistoryRecord> = Vec::new();

        let records = history.record("Pune", "q1", 1_000, &current).unwrap();

        assert!(current.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(history.load(), records);

        let raw = history.store().get(HISTORY_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"city":"Pune","timestamp":1000,"params":"q1"}]"#);
    }

    #[test]
    fn record_sorts_newest_first() {
        let mut history = HistoryStore::new(MemoryStore::new());
        let current = vec![
            HistoryRecord::new("Agra", "a", 3_000),
            HistoryRecord::new("Delhi", "d", 1_000),
        ];

        let records = history.record("Pune", "p", 2_000, &current).unwrap();
        let cities: Vec<&str> = records.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Agra", "Pune", "Delhi"]);
    }

    #[test]
    fn record_keeps_ten_most_recent() {
        let mut history = HistoryStore::new(MemoryStore::new());
        let mut records = history.load();

        for i in 0..11 {
            records = history
                .record("Pune", &format!("q{}", i), 1_000 + i, &records)
                .unwrap();
        }

        assert_eq!(records.len(), 10);
        assert_eq!(records[0].timestamp, 1_010);
        assert_eq!(records[9].timestamp, 1_001);
        assert!(records.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
        assert_eq!(history.load(), records);
    }

    #[test]
    fn custom_limit_and_key() {
        let mut history = HistoryStore::new(MemoryStore::new())
            .with_limit(2)
            .with_key("searches");

        let mut records: Vec<HistoryRecord> = Vec::new();
        for i in 0..5 {
            records = history.record("Agra", "q", i, &records).unwrap();
        }

        assert_eq!(records.len(), 2);
        assert!(history.store().get(HISTORY_KEY).unwrap().is_none());
        assert!(history.store().get("searches").unwrap().is_some());
    }

    #[test]
    fn recorded_at_converts_millis() {
        let record = HistoryRecord::new("Pune", "q", 1_619_000_000_000);
        let at = record.recorded_at().unwrap();
        assert_eq!(at.timestamp_millis(), 1_619_000_000_000);
    }
}
