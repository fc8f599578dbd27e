//! Weekly tracker history
//!
//! `weeklyTracker` is a list of `{date, data}` records, where `data` maps a
//! metric name to whatever was entered for it. Listed newest first.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entry::display_json;
use crate::store::{self, LogStore, WEEKLY_TRACKER_KEY};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl TrackerRecord {
    /// Timestamp of the record; accepts RFC 3339 or a bare `YYYY-MM-DD`
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.date.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
    }

    /// `key: value` lines in key order
    pub fn metrics(&self) -> Vec<String> {
        self.data
            .iter()
            .map(|(k, v)| format!("{}: {}", k, display_json(v)))
            .collect()
    }
}

/// Newest first; records with unreadable dates go last, in stored order
pub fn sort_newest_first(records: &mut [TrackerRecord]) {
    records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
}

/// Stored history, newest first; unreadable data yields no records
pub fn load_tracker_history<S: LogStore + ?Sized>(store: &S) -> Vec<TrackerRecord> {
    let mut records: Vec<TrackerRecord> = store::load_or_default(store, WEEKLY_TRACKER_KEY);
    sort_newest_first(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_history_newest_first() {
        let store = MemoryStore::new();
        let raw = json!([
            {"date": "2024-03-01", "data": {"sleep": 7}},
            {"date": "someday", "data": {}},
            {"date": "2024-03-04T06:30:00.000Z", "data": {"sleep": "8", "tags": ["rest"]}},
            {"date": "2024-03-02", "data": {"steps": 9000.5}}
        ]);
        store::save(&store, WEEKLY_TRACKER_KEY, &raw).unwrap();

        let history = load_tracker_history(&store);
        let dates: Vec<_> = history.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-04T06:30:00.000Z", "2024-03-02", "2024-03-01", "someday"]);
        assert_eq!(history[0].metrics(), vec!["sleep: 8", "tags: rest"]);
        assert_eq!(history[1].metrics(), vec!["steps: 9000.5"]);
    }

    #[test]
    fn test_missing_or_corrupt_history() {
        let store = MemoryStore::new();
        assert!(load_tracker_history(&store).is_empty());

        store.set(WEEKLY_TRACKER_KEY, "{\"date\": 1}").unwrap();
        assert!(load_tracker_history(&store).is_empty());
    }
}
