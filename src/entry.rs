//! Habit log data model
//!
//! The stored `habitLog` blob is loosely typed JSON: a map of ISO dates to
//! day records whose protocol fields may be numbers, numeric strings or
//! nested records. Everything is resolved into typed values here, once,
//! so aggregation code never has to sniff JSON shapes. Anything the typed
//! model does not read is kept and written back as stored.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::habits::Mood;

/// Date key format used by the store
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display sentinel for missing values
pub const NOT_LOGGED: &str = "Not logged";

/// One protocol value as stored in a day entry
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolValue {
    Number(Number),
    Text(String),
    /// Nested record, e.g. `{"duration": "20", "temp": 180}`
    Structured(Map<String, Value>),
    /// Booleans and lists, kept as stored
    Other(Value),
    Absent,
}

impl ProtocolValue {
    /// Numeric value; whole numbers are stored as integers, non-finite input is `Absent`
    pub fn number(n: f64) -> Self {
        if n.fract() == 0.0 && n.abs() < 1e15 {
            return ProtocolValue::Number(Number::from(n as i64));
        }
        Number::from_f64(n)
            .map(ProtocolValue::Number)
            .unwrap_or(ProtocolValue::Absent)
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ProtocolValue::Absent,
            Value::Number(n) => ProtocolValue::Number(n.clone()),
            Value::String(s) => ProtocolValue::Text(s.clone()),
            Value::Object(map) => ProtocolValue::Structured(map.clone()),
            other => ProtocolValue::Other(other.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ProtocolValue::Number(n) => Value::Number(n.clone()),
            ProtocolValue::Text(s) => Value::String(s.clone()),
            ProtocolValue::Structured(map) => Value::Object(map.clone()),
            ProtocolValue::Other(value) => value.clone(),
            ProtocolValue::Absent => Value::Null,
        }
    }

    /// Chart policy: numbers and numeric strings, everything else is 0
    pub fn as_chart_number(&self) -> f64 {
        let n = match self {
            ProtocolValue::Number(n) => n.as_f64().unwrap_or(0.0),
            ProtocolValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        if n.is_finite() { n } else { 0.0 }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ProtocolValue::Absent)
    }

    /// Parse a value typed on the command line
    pub fn parse_input(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return ProtocolValue::Absent;
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => ProtocolValue::number(n),
            _ => ProtocolValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ProtocolValue {
    /// Display policy: missing values render as "Not logged"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolValue::Absent => write!(f, "{}", NOT_LOGGED),
            ProtocolValue::Structured(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, display_json(v)))
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
            other => write!(f, "{}", display_json(&other.to_json())),
        }
    }
}

/// Display text for a raw JSON value: strings unquoted, lists joined by ", "
pub(crate) fn display_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Array(items) => items.iter().map(display_json).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Format without a trailing ".0" for whole numbers
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn decode_habits(value: &Value) -> BTreeSet<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|h| !h.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn decode_mood(value: &Value) -> Option<Mood> {
    value.as_str().and_then(Mood::parse)
}

fn decode_notes(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Record for one calendar day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEntry {
    pub habits: BTreeSet<String>,
    pub mood: Option<Mood>,
    pub notes: Option<String>,
    /// All other keys: protocol fields and protocol records
    pub values: BTreeMap<String, ProtocolValue>,
    /// Stored JSON for `habits`/`mood`/`notes` and null fields. Written back
    /// unchanged while the typed field still decodes from it.
    extra: Map<String, Value>,
}

impl DayEntry {
    /// Decode a stored day record; malformed parts read as empty, never fatal
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            warn!("Day entry is not an object, treating as empty");
            return Self::default();
        };

        let mut entry = Self::default();
        for (key, val) in obj {
            match key.as_str() {
                "habits" => {
                    if !val.is_array() {
                        warn!("Habits for a day are not a list, kept as stored");
                    }
                    entry.habits = decode_habits(val);
                    entry.extra.insert(key.clone(), val.clone());
                }
                "mood" => {
                    entry.mood = decode_mood(val);
                    if entry.mood.is_none() && val.as_str().is_some_and(|s| !s.trim().is_empty()) {
                        warn!("Unknown mood {} kept as stored", val);
                    }
                    entry.extra.insert(key.clone(), val.clone());
                }
                "notes" => {
                    entry.notes = decode_notes(val);
                    entry.extra.insert(key.clone(), val.clone());
                }
                _ => match ProtocolValue::from_json(val) {
                    ProtocolValue::Absent => {
                        entry.extra.insert(key.clone(), val.clone());
                    }
                    pv => {
                        entry.values.insert(key.clone(), pv);
                    }
                },
            }
        }
        entry
    }

    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        for (key, val) in &self.extra {
            if !matches!(key.as_str(), "habits" | "mood" | "notes") {
                obj.insert(key.clone(), val.clone());
            }
        }

        match self.extra.get("habits") {
            Some(stored) if decode_habits(stored) == self.habits => {
                obj.insert("habits".to_string(), stored.clone());
            }
            stored if stored.is_some() || !self.habits.is_empty() => {
                obj.insert(
                    "habits".to_string(),
                    Value::Array(self.habits.iter().cloned().map(Value::String).collect()),
                );
            }
            _ => {}
        }

        match (self.extra.get("mood"), self.mood) {
            (Some(stored), mood) if decode_mood(stored) == mood => {
                obj.insert("mood".to_string(), stored.clone());
            }
            (_, Some(mood)) => {
                obj.insert("mood".to_string(), Value::String(mood.label().to_string()));
            }
            (_, None) => {}
        }

        match (self.extra.get("notes"), &self.notes) {
            (Some(stored), notes) if decode_notes(stored) == *notes => {
                obj.insert("notes".to_string(), stored.clone());
            }
            (_, Some(notes)) => {
                obj.insert("notes".to_string(), Value::String(notes.clone()));
            }
            (_, None) => {}
        }

        for (key, val) in &self.values {
            if !val.is_absent() {
                obj.insert(key.clone(), val.to_json());
            }
        }
        Value::Object(obj)
    }

    /// Field lookup; missing keys are `Absent`
    pub fn value(&self, key: &str) -> ProtocolValue {
        self.values.get(key).cloned().unwrap_or(ProtocolValue::Absent)
    }

    /// Store a protocol field; `Absent` removes it
    pub fn set_value(&mut self, key: &str, value: ProtocolValue) {
        self.extra.remove(key);
        if value.is_absent() {
            self.values.remove(key);
        } else {
            self.values.insert(key.to_string(), value);
        }
    }

    pub fn has_habits(&self) -> bool {
        !self.habits.is_empty()
    }
}

/// Date-keyed habit log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitLog {
    days: BTreeMap<NaiveDate, DayEntry>,
    /// Root keys that are not canonical dates, or whose value is not a record
    extra: Map<String, Value>,
}

impl HabitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the stored blob. Keys that are not ISO dates are kept aside
    /// and written back untouched.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                warn!("Habit log is not an object, starting empty");
            }
            return Self::default();
        };

        let mut log = Self::default();
        for (key, val) in obj {
            let date = NaiveDate::parse_from_str(key, DATE_FORMAT)
                .ok()
                .filter(|d| d.format(DATE_FORMAT).to_string() == *key);
            match date {
                Some(date) if val.is_object() => {
                    log.days.insert(date, DayEntry::from_json(val));
                }
                _ => {
                    warn!("Habit log key '{}' is not a dated record, kept as stored", key);
                    log.extra.insert(key.clone(), val.clone());
                }
            }
        }
        log
    }

    pub fn to_json(&self) -> Value {
        let mut obj = self.extra.clone();
        for (date, entry) in &self.days {
            obj.insert(date.format(DATE_FORMAT).to_string(), entry.to_json());
        }
        Value::Object(obj)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.days.get(&date)
    }

    /// Entry for a date, created on first write
    pub fn entry_mut(&mut self, date: NaiveDate) -> &mut DayEntry {
        let key = date.format(DATE_FORMAT).to_string();
        if self.extra.remove(&key).is_some() {
            warn!("Replacing malformed record stored under {}", key);
        }
        self.days.entry(date).or_default()
    }

    /// Days oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&NaiveDate, &DayEntry)> {
        self.days.iter()
    }

    pub fn latest(&self) -> Option<(&NaiveDate, &DayEntry)> {
        self.days.iter().next_back()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_decode_day_entry() {
        let entry = DayEntry::from_json(&json!({
            "habits": ["Workout", "Cold Plunge", "Workout"],
            "mood": "😄 Happy",
            "plungeDuration": "12",
            "plungeTemp": 48,
            "Sauna": {"duration": "20", "temp": 180},
            "notes": "felt great"
        }));

        assert_eq!(entry.habits.len(), 2);
        assert_eq!(entry.mood, Some(Mood::Happy));
        assert_eq!(entry.notes.as_deref(), Some("felt great"));
        assert_eq!(entry.value("plungeDuration"), ProtocolValue::Text("12".to_string()));
        assert_eq!(entry.value("plungeTemp"), ProtocolValue::number(48.0));
        match entry.value("Sauna") {
            ProtocolValue::Structured(map) => {
                assert_eq!(map.get("duration"), Some(&json!("20")));
                assert_eq!(map.get("temp"), Some(&json!(180)));
            }
            other => panic!("Expected structured value, got {:?}", other),
        }
        assert!(entry.value("saunaDuration").is_absent());
    }

    #[test]
    fn test_decode_malformed_entry() {
        let raw = json!({"habits": "Workout", "mood": 3, "plungeDuration": null});
        let entry = DayEntry::from_json(&raw);
        assert!(entry.habits.is_empty());
        assert_eq!(entry.mood, None);
        assert!(entry.values.is_empty());
        // Malformed fields are written back as they were
        assert_eq!(entry.to_json(), raw);

        assert_eq!(DayEntry::from_json(&json!("garbage")), DayEntry::default());
    }

    #[test]
    fn test_decode_log_keeps_undated_keys() {
        let raw = json!({
            "2024-01-02": {"habits": ["Workout"]},
            "yesterday": {"habits": ["Workout"]},
            "2024-1-5": {"habits": ["Workout"]},
            "2024-01-03": "skipped",
            "2024-01-01": {"habits": []}
        });
        let log = HabitLog::from_json(&raw);
        assert_eq!(log.len(), 2);
        assert!(log.get(date("2024-01-02")).unwrap().has_habits());
        assert_eq!(log.latest().map(|(d, _)| *d), Some(date("2024-01-02")));
        assert_eq!(log.to_json(), raw);
    }

    #[test]
    fn test_unknown_shapes_survive_edits() {
        let raw = json!({
            "habits": ["Workout", "Cold Plunge"],
            "Sauna": {"temp": 180, "done": true},
            "tags": ["a", "b"],
            "checked": false,
            "mood": "🙂 Calm",
            "notes": "  easy day "
        });
        let mut entry = DayEntry::from_json(&raw);
        assert_eq!(entry.mood, None);
        assert_eq!(entry.notes.as_deref(), Some("easy day"));
        assert_eq!(entry.value("tags"), ProtocolValue::Other(json!(["a", "b"])));
        assert_eq!(entry.value("tags").to_string(), "a, b");
        assert_eq!(entry.value("Sauna").to_string(), "done: true, temp: 180");
        assert_eq!(entry.to_json(), raw);

        entry.set_value("plungeDuration", ProtocolValue::number(3.0));
        let encoded = entry.to_json();
        assert_eq!(encoded["Sauna"], raw["Sauna"]);
        assert_eq!(encoded["tags"], raw["tags"]);
        assert_eq!(encoded["mood"], raw["mood"]);
        assert_eq!(encoded["plungeDuration"], json!(3));
    }

    #[test]
    fn test_typed_edits_replace_stored_fields() {
        let mut entry = DayEntry::from_json(&json!({"habits": ["Workout"], "mood": "happy", "notes": "x"}));
        entry.habits.insert("Grounding".to_string());
        entry.mood = Some(Mood::Tired);
        entry.notes = None;
        assert_eq!(
            entry.to_json(),
            json!({"habits": ["Grounding", "Workout"], "mood": "😩 Tired"})
        );

        // Mood cleared entirely
        entry.mood = None;
        assert!(entry.to_json().get("mood").is_none());
    }

    #[test]
    fn test_entry_mut_replaces_malformed_day() {
        let mut log = HabitLog::from_json(&json!({"2024-01-03": 7}));
        assert!(log.is_empty());
        log.entry_mut(date("2024-01-03")).habits.insert("Workout".to_string());
        assert_eq!(log.to_json(), json!({"2024-01-03": {"habits": ["Workout"]}}));
    }

    #[test]
    fn test_decode_non_object_log() {
        assert!(HabitLog::from_json(&json!([1, 2, 3])).is_empty());
        assert!(HabitLog::from_json(&Value::Null).is_empty());
    }

    #[test]
    fn test_encode_keeps_shapes() {
        let raw = json!({
            "2024-03-05": {
                "habits": ["Grounding"],
                "mood": "😩 Tired",
                "groundingDuration": 15,
                "redlightDuration": 7.5,
                "peptideType": "BPC-157",
                "Sauna": {"duration": "20"}
            }
        });
        let log = HabitLog::from_json(&raw);
        assert_eq!(log.to_json(), raw);
    }

    #[test]
    fn test_chart_number_policy() {
        assert_eq!(ProtocolValue::Text("12".into()).as_chart_number(), 12.0);
        assert_eq!(ProtocolValue::Text(" 4.5 ".into()).as_chart_number(), 4.5);
        assert_eq!(ProtocolValue::Text("cold".into()).as_chart_number(), 0.0);
        assert_eq!(ProtocolValue::Text("NaN".into()).as_chart_number(), 0.0);
        assert_eq!(ProtocolValue::Absent.as_chart_number(), 0.0);
        assert_eq!(ProtocolValue::Structured(Map::new()).as_chart_number(), 0.0);
        assert_eq!(ProtocolValue::Other(json!(true)).as_chart_number(), 0.0);
        assert_eq!(ProtocolValue::from_json(&json!(7.5)).as_chart_number(), 7.5);
    }

    #[test]
    fn test_display_policy() {
        assert_eq!(ProtocolValue::Absent.to_string(), NOT_LOGGED);
        assert_eq!(ProtocolValue::number(12.0).to_string(), "12");
        assert_eq!(ProtocolValue::number(2.5).to_string(), "2.5");
        assert_eq!(ProtocolValue::from_json(&json!(12.0)).to_string(), "12");
        assert!(ProtocolValue::number(f64::NAN).is_absent());
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(ProtocolValue::parse_input("10"), ProtocolValue::number(10.0));
        assert_eq!(ProtocolValue::parse_input("2.5"), ProtocolValue::from_json(&json!(2.5)));
        assert_eq!(ProtocolValue::parse_input("BPC-157"), ProtocolValue::Text("BPC-157".into()));
        assert!(ProtocolValue::parse_input("  ").is_absent());
    }
}
