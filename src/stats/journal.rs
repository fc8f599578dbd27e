//! Per-day journal view, one row per protocol

use crate::entry::{DayEntry, NOT_LOGGED, ProtocolValue, display_json};
use crate::habits::Protocol;

/// What the journal shows for one protocol
#[derive(Debug, Clone, PartialEq)]
pub enum JournalValue {
    Value(String),
    Fields(Vec<(String, String)>),
    NotLogged,
}

impl JournalValue {
    pub fn render(&self) -> String {
        match self {
            JournalValue::Value(v) => v.clone(),
            JournalValue::Fields(fields) => fields
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join(", "),
            JournalValue::NotLogged => NOT_LOGGED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JournalRow {
    pub protocol: Protocol,
    pub value: JournalValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
    pub rows: Vec<JournalRow>,
    pub notes: Option<String>,
}

impl Journal {
    /// Group one day entry by protocol, in the given order.
    ///
    /// The protocol-named key wins; otherwise the protocol's flat fields
    /// present on the entry are shown.
    pub fn from_entry(entry: &DayEntry, protocols: &[Protocol]) -> Self {
        let rows = protocols
            .iter()
            .map(|protocol| JournalRow {
                protocol: *protocol,
                value: group_protocol(entry, *protocol),
            })
            .collect();

        Self {
            rows,
            notes: entry.notes.clone(),
        }
    }

    pub fn get(&self, protocol: Protocol) -> Option<&JournalValue> {
        self.rows
            .iter()
            .find(|row| row.protocol == protocol)
            .map(|row| &row.value)
    }
}

fn group_protocol(entry: &DayEntry, protocol: Protocol) -> JournalValue {
    match entry.value(protocol.name()) {
        ProtocolValue::Absent => {}
        ProtocolValue::Structured(map) => {
            return JournalValue::Fields(map.iter().map(|(k, v)| (k.clone(), display_json(v))).collect());
        }
        other => return JournalValue::Value(other.to_string()),
    }

    let fields: Vec<(String, String)> = protocol
        .fields()
        .iter()
        .filter_map(|field| {
            let value = entry.value(field);
            (!value.is_absent()).then(|| (field.to_string(), value.to_string()))
        })
        .collect();

    if fields.is_empty() {
        JournalValue::NotLogged
    } else {
        JournalValue::Fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sauna_not_logged() {
        let entry = DayEntry::from_json(&json!({"habits": ["Workout"], "Cold Plunge": "5 min"}));
        let journal = Journal::from_entry(&entry, Protocol::all());
        assert_eq!(journal.get(Protocol::Sauna), Some(&JournalValue::NotLogged));
        assert_eq!(journal.get(Protocol::Sauna).unwrap().render(), "Not logged");
    }

    #[test]
    fn test_scalar_and_structured() {
        let entry = DayEntry::from_json(&json!({
            "Cold Plunge": {"duration": "3", "temp": 39},
            "Peptides": "BPC-157",
            "Red Light": 10,
            "notes": "slept 8h"
        }));
        let journal = Journal::from_entry(&entry, Protocol::all());

        assert_eq!(
            journal.get(Protocol::ColdPlunge),
            Some(&JournalValue::Fields(vec![
                ("duration".to_string(), "3".to_string()),
                ("temp".to_string(), "39".to_string()),
            ]))
        );
        assert_eq!(journal.get(Protocol::Peptides), Some(&JournalValue::Value("BPC-157".into())));
        assert_eq!(journal.get(Protocol::RedLight), Some(&JournalValue::Value("10".into())));
        assert_eq!(journal.notes.as_deref(), Some("slept 8h"));
    }

    #[test]
    fn test_flat_fields_fallback() {
        let entry = DayEntry::from_json(&json!({"plungeDuration": "4", "plungeTemp": 45}));
        let journal = Journal::from_entry(&entry, &[Protocol::ColdPlunge, Protocol::Grounding]);

        assert_eq!(journal.rows.len(), 2);
        assert_eq!(journal.rows[0].value.render(), "plungeDuration: 4, plungeTemp: 45");
        assert_eq!(journal.rows[1].value, JournalValue::NotLogged);
        assert_eq!(journal.notes, None);
    }

    #[test]
    fn test_order_follows_protocol_list() {
        let order = [Protocol::Sauna, Protocol::Workout];
        let journal = Journal::from_entry(&DayEntry::default(), &order);
        let got: Vec<_> = journal.rows.iter().map(|r| r.protocol).collect();
        assert_eq!(got, order.to_vec());
    }

    #[test]
    fn test_entry_untouched() {
        let entry = DayEntry::from_json(&json!({"Sauna": {"duration": "20"}}));
        let before = entry.clone();
        let _ = Journal::from_entry(&entry, Protocol::all());
        assert_eq!(entry, before);
    }
}
