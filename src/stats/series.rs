//! Fixed-length numeric series for trend charts

use chrono::NaiveDate;

use super::window_dates;
use crate::entry::HabitLog;

/// Chart-ready series, oldest to newest
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub field: String,
    /// "MM-DD" axis labels
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    /// Extract `field` for each of the `window_days` ending `today`.
    /// Missing or non-numeric values become 0 since charts cannot show gaps.
    pub fn extract(log: &HabitLog, field: &str, window_days: usize, today: NaiveDate) -> Self {
        let dates = window_dates(today, window_days);

        let values = dates
            .iter()
            .map(|date| {
                log.get(*date)
                    .map(|entry| entry.value(field).as_chart_number())
                    .unwrap_or(0.0)
            })
            .collect();

        Self {
            field: field.to_string(),
            labels: labels(&dates),
            values,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Dates truncated to "MM-DD"
pub fn labels(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().map(|d| d.format("%m-%d").to_string()).collect()
}

/// "• MM-DD: <type>" lines for window days with a peptide logged
pub fn peptide_notes(log: &HabitLog, window_days: usize, today: NaiveDate) -> Vec<String> {
    window_dates(today, window_days)
        .into_iter()
        .filter_map(|date| {
            let entry = log.get(date)?;
            let value = entry.value("peptideType");
            if value.is_absent() {
                return None;
            }
            let text = value.to_string();
            if text.trim().is_empty() {
                return None;
            }
            Some(format!("• {}: {}", date.format("%m-%d"), text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_log_zero_series() {
        let series = Series::extract(&HabitLog::new(), "plungeDuration", 7, day("2024-01-07"));
        assert_eq!(series.values, vec![0.0; 7]);
        assert_eq!(series.labels.len(), 7);
        assert_eq!(series.labels[0], "01-01");
        assert_eq!(series.labels[6], "01-07");
    }

    #[test]
    fn test_numeric_string_parsed() {
        let log = HabitLog::from_json(&json!({"2024-01-07": {"plungeDuration": "12"}}));
        let series = Series::extract(&log, "plungeDuration", 3, day("2024-01-07"));
        assert_eq!(series.values, vec![0.0, 0.0, 12.0]);
    }

    #[test]
    fn test_sparse_and_malformed_values() {
        let log = HabitLog::from_json(&json!({
            "2024-01-05": {"saunaDuration": 20},
            "2024-01-06": {"saunaDuration": "long"},
            "2024-01-07": {"saunaDuration": {"minutes": 15}},
            "2024-02-01": {"saunaDuration": 99}
        }));
        let series = Series::extract(&log, "saunaDuration", 5, day("2024-01-07"));
        assert_eq!(series.values, vec![0.0, 0.0, 20.0, 0.0, 0.0]);
        assert_eq!(series.total(), 20.0);
        assert_eq!(series.max(), 20.0);
    }

    #[test]
    fn test_length_matches_window() {
        let log = HabitLog::from_json(&json!({"2024-01-07": {"plungeTemp": 50}}));
        for n in [0, 1, 7, 30] {
            let series = Series::extract(&log, "plungeTemp", n, day("2024-01-07"));
            assert_eq!(series.values.len(), n);
            assert_eq!(series.labels.len(), n);
        }
    }

    #[test]
    fn test_window_crosses_year() {
        let series = Series::extract(&HabitLog::new(), "plungeTemp", 3, day("2024-01-01"));
        assert_eq!(series.labels, vec!["12-30", "12-31", "01-01"]);
    }

    #[test]
    fn test_peptide_notes() {
        let log = HabitLog::from_json(&json!({
            "2024-01-05": {"peptideType": "BPC-157"},
            "2024-01-06": {"peptideType": ""},
            "2024-01-07": {"habits": ["Workout"]}
        }));
        let notes = peptide_notes(&log, 7, day("2024-01-07"));
        assert_eq!(notes, vec!["• 01-05: BPC-157".to_string()]);
    }
}
