//! Per-activity completion counts over a rolling window

use chrono::NaiveDate;

use super::window_dates;
use crate::entry::HabitLog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySummary {
    pub window_days: usize,
    /// (activity, days done) in activity order
    pub counts: Vec<(String, usize)>,
}

impl WeeklySummary {
    /// Count, for each activity, the days among the `window_days` ending
    /// `today` whose habits include it
    pub fn from_log(
        log: &HabitLog,
        activities: &[String],
        window_days: usize,
        today: NaiveDate,
    ) -> Self {
        let dates = window_dates(today, window_days);

        let counts = activities
            .iter()
            .map(|activity| {
                let days = dates
                    .iter()
                    .filter(|date| {
                        log.get(**date)
                            .is_some_and(|entry| entry.habits.contains(activity))
                    })
                    .count();
                (activity.clone(), days)
            })
            .collect();

        Self { window_days, counts }
    }

    pub fn get(&self, activity: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == activity)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Share of window days the activity was done, rounded to whole percent
    pub fn percent(&self, activity: &str) -> u32 {
        if self.window_days == 0 {
            return 0;
        }
        ((self.get(activity) as f64 / self.window_days as f64) * 100.0).round() as u32
    }

    /// Four-cell text bar: one cell per started quarter of the window (>0, 25, 50, 75 percent)
    pub fn bar(&self, activity: &str) -> &'static str {
        match self.percent(activity) {
            p if p >= 75 => "[++++]",
            p if p >= 50 => "[+++.]",
            p if p >= 25 => "[++..]",
            p if p > 0 => "[+...]",
            _ => "[....]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::DEFAULT_ACTIVITIES;
    use serde_json::json;

    fn activities() -> Vec<String> {
        DEFAULT_ACTIVITIES.iter().map(|a| a.to_string()).collect()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_log_all_zero() {
        let summary = WeeklySummary::from_log(&HabitLog::new(), &activities(), 7, day("2024-01-07"));
        assert_eq!(summary.counts.len(), 5);
        assert!(summary.counts.iter().all(|(_, n)| *n == 0));
        assert_eq!(summary.percent("Workout"), 0);
    }

    #[test]
    fn test_counts_within_window_only() {
        let log = HabitLog::from_json(&json!({
            "2023-12-31": {"habits": ["Workout"]},
            "2024-01-01": {"habits": ["Workout", "Grounding"]},
            "2024-01-04": {"habits": ["Workout"]},
            "2024-01-07": {"habits": ["Workout", "Cold Plunge"]},
            "2024-01-08": {"habits": ["Workout"]}
        }));
        let summary = WeeklySummary::from_log(&log, &activities(), 7, day("2024-01-07"));

        assert_eq!(summary.get("Workout"), 3);
        assert_eq!(summary.get("Grounding"), 1);
        assert_eq!(summary.get("Cold Plunge"), 1);
        assert_eq!(summary.get("Peptide Dose"), 0);
        assert_eq!(summary.percent("Workout"), 43);
        assert!(summary.counts.iter().all(|(_, n)| *n <= 7));
    }

    #[test]
    fn test_activity_order_preserved() {
        let summary = WeeklySummary::from_log(&HabitLog::new(), &activities(), 7, day("2024-01-07"));
        let names: Vec<_> = summary.counts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, DEFAULT_ACTIVITIES.to_vec());
    }

    #[test]
    fn test_zero_window() {
        let log = HabitLog::from_json(&json!({"2024-01-07": {"habits": ["Workout"]}}));
        let summary = WeeklySummary::from_log(&log, &activities(), 0, day("2024-01-07"));
        assert_eq!(summary.get("Workout"), 0);
        assert_eq!(summary.percent("Workout"), 0);
    }

    #[test]
    fn test_bar_buckets() {
        let log = HabitLog::from_json(&json!({
            "2024-01-06": {"habits": ["Workout"]},
            "2024-01-07": {"habits": ["Workout"]}
        }));
        let summary = WeeklySummary::from_log(&log, &activities(), 2, day("2024-01-07"));
        assert_eq!(summary.bar("Workout"), "[++++]");
        assert_eq!(summary.bar("Grounding"), "[....]");
    }
}
