//! Tracker context passed explicitly to every aggregation

use chrono::{Local, NaiveDate};

use crate::habits::DEFAULT_ACTIVITIES;

/// Default summary/chart window in days
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Default store location
pub const DEFAULT_DB_PATH: &str = "habitstack.db";

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerContext {
    /// Last day of every window
    pub today: NaiveDate,
    pub window_days: usize,
    /// Activities offered as daily toggles, in display order
    pub activities: Vec<String>,
}

impl TrackerContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            window_days: DEFAULT_WINDOW_DAYS,
            activities: DEFAULT_ACTIVITIES.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Context for the local calendar day
    pub fn for_local_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_window(mut self, days: usize) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let ctx = TrackerContext::new(today);
        assert_eq!(ctx.window_days, 7);
        assert_eq!(ctx.activities.len(), DEFAULT_ACTIVITIES.len());
        assert_eq!(ctx.activities[0], "Workout");
    }

    #[test]
    fn test_context_builders() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let ctx = TrackerContext::new(today)
            .with_window(14)
            .with_activities(["Sauna", "Workout"]);
        assert_eq!(ctx.window_days, 14);
        assert_eq!(ctx.activities, vec!["Sauna".to_string(), "Workout".to_string()]);
    }
}
