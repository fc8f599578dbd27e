//! Completion rollup over the weekly plan

use crate::plans::{DayPlan, WeeklyPlan, ordered_days};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayProgress {
    pub day: String,
    pub total: usize,
    pub completed: usize,
    /// Rounded share of completed exercises, 0 when nothing is planned
    pub percent: u32,
}

impl DayProgress {
    pub fn from_plan(day: &str, plan: &DayPlan) -> Self {
        let total = plan.workout.len();
        let completed = plan.workout.iter().filter(|ex| ex.is_completed()).count();
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            day: day.to_string(),
            total,
            completed,
            percent,
        }
    }
}

/// One row per planned day, weekdays in order
pub fn weekly_progress(plan: &WeeklyPlan) -> Vec<DayProgress> {
    ordered_days(plan)
        .into_iter()
        .map(|(day, plan)| DayProgress::from_plan(day, plan))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weekly_progress() {
        let week: WeeklyPlan = serde_json::from_value(json!({
            "Wednesday": {"workout": [
                {"name": "Squat", "completed": true},
                {"name": "Lunge", "completed": true},
                {"name": "Plank"}
            ]},
            "Monday": {"workout": []},
            "Friday": {}
        }))
        .unwrap();

        let rows = weekly_progress(&week);
        let days: Vec<_> = rows.iter().map(|r| r.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Wednesday", "Friday"]);

        assert_eq!(rows[0].percent, 0);
        assert_eq!(rows[1].total, 3);
        assert_eq!(rows[1].completed, 2);
        assert_eq!(rows[1].percent, 67);
        assert_eq!(rows[2], DayProgress { day: "Friday".into(), total: 0, completed: 0, percent: 0 });
    }

    #[test]
    fn test_empty_plan() {
        assert!(weekly_progress(&WeeklyPlan::new()).is_empty());
    }
}
