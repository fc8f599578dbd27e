//! Stats module - aggregations over a habit log snapshot
//!
//! Features:
//! - Current/longest streaks and milestone badges
//! - Per-activity counts over a rolling window
//! - Numeric series for trend charts
//! - Journal grouping of one day by protocol
//! - Completion rollup of the weekly workout plan
//!
//! Everything here is a pure function of the snapshot and the context.

pub mod journal;
pub mod progress;
pub mod series;
pub mod streak;
pub mod weekly;

pub use journal::{Journal, JournalRow, JournalValue};
pub use progress::{DayProgress, weekly_progress};
pub use series::{Series, peptide_notes};
pub use streak::{Milestone, Streak, best_run};
pub use weekly::WeeklySummary;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::config::TrackerContext;
use crate::entry::{DayEntry, HabitLog, NOT_LOGGED, ProtocolValue};
use crate::habits::{Mood, Protocol};

/// The `n` calendar days ending `today`, oldest first.
///
/// Never reaches before `NaiveDate::MIN`, so the result is shorter than `n`
/// only when the window would start earlier than that.
pub fn window_dates(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let reachable = today.signed_duration_since(NaiveDate::MIN).num_days() as u64 + 1;
    let n = (n as u64).min(reachable);
    (0..n)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect()
}

/// One row of the recent-history list
#[derive(Debug, Clone, PartialEq)]
pub struct RecentDay {
    pub date: NaiveDate,
    pub habits: Vec<String>,
    pub mood: Option<Mood>,
}

impl RecentDay {
    pub fn habits_display(&self) -> String {
        if self.habits.is_empty() {
            "None".to_string()
        } else {
            self.habits.join(", ")
        }
    }

    pub fn mood_display(&self) -> &'static str {
        self.mood.map(|m| m.label()).unwrap_or(NOT_LOGGED)
    }
}

/// Most recent `limit` stored days, newest first
pub fn recent_days(log: &HabitLog, limit: usize) -> Vec<RecentDay> {
    log.iter()
        .rev()
        .take(limit)
        .map(|(date, entry)| RecentDay {
            date: *date,
            habits: entry.habits.iter().cloned().collect(),
            mood: entry.mood,
        })
        .collect()
}

/// One-line summary of the most recent day's protocols
pub fn latest_activity(log: &HabitLog) -> String {
    let Some((_, entry)) = log.latest() else {
        return "No activity logged yet.".to_string();
    };

    let parts = activity_parts(entry);
    if parts.is_empty() {
        "No activity logged yet.".to_string()
    } else {
        parts.join("   ")
    }
}

fn activity_parts(entry: &DayEntry) -> Vec<String> {
    let logged = |key: &str| -> Option<ProtocolValue> {
        match entry.value(key) {
            ProtocolValue::Absent => None,
            ProtocolValue::Number(n) if n.as_f64() == Some(0.0) => None,
            ProtocolValue::Text(s) if s.trim().is_empty() => None,
            other => Some(other),
        }
    };

    let mut parts = Vec::new();
    if logged("workoutNotes").is_some() {
        parts.push(format!("{} Workout", Protocol::Workout.emoji()));
    }
    if let Some(v) = logged("plungeDuration") {
        parts.push(format!("{} Plunge ({} min)", Protocol::ColdPlunge.emoji(), v));
    }
    if let Some(v) = logged("redlightDuration") {
        parts.push(format!("{} Red Light ({} min)", Protocol::RedLight.emoji(), v));
    }
    if let Some(v) = logged("peptideType") {
        parts.push(format!("{} Peptide ({})", Protocol::Peptides.emoji(), v));
    }
    if let Some(v) = logged("groundingDuration") {
        parts.push(format!("{} Grounding ({} min)", Protocol::Grounding.emoji(), v));
    }
    if let Some(v) = logged("saunaDuration") {
        parts.push(format!("{} Sauna ({} min)", Protocol::Sauna.emoji(), v));
    }
    parts
}

/// Habit analytics over one log snapshot
pub struct HabitAnalytics {
    log: HabitLog,
    ctx: TrackerContext,
}

impl HabitAnalytics {
    pub fn new(log: HabitLog, ctx: TrackerContext) -> Self {
        debug!("Analytics over {} days (window {})", log.len(), ctx.window_days);
        Self { log, ctx }
    }

    pub fn log(&self) -> &HabitLog {
        &self.log
    }

    pub fn streak(&self) -> Streak {
        Streak::from_log(&self.log)
    }

    pub fn best_run(&self) -> u32 {
        best_run(&self.log)
    }

    pub fn weekly_summary(&self) -> WeeklySummary {
        WeeklySummary::from_log(&self.log, &self.ctx.activities, self.ctx.window_days, self.ctx.today)
    }

    pub fn series(&self, field: &str) -> Series {
        Series::extract(&self.log, field, self.ctx.window_days, self.ctx.today)
    }

    pub fn peptide_notes(&self) -> Vec<String> {
        peptide_notes(&self.log, self.ctx.window_days, self.ctx.today)
    }

    /// Journal for a date; a missing day shows every protocol as not logged
    pub fn journal(&self, date: NaiveDate) -> Journal {
        match self.log.get(date) {
            Some(entry) => Journal::from_entry(entry, Protocol::all()),
            None => Journal::from_entry(&DayEntry::default(), Protocol::all()),
        }
    }

    pub fn recent_days(&self, limit: usize) -> Vec<RecentDay> {
        recent_days(&self.log, limit)
    }

    pub fn latest_activity(&self) -> String {
        latest_activity(&self.log)
    }
}
