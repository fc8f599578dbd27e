//! Habit tracker - read-modify-write operations on the stored log
//!
//! Every write loads the whole `habitLog` blob, changes one day and writes
//! the whole blob back. Two writers working at once lose updates; a single
//! writer is assumed.

use anyhow::Result;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::config::TrackerContext;
use crate::entry::{DATE_FORMAT, DayEntry, HabitLog, ProtocolValue};
use crate::habits::{Mood, find_activity};
use crate::stats::HabitAnalytics;
use crate::store::{self, HABIT_LOG_KEY, LogStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("unknown activity '{0}'")]
    UnknownActivity(String),
    #[error("'{0}' is not a protocol field")]
    ReservedField(String),
}

/// Tracker over an injected store
pub struct HabitTracker<S: LogStore> {
    store: S,
    ctx: TrackerContext,
}

impl<S: LogStore> HabitTracker<S> {
    pub fn new(store: S, ctx: TrackerContext) -> Self {
        Self { store, ctx }
    }

    pub fn context(&self) -> &TrackerContext {
        &self.ctx
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current log; unreadable data yields an empty log
    pub fn load(&self) -> HabitLog {
        HabitLog::from_json(&store::load_value(&self.store, HABIT_LOG_KEY))
    }

    fn save(&self, log: &HabitLog) -> Result<()> {
        store::save(&self.store, HABIT_LOG_KEY, &log.to_json())
    }

    /// Stored entry for a date, or an empty one
    pub fn entry(&self, date: NaiveDate) -> DayEntry {
        self.load().get(date).cloned().unwrap_or_default()
    }

    /// Flip an activity for a date; returns whether it is now checked
    pub fn toggle_activity(&self, date: NaiveDate, activity: &str) -> Result<bool> {
        let activity = find_activity(&self.ctx.activities, activity)
            .ok_or_else(|| TrackerError::UnknownActivity(activity.to_string()))?
            .to_string();

        let mut log = self.load();
        let entry = log.entry_mut(date);
        let checked = if entry.habits.remove(&activity) {
            false
        } else {
            entry.habits.insert(activity.clone());
            true
        };
        self.save(&log)?;

        info!(
            "{} {} on {}",
            if checked { "Checked" } else { "Unchecked" },
            activity,
            date.format(DATE_FORMAT)
        );
        Ok(checked)
    }

    pub fn set_mood(&self, date: NaiveDate, mood: Mood) -> Result<()> {
        let mut log = self.load();
        log.entry_mut(date).mood = Some(mood);
        self.save(&log)?;
        info!("Mood {} on {}", mood.label(), date.format(DATE_FORMAT));
        Ok(())
    }

    /// Set a protocol field; `Absent` removes it
    pub fn set_value(&self, date: NaiveDate, key: &str, value: ProtocolValue) -> Result<()> {
        if matches!(key, "habits" | "mood" | "notes") || key.trim().is_empty() {
            return Err(TrackerError::ReservedField(key.to_string()).into());
        }

        let mut log = self.load();
        log.entry_mut(date).set_value(key, value);
        self.save(&log)?;
        info!("Set {} on {}", key, date.format(DATE_FORMAT));
        Ok(())
    }

    pub fn set_notes(&self, date: NaiveDate, notes: Option<String>) -> Result<()> {
        let mut log = self.load();
        log.entry_mut(date).notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.save(&log)?;
        Ok(())
    }

    /// Snapshot analytics with this tracker's context
    pub fn analytics(&self) -> HabitAnalytics {
        HabitAnalytics::new(self.load(), self.ctx.clone())
    }

    /// Wipe every stored key
    pub fn clear_all(&self) -> Result<()> {
        self.store.clear()?;
        info!("Store cleared");
        Ok(())
    }
}
