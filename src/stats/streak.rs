//! Streak calculation over the habit log

use chrono::NaiveDate;

use crate::entry::HabitLog;

/// Current and longest streak in days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
}

/// Streak badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    ThreeDays,
    SevenDays,
}

impl Milestone {
    pub fn message(&self) -> &'static str {
        match self {
            Milestone::ThreeDays => "🔥 3-Day Streak! Nice work! Keep it going!",
            Milestone::SevenDays => "🏆 7-Day Streak! You're crushing it. Milestone unlocked!",
        }
    }
}

impl Streak {
    /// Walk stored days from most recent.
    ///
    /// A blank most-recent day is skipped (today may not be over yet); any
    /// later blank day ends the walk. `longest` is the running maximum up to
    /// that break, so it never looks past it. Days missing from the log are
    /// not treated as blanks.
    pub fn from_log(log: &HabitLog) -> Self {
        let mut current = 0;
        let mut longest = 0;

        for (i, (_, entry)) in log.iter().rev().enumerate() {
            if entry.has_habits() {
                current += 1;
                longest = longest.max(current);
            } else if i == 0 {
                continue;
            } else {
                break;
            }
        }

        Self { current, longest }
    }

    /// Badge earned exactly at the current streak length
    pub fn milestone(&self) -> Option<Milestone> {
        match self.current {
            3 => Some(Milestone::ThreeDays),
            7 => Some(Milestone::SevenDays),
            _ => None,
        }
    }
}

/// Longest run of consecutive calendar days with habits anywhere in history.
///
/// Unlike `Streak::longest` this scans past breaks and counts a missing
/// date as a gap.
pub fn best_run(log: &HabitLog) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for (date, entry) in log.iter() {
        if !entry.has_habits() {
            run = 0;
            prev = None;
            continue;
        }
        run = match prev {
            Some(p) if p.succ_opt() == Some(*date) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(*date);
    }

    best
}
