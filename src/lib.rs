//! habitstack - Local recovery protocol and habit tracker
//!
//! Daily habits, mood and protocol values (cold plunge, red light, sauna,
//! peptides, grounding) live in a key-value store as one JSON blob; the
//! stats module turns a snapshot of it into streaks, weekly summaries,
//! chart series and journal views. Workout plans and the weekly tracker
//! history live under their own keys in the same store.

pub mod config;
pub mod entry;
pub mod habits;
pub mod planner;
pub mod plans;
pub mod profile;
pub mod quotes;
pub mod stats;
pub mod store;
pub mod tracker;
pub mod weekly_tracker;

pub use config::TrackerContext;
pub use entry::{DayEntry, HabitLog, ProtocolValue};
pub use stats::HabitAnalytics;
pub use store::{LogStore, MemoryStore, SqliteStore};
pub use tracker::HabitTracker;
