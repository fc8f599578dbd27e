//! Workout plans
//!
//! Two blobs share the same per-day plan shape: `weeklyPlan` (the weekday
//! planner, exercises carry a `completed` flag) and `workoutPlans` (plans
//! saved by name of day). Exercise fields this crate does not read, such as
//! rounds, weights or superset tags, are kept as stored.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::store::{self, LogStore, WEEKLY_PLAN_KEY, WORKOUT_PLANS_KEY};

/// Planner days, in display order
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid day key")]
    InvalidDay,
    #[error("Exercise #{0} is missing a name.")]
    MissingName(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlannedExercise {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }
}

/// Exercises planned for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub workout: Vec<PlannedExercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DayPlan {
    pub fn from_names<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            workout: names.into_iter().map(|n| PlannedExercise::new(n.as_ref())).collect(),
            extra: Map::new(),
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        match self.workout.iter().position(|ex| ex.name.trim().is_empty()) {
            Some(i) => Err(PlanError::MissingName(i + 1)),
            None => Ok(()),
        }
    }
}

/// Plans keyed by day name
pub type WeeklyPlan = BTreeMap<String, DayPlan>;

fn check_day(day: &str) -> Result<(), PlanError> {
    if day.trim().is_empty() {
        Err(PlanError::InvalidDay)
    } else {
        Ok(())
    }
}

/// Days in planner order: weekdays first, any other keys after
pub fn ordered_days(plan: &WeeklyPlan) -> Vec<(&str, &DayPlan)> {
    let mut days: Vec<(&str, &DayPlan)> = WEEKDAYS
        .iter()
        .filter_map(|day| plan.get_key_value(*day).map(|(k, v)| (k.as_str(), v)))
        .collect();
    days.extend(
        plan.iter()
            .filter(|(k, _)| !WEEKDAYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v)),
    );
    days
}

// Weekly planner

/// Weekly plan; unreadable data yields an empty plan
pub fn load_weekly_plan<S: LogStore + ?Sized>(store: &S) -> WeeklyPlan {
    store::load_or_default(store, WEEKLY_PLAN_KEY)
}

/// Replace one day of the weekly plan
pub fn save_day_plan<S: LogStore + ?Sized>(store: &S, day: &str, plan: DayPlan) -> Result<()> {
    check_day(day)?;
    plan.validate()?;
    let mut week: WeeklyPlan = store::load_for_update(store, WEEKLY_PLAN_KEY)?;
    week.insert(day.to_string(), plan);
    store::save(store, WEEKLY_PLAN_KEY, &week)?;
    info!("Saved weekly plan for {}", day);
    Ok(())
}

/// Set the completed flag of one exercise; returns false when there is no such exercise
pub fn mark_completed<S: LogStore + ?Sized>(store: &S, day: &str, index: usize, done: bool) -> Result<bool> {
    check_day(day)?;
    let mut week: WeeklyPlan = store::load_for_update(store, WEEKLY_PLAN_KEY)?;
    let Some(exercise) = week.get_mut(day).and_then(|p| p.workout.get_mut(index)) else {
        return Ok(false);
    };
    exercise.completed = Some(done);
    store::save(store, WEEKLY_PLAN_KEY, &week)?;
    Ok(true)
}

// Saved workout plans

pub fn save_workout_plan<S: LogStore + ?Sized>(store: &S, day: &str, plan: DayPlan) -> Result<()> {
    check_day(day)?;
    let mut plans: WeeklyPlan = store::load_for_update(store, WORKOUT_PLANS_KEY)?;
    plans.insert(day.to_string(), plan);
    store::save(store, WORKOUT_PLANS_KEY, &plans)?;
    info!("Saved workout plan for {}", day);
    Ok(())
}

pub fn load_workout_plan<S: LogStore + ?Sized>(store: &S, day: &str) -> Option<DayPlan> {
    if check_day(day).is_err() {
        return None;
    }
    all_workout_plans(store).remove(day)
}

/// Remove a saved plan; returns whether one was stored
pub fn delete_workout_plan<S: LogStore + ?Sized>(store: &S, day: &str) -> Result<bool> {
    check_day(day)?;
    let mut plans: WeeklyPlan = store::load_for_update(store, WORKOUT_PLANS_KEY)?;
    if plans.remove(day).is_none() {
        return Ok(false);
    }
    store::save(store, WORKOUT_PLANS_KEY, &plans)?;
    info!("Deleted workout plan for {}", day);
    Ok(true)
}

/// Every saved plan; unreadable data yields none
pub fn all_workout_plans<S: LogStore + ?Sized>(store: &S) -> WeeklyPlan {
    match store::load_for_update(store, WORKOUT_PLANS_KEY) {
        Ok(plans) => plans,
        Err(e) => {
            error!("Failed to fetch all workout plans: {:#}", e);
            WeeklyPlan::new()
        }
    }
}
