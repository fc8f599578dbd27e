//! Body profile and goals

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::info;

use crate::store::{self, GOALS_KEY, LogStore, PROFILE_KEY};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
    Athlete,
}

impl FitnessLevel {
    pub fn all() -> &'static [FitnessLevel] {
        &[
            FitnessLevel::Beginner,
            FitnessLevel::Intermediate,
            FitnessLevel::Advanced,
            FitnessLevel::Athlete,
        ]
    }

    pub fn parse(raw: &str) -> Option<FitnessLevel> {
        let raw = raw.trim();
        Self::all()
            .iter()
            .copied()
            .find(|l| l.to_string().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
            FitnessLevel::Athlete => "Athlete",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter a valid age.")]
    InvalidAge,
    #[error("Please enter a valid height in inches.")]
    InvalidHeight,
    #[error("Please enter a valid weight in lbs.")]
    InvalidWeight,
    #[error("Please select your fitness level.")]
    MissingFitnessLevel,
}

/// User body profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub age: Option<f64>,
    /// Inches
    #[serde(deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    /// Pounds
    #[serde(deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
    #[serde(deserialize_with = "lenient_level")]
    pub fitness_level: Option<FitnessLevel>,
}

impl Profile {
    /// Name and fitness level required; body numbers optional but positive
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::MissingName);
        }
        if !positive_or_unset(self.age) {
            return Err(ProfileError::InvalidAge);
        }
        if !positive_or_unset(self.height) {
            return Err(ProfileError::InvalidHeight);
        }
        if !positive_or_unset(self.weight) {
            return Err(ProfileError::InvalidWeight);
        }
        if self.fitness_level.is_none() {
            return Err(ProfileError::MissingFitnessLevel);
        }
        Ok(())
    }
}

fn positive_or_unset(value: Option<f64>) -> bool {
    value.is_none_or(|v| v.is_finite() && v > 0.0)
}

/// Numbers arrive as JSON numbers or as strings typed into a form.
/// Blank strings mean unset; other strings that do not parse become NaN so
/// validation rejects them.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        _ => None,
    })
}

fn lenient_level<'de, D>(deserializer: D) -> Result<Option<FitnessLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(FitnessLevel::parse))
}

/// Stored profile, or an empty one
pub fn load_profile<S: LogStore + ?Sized>(store: &S) -> Profile {
    store::load_or_default(store, PROFILE_KEY)
}

/// Validate then save
pub fn save_profile<S: LogStore + ?Sized>(store: &S, profile: &Profile) -> Result<()> {
    profile.validate()?;
    store::save(store, PROFILE_KEY, profile)?;
    info!("Profile saved for {}", profile.name);
    Ok(())
}

pub fn load_goals<S: LogStore + ?Sized>(store: &S) -> Vec<String> {
    store::load_or_default(store, GOALS_KEY)
}

/// Save goals, dropping blanks and duplicates
pub fn save_goals<S: LogStore + ?Sized>(store: &S, goals: &[String]) -> Result<Vec<String>> {
    let mut cleaned: Vec<String> = Vec::new();
    for goal in goals {
        let goal = goal.trim();
        if !goal.is_empty() && !cleaned.iter().any(|g| g == goal) {
            cleaned.push(goal.to_string());
        }
    }
    store::save(store, GOALS_KEY, &cleaned)?;
    Ok(cleaned)
}
