//! Personalized plan generation through an external completion service
//!
//! The service itself (OpenAI, Gemini, ...) is injected; this module only
//! builds the prompt and applies the retry and fallback policy.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::entry::format_number;
use crate::profile::Profile;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_RETRIES: u32 = 2;

pub const EMPTY_REPLY: &str = "No suggestions returned.";
pub const FAILED_REPLY: &str = "Error generating suggestions.";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompletionError {
    #[error("HTTP error {0}")]
    Http(u16),
    #[error("authentication rejected")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Text-generation backend
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Plan prompt from profile facts and goals
pub fn build_plan_prompt(profile: &Profile, goals: &[String]) -> String {
    let num = |v: Option<f64>| v.map(format_number).unwrap_or_else(|| "unknown".to_string());
    let level = profile
        .fitness_level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let goals = if goals.is_empty() {
        "general health".to_string()
    } else {
        goals.join(", ")
    };

    format!(
        "Create a personalized health optimization and fitness strategy based on the following user profile:\n\
         \n\
         Name: {}\n\
         Age: {}\n\
         Height: {}\" (in inches)\n\
         Weight: {} lbs\n\
         Fitness Level: {}\n\
         Goals: {}\n\
         \n\
         Include:\n\
         - Workout split recommendation\n\
         - Nutrition or supplements\n\
         - Recovery tools (e.g. red light, cold plunge)\n\
         - Hormone/peptide optimization ideas (for research only)\n\
         - Encouragement quote\n",
        profile.name.trim(),
        num(profile.age),
        num(profile.height),
        num(profile.weight),
        level,
        goals,
    )
}

/// Retrying plan generator; always returns displayable text
pub struct PlanGenerator<C: CompletionService> {
    service: C,
    model: String,
    temperature: f32,
    retries: u32,
}

impl<C: CompletionService> PlanGenerator<C> {
    pub fn new(service: C) -> Self {
        Self {
            service,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            retries: DEFAULT_RETRIES,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub async fn generate(&self, profile: &Profile, goals: &[String]) -> String {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: build_plan_prompt(profile, goals),
            temperature: self.temperature,
        };

        let attempts = self.retries + 1;
        for attempt in 1..=attempts {
            match self.service.complete(&request).await {
                Ok(text) => {
                    let text = text.trim();
                    info!("Plan generated on attempt {}", attempt);
                    return if text.is_empty() {
                        EMPTY_REPLY.to_string()
                    } else {
                        text.to_string()
                    };
                }
                Err(e) => warn!("Completion attempt {}/{} failed: {}", attempt, attempts, e),
            }
        }

        FAILED_REPLY.to_string()
    }
}
