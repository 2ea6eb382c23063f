//! Short motivational messages from a hosted language model.
//!
//! Generation is best effort. Callers go through [`motivate_or_fallback`]
//! and [`identity_motivation_or_fallback`], which never fail: any error is
//! logged and replaced by a static message.

pub mod credentials;
mod gemini;

pub use gemini::GeminiClient;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MotivationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationMessage {
    pub message: String,
}

/// Input for the identity-reinforcing prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMotivationRequest {
    pub habit_name: String,
    pub identity_statement: String,
    pub evidence_count: usize,
    /// 1..=5
    pub alignment_score: u8,
}

/// Either a generated message or the fallback that replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivation {
    pub title: String,
    pub message: String,
    pub generated: bool,
}

pub trait MotivationGenerator {
    fn generate_motivation_message(
        &self,
        habit_name: &str,
        streak_length: u32,
    ) -> impl Future<Output = Result<MotivationMessage, MotivationError>> + Send;

    fn generate_identity_motivation(
        &self,
        request: &IdentityMotivationRequest,
    ) -> impl Future<Output = Result<MotivationMessage, MotivationError>> + Send;
}

/// Generator used when motivation is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl MotivationGenerator for Disabled {
    async fn generate_motivation_message(
        &self,
        _habit_name: &str,
        _streak_length: u32,
    ) -> Result<MotivationMessage, MotivationError> {
        Err(MotivationError::Disabled)
    }

    async fn generate_identity_motivation(
        &self,
        _request: &IdentityMotivationRequest,
    ) -> Result<MotivationMessage, MotivationError> {
        Err(MotivationError::Disabled)
    }
}

pub fn habit_prompt(habit_name: &str, streak_length: u32) -> String {
    format!(
        "You are an encouraging habit coach. In two sentences or fewer, congratulate the user \
         on completing their habit and cheer on their streak.\n\n\
         Habit: {habit_name}\nStreak length: {streak_length} day(s)\n\nMessage:"
    )
}

pub fn identity_prompt(request: &IdentityMotivationRequest) -> String {
    format!(
        "You are an identity coach. Write a short, warm message in the second person that \
         links the completed habit to who the user is becoming and celebrates the evidence \
         they have collected.\n\n\
         Habit completed: {}\nIdentity: \"I am a {}\"\nEvidence collected: {}\n\
         How aligned they felt today: {}/5\n\nMessage:",
        request.habit_name,
        request.identity_statement,
        request.evidence_count,
        request.alignment_score
    )
}

fn log_failure(err: &MotivationError) {
    match err {
        MotivationError::Disabled => debug!("motivation disabled, using fallback"),
        other => warn!("motivation generation failed, using fallback: {other}"),
    }
}

fn accept(result: Result<MotivationMessage, MotivationError>) -> Option<String> {
    match result {
        Ok(m) if !m.message.trim().is_empty() => Some(m.message.trim().to_string()),
        Ok(_) => {
            log_failure(&MotivationError::EmptyResponse);
            None
        }
        Err(e) => {
            log_failure(&e);
            None
        }
    }
}

pub async fn motivate_or_fallback<G: MotivationGenerator>(
    generator: &G,
    habit_name: &str,
    streak_length: u32,
    fallback: &str,
) -> Motivation {
    let result = generator
        .generate_motivation_message(habit_name, streak_length)
        .await;
    match accept(result) {
        Some(message) => Motivation {
            title: format!("Great job on {habit_name}!"),
            message,
            generated: true,
        },
        None => Motivation {
            title: "Oops!".to_string(),
            message: fallback.to_string(),
            generated: false,
        },
    }
}

pub async fn identity_motivation_or_fallback<G: MotivationGenerator>(
    generator: &G,
    request: &IdentityMotivationRequest,
    fallback: &str,
) -> Motivation {
    let result = generator.generate_identity_motivation(request).await;
    let title = format!("You are a {}", request.identity_statement);
    match accept(result) {
        Some(message) => Motivation {
            title,
            message,
            generated: true,
        },
        None => Motivation {
            title,
            message: fallback.to_string(),
            generated: false,
        },
    }
}
