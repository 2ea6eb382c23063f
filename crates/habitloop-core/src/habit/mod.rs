//! Habit records and the input used to create them.

mod completions;
mod environment;
mod trigger;

pub use completions::CompletionMap;
pub use environment::{EnvironmentLaw, EnvironmentalDesign};
pub(crate) use trigger::validate_value as validate_trigger_value;
pub use trigger::{HabitTrigger, TriggerType};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 100;
pub const DEFAULT_ICON: &str = "Sparkles";

/// How demanding the habit's target action currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Tiny,
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Tiny => "tiny",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(Difficulty::Tiny),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty",
                message: format!("expected tiny, easy, medium or hard, got '{other}'"),
            }),
        }
    }
}

/// A tracked routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Cached result of `compute_streak`; rewritten on every completion change.
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub completions: CompletionMap,
    #[serde(default)]
    pub current_difficulty: Difficulty,
    #[serde(default)]
    pub base_difficulty: Difficulty,
    #[serde(default)]
    pub missed_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_missed_date: Option<NaiveDate>,
    #[serde(default)]
    pub triggers: Vec<HabitTrigger>,
    /// Display-order hint only. Completing this habit never requires the
    /// stacked habit to be done first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked_with_habit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temptation_bundle: Option<String>,
    #[serde(default)]
    pub identity_tags: Vec<String>,
    #[serde(default)]
    pub environment: EnvironmentalDesign,
    pub created_at: DateTime<Utc>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Habit {
    /// Build a fresh habit from validated input: streak 0, no completions,
    /// current tier equal to the base tier.
    pub fn from_new(input: NewHabit, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let input = input.validated()?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            icon: input.icon,
            streak: 0,
            completions: CompletionMap::new(),
            current_difficulty: input.difficulty,
            base_difficulty: input.difficulty,
            missed_count: 0,
            last_missed_date: None,
            triggers: Vec::new(),
            stacked_with_habit_id: None,
            temptation_bundle: input.temptation_bundle,
            identity_tags: input.identity_tags,
            environment: EnvironmentalDesign::default(),
            created_at,
        })
    }

    pub fn is_complete_on(&self, date: NaiveDate) -> bool {
        self.completions.is_complete(date)
    }
}

/// User input for the add-habit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub temptation_bundle: Option<String>,
    #[serde(default)]
    pub identity_tags: Vec<String>,
}

impl NewHabit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: default_icon(),
            difficulty: Difficulty::default(),
            temptation_bundle: None,
            identity_tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Trim and check lengths. Rejected input never reaches the engine.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();

        let len = self.name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            return Err(ValidationError::Length {
                field: "name",
                min: NAME_MIN_LEN,
                max: NAME_MAX_LEN,
                len,
            });
        }

        let len = self.description.chars().count();
        if len > DESCRIPTION_MAX_LEN {
            return Err(ValidationError::Length {
                field: "description",
                min: 0,
                max: DESCRIPTION_MAX_LEN,
                len,
            });
        }

        if self.icon.trim().is_empty() {
            self.icon = default_icon();
        }
        self.temptation_bundle = self
            .temptation_bundle
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Ok(self)
    }
}
