//! Implementation-intention triggers ("After X, I will Y").

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerType {
    Time,
    Location,
    AfterHabit,
    Emotional,
    Environmental,
}

impl std::str::FromStr for TriggerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(TriggerType::Time),
            "location" => Ok(TriggerType::Location),
            "after-habit" => Ok(TriggerType::AfterHabit),
            "emotional" => Ok(TriggerType::Emotional),
            "environmental" => Ok(TriggerType::Environmental),
            other => Err(ValidationError::InvalidValue {
                field: "type",
                message: format!("unknown trigger type '{other}'"),
            }),
        }
    }
}

/// Trimmed trigger text; blank values are rejected.
pub fn validate_value(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "value",
            message: "Please provide a trigger value".into(),
        });
    }
    Ok(value.to_string())
}

/// A cue that should prompt the habit.
///
/// The success counters are stored but never computed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitTrigger {
    pub id: String,
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    /// Free text, or another habit's id for `after-habit`.
    pub value: String,
    pub habit_id: String,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub total_attempts: u32,
    #[serde(default)]
    pub successful_attempts: u32,
}

impl HabitTrigger {
    pub fn new(
        habit_id: impl Into<String>,
        trigger_type: TriggerType,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let value = validate_value(&value.into())?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            trigger_type,
            value,
            habit_id: habit_id.into(),
            success_rate: 0.0,
            total_attempts: 0,
            successful_attempts: 0,
        })
    }

    /// Display label. `lookup` resolves habit ids to names for
    /// `after-habit` triggers.
    pub fn label<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
        match self.trigger_type {
            TriggerType::Time => format!("At {}", self.value),
            TriggerType::Location => format!("When at {}", self.value),
            TriggerType::AfterHabit => {
                let name = lookup(&self.value).unwrap_or("Unknown habit");
                format!("After \"{name}\"")
            }
            TriggerType::Emotional => format!("When feeling {}", self.value),
            TriggerType::Environmental => format!("When I see {}", self.value),
        }
    }
}
