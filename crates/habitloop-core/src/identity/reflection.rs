use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EvidenceEntry;
use crate::error::ValidationError;
use crate::habit::Habit;

/// Alignment recorded when the user doesn't pick one.
pub const DEFAULT_ALIGNMENT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Amazing,
    Good,
    Neutral,
    Challenging,
}

impl std::str::FromStr for Feeling {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amazing" => Ok(Feeling::Amazing),
            "good" => Ok(Feeling::Good),
            "neutral" => Ok(Feeling::Neutral),
            "challenging" => Ok(Feeling::Challenging),
            other => Err(ValidationError::InvalidValue {
                field: "feeling",
                message: format!("expected amazing, good, neutral or challenging, got '{other}'"),
            }),
        }
    }
}

/// How a single completion felt. Not persisted on its own; it only ever
/// turns into an [`EvidenceEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub feeling: Feeling,
    pub note: Option<String>,
    pub identity_alignment: Option<u8>,
}

impl Reflection {
    pub fn new(
        habit_id: impl Into<String>,
        date: NaiveDate,
        feeling: Feeling,
        note: Option<String>,
        identity_alignment: Option<u8>,
    ) -> Result<Self, ValidationError> {
        if let Some(score) = identity_alignment {
            if !(1..=5).contains(&score) {
                return Err(ValidationError::OutOfRange {
                    field: "identity_alignment",
                    min: 1,
                    max: 5,
                    value: i64::from(score),
                });
            }
        }
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.into(),
            date,
            feeling,
            note,
            identity_alignment,
        })
    }

    pub fn to_evidence(&self, habit: &Habit, timestamp: DateTime<Utc>) -> EvidenceEntry {
        EvidenceEntry {
            id: Uuid::new_v4().to_string(),
            habit_id: habit.id.clone(),
            habit_name: habit.name.clone(),
            timestamp,
            reflection: self.note.clone(),
            identity_alignment: self.identity_alignment.unwrap_or(DEFAULT_ALIGNMENT),
        }
    }
}
