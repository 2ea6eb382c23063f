//! Identity-based habits: an aspirational statement, the habits linked to
//! it, and the evidence logged every time one of them is reflected on.

mod reflection;

pub use reflection::{Feeling, Reflection, DEFAULT_ALIGNMENT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const STATEMENT_MIN_LEN: usize = 2;
pub const STATEMENT_MAX_LEN: usize = 100;
pub const MAX_SCORE: u32 = 100;
const POINTS_PER_ENTRY: u32 = 2;

/// A logged instance of completing an identity-linked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceEntry {
    pub id: String,
    pub habit_id: String,
    pub habit_name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    /// 1..=5
    pub identity_alignment: u8,
}

/// "I am a ..." statement plus accumulated evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: String,
    pub statement: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub associated_habits: Vec<String>,
    #[serde(default)]
    pub evidence_entries: Vec<EvidenceEntry>,
    /// 0..=100, derived from the evidence count.
    #[serde(default)]
    pub current_score: u32,
}

/// Milestone label shown next to the identity statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityBadge {
    Beginner,
    Apprentice,
    Practitioner,
    Expert,
    Master,
}

impl IdentityBadge {
    pub fn for_evidence_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1..=9 => Some(IdentityBadge::Beginner),
            10..=24 => Some(IdentityBadge::Apprentice),
            25..=49 => Some(IdentityBadge::Practitioner),
            50..=99 => Some(IdentityBadge::Expert),
            _ => Some(IdentityBadge::Master),
        }
    }
}

/// `min(100, count * 2)`.
pub fn alignment_score(evidence_count: usize) -> u32 {
    let count = u32::try_from(evidence_count).unwrap_or(u32::MAX);
    count.saturating_mul(POINTS_PER_ENTRY).min(MAX_SCORE)
}

fn validate_statement(statement: &str) -> Result<String, ValidationError> {
    let statement = statement.trim();
    let len = statement.chars().count();
    if !(STATEMENT_MIN_LEN..=STATEMENT_MAX_LEN).contains(&len) {
        return Err(ValidationError::Length {
            field: "statement",
            min: STATEMENT_MIN_LEN,
            max: STATEMENT_MAX_LEN,
            len,
        });
    }
    Ok(statement.to_string())
}

impl UserIdentity {
    pub fn new(
        statement: &str,
        associated_habits: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut identity = Self {
            id: Uuid::new_v4().to_string(),
            statement: validate_statement(statement)?,
            created_at,
            associated_habits: Vec::new(),
            evidence_entries: Vec::new(),
            current_score: 0,
        };
        for habit_id in associated_habits {
            identity.link_habit(habit_id);
        }
        Ok(identity)
    }

    /// Redefine the statement and linked habits; evidence is kept.
    pub fn redefine(
        &mut self,
        statement: &str,
        associated_habits: Vec<String>,
    ) -> Result<(), ValidationError> {
        self.statement = validate_statement(statement)?;
        self.associated_habits.clear();
        for habit_id in associated_habits {
            self.link_habit(habit_id);
        }
        Ok(())
    }

    pub fn is_linked(&self, habit_id: &str) -> bool {
        self.associated_habits.iter().any(|id| id == habit_id)
    }

    /// Returns false when the habit was already linked.
    pub fn link_habit(&mut self, habit_id: String) -> bool {
        if self.is_linked(&habit_id) {
            return false;
        }
        self.associated_habits.push(habit_id);
        true
    }

    pub fn unlink_habit(&mut self, habit_id: &str) -> bool {
        let before = self.associated_habits.len();
        self.associated_habits.retain(|id| id != habit_id);
        before != self.associated_habits.len()
    }

    pub fn add_evidence(&mut self, entry: EvidenceEntry) {
        self.evidence_entries.push(entry);
        self.current_score = alignment_score(self.evidence_entries.len());
    }

    pub fn evidence_count(&self) -> usize {
        self.evidence_entries.len()
    }

    pub fn badge(&self) -> Option<IdentityBadge> {
        IdentityBadge::for_evidence_count(self.evidence_count())
    }

    pub fn average_alignment(&self) -> f64 {
        if self.evidence_entries.is_empty() {
            return 0.0;
        }
        let sum: u32 = self
            .evidence_entries
            .iter()
            .map(|e| u32::from(e.identity_alignment))
            .sum();
        f64::from(sum) / self.evidence_entries.len() as f64
    }

    /// Newest first.
    pub fn recent_evidence(&self, n: usize) -> Vec<&EvidenceEntry> {
        self.evidence_entries.iter().rev().take(n).collect()
    }
}

/// Dashboard view of an identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub statement: String,
    pub current_score: u32,
    pub evidence_count: usize,
    pub average_alignment: f64,
    pub badge: Option<IdentityBadge>,
    pub associated_habits: Vec<String>,
    pub recent_evidence: Vec<EvidenceEntry>,
}

impl From<&UserIdentity> for IdentitySummary {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            statement: identity.statement.clone(),
            current_score: identity.current_score,
            evidence_count: identity.evidence_count(),
            average_alignment: identity.average_alignment(),
            badge: identity.badge(),
            associated_habits: identity.associated_habits.clone(),
            recent_evidence: identity.recent_evidence(5).into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(alignment: u8) -> EvidenceEntry {
        EvidenceEntry {
            id: Uuid::new_v4().to_string(),
            habit_id: "h1".into(),
            habit_name: "Write".into(),
            timestamp: Utc::now(),
            reflection: None,
            identity_alignment: alignment,
        }
    }

    #[test]
    fn score_is_capped_counter() {
        assert_eq!(alignment_score(0), 0);
        assert_eq!(alignment_score(1), 2);
        assert_eq!(alignment_score(49), 98);
        assert_eq!(alignment_score(50), 100);
        assert_eq!(alignment_score(500), 100);
    }

    #[test]
    fn adding_evidence_updates_score() {
        let mut identity = UserIdentity::new("writer", vec![], Utc::now()).unwrap();
        identity.add_evidence(entry(4));
        identity.add_evidence(entry(2));
        assert_eq!(identity.current_score, 4);
        assert_eq!(identity.average_alignment(), 3.0);
    }

    #[test]
    fn linking_is_deduplicated() {
        let mut identity =
            UserIdentity::new("runner", vec!["a".into(), "a".into()], Utc::now()).unwrap();
        assert_eq!(identity.associated_habits, vec!["a".to_string()]);
        assert!(!identity.link_habit("a".into()));
        assert!(identity.unlink_habit("a"));
        assert!(!identity.unlink_habit("a"));
    }

    #[test]
    fn badge_tiers() {
        assert_eq!(IdentityBadge::for_evidence_count(0), None);
        assert_eq!(IdentityBadge::for_evidence_count(1), Some(IdentityBadge::Beginner));
        assert_eq!(IdentityBadge::for_evidence_count(10), Some(IdentityBadge::Apprentice));
        assert_eq!(IdentityBadge::for_evidence_count(25), Some(IdentityBadge::Practitioner));
        assert_eq!(IdentityBadge::for_evidence_count(50), Some(IdentityBadge::Expert));
        assert_eq!(IdentityBadge::for_evidence_count(100), Some(IdentityBadge::Master));
    }

    #[test]
    fn recent_evidence_is_newest_first() {
        let mut identity = UserIdentity::new("reader", vec![], Utc::now()).unwrap();
        for a in 1..=5u8 {
            identity.add_evidence(entry(a));
        }
        identity.add_evidence(entry(1));
        let recent: Vec<u8> = identity
            .recent_evidence(3)
            .iter()
            .map(|e| e.identity_alignment)
            .collect();
        assert_eq!(recent, vec![1, 5, 4]);
    }

    #[test]
    fn redefine_keeps_evidence() {
        let mut identity = UserIdentity::new("reader", vec!["a".into()], Utc::now()).unwrap();
        identity.add_evidence(entry(3));
        identity.redefine("writer", vec!["b".into()]).unwrap();
        assert_eq!(identity.statement, "writer");
        assert_eq!(identity.associated_habits, vec!["b".to_string()]);
        assert_eq!(identity.evidence_count(), 1);
    }

    #[test]
    fn empty_statement_is_rejected() {
        assert!(UserIdentity::new("  ", vec![], Utc::now()).is_err());
    }
}
