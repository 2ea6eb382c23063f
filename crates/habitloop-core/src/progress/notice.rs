use serde::{Deserialize, Serialize};

use crate::habit::Difficulty;

/// User-visible side effects of a progress transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressNotice {
    DifficultyRaised {
        from: Difficulty,
        to: Difficulty,
        streak: u32,
    },
    /// Protective step down after repeated misses.
    DifficultyReduced {
        from: Difficulty,
        to: Difficulty,
        missed_count: u32,
    },
    StreakReset,
}

impl ProgressNotice {
    pub fn message(&self) -> String {
        match self {
            ProgressNotice::DifficultyRaised { to, streak, .. } => {
                format!("{streak} days strong! Difficulty raised to {to}.")
            }
            ProgressNotice::DifficultyReduced { missed_count, .. } => format!(
                "Missed {missed_count} days in a row. Difficulty reset to tiny so it's easy to restart."
            ),
            ProgressNotice::StreakReset => "Streak and history cleared.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_are_tagged_on_the_wire() {
        let json = serde_json::to_value(ProgressNotice::DifficultyRaised {
            from: Difficulty::Tiny,
            to: Difficulty::Easy,
            streak: 7,
        })
        .unwrap();
        assert_eq!(json["type"], "DifficultyRaised");
        assert_eq!(json["to"], "easy");
    }
}
