use clap::Subcommand;
use serde_json::json;

use super::{open_session, print_json};

#[derive(Subcommand)]
pub enum DayAction {
    /// Run the day-boundary check and show today's status
    Check,
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DayAction::Check => {
            // Opening a session is what runs the check.
            let (session, notices) = open_session()?;
            let today = session.clock().today;
            let habits: Vec<_> = session
                .state()
                .sorted_for_today(today)
                .into_iter()
                .map(|h| {
                    json!({
                        "id": h.id,
                        "name": h.name,
                        "streak": h.streak,
                        "currentDifficulty": h.current_difficulty,
                        "missedCount": h.missed_count,
                        "completedToday": h.is_complete_on(today),
                    })
                })
                .collect();
            print_json(&json!({
                "date": today,
                "notices": notices,
                "habits": habits,
            }))?;
        }
    }
    Ok(())
}
