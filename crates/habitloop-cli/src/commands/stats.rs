use clap::Subcommand;
use habitloop_core::stats::weekly_summary;
use habitloop_core::Config;

use super::{open_session, print_json};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completions over the last seven days against the weekly goal
    Week,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (session, _) = open_session()?;

    match action {
        StatsAction::Week => {
            let summary = weekly_summary(
                &session.state().habits,
                session.clock().today,
                config.goals.weekly_goal(),
            );
            print_json(&summary)?;
        }
    }
    Ok(())
}
