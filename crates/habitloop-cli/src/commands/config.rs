use clap::Subcommand;
use habitloop_core::Config;

use super::print_json;

pub const KEYS_HELP: &str = "\
Keys:
  goals.weekly_goal                  completions wanted per week (0 = one per habit per day)
  motivation.enabled                 ask Gemini for a message after each completion
  motivation.model                   Gemini model name
  motivation.timeout_secs            give up and use the fallback message after this long
  motivation.fallback_message        shown when no message could be generated
  motivation.identity_fallback_message
  log.level                          tracing filter, overridden by RUST_LOG

Examples:
  habitloop config set goals.weekly_goal 20
  habitloop config set motivation.enabled false
  habitloop config get motivation.model";

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dotted key, e.g. "goals.weekly_goal"
        key: String,
    },
    /// Change one setting and save it
    Set {
        /// Dotted key, e.g. "motivation.enabled"
        key: String,
        /// New value; booleans and numbers are parsed to match the key
        value: String,
    },
    /// Print every setting as JSON
    List,
    /// Restore default goals, motivation and logging settings.
    /// The stored Gemini API key is left alone; use `auth clear-key` for that
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key} (see `habitloop config --help`)"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            if let Some(saved) = config.get(&key) {
                println!("{key} = {saved}");
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print_json(&config)?;
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!(
                "settings reset; weekly goal is {}",
                config.goals.weekly_goal().map_or_else(
                    || "one completion per habit per day".to_string(),
                    |goal| goal.to_string()
                )
            );
        }
    }
    Ok(())
}
