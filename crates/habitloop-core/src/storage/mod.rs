mod config;
pub mod database;
mod memory;
pub mod migrations;

pub use config::{Config, GoalsConfig, LogConfig, MotivationConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::habit::Habit;
use crate::identity::UserIdentity;

/// Persistence gateway consumed by the session controller.
///
/// Every call is an independent write; there are no transactions across
/// calls and the last write wins.
pub trait HabitStore {
    fn fetch_all(&self) -> Result<Vec<Habit>>;

    /// Insert a new habit. Fails if the id already exists.
    fn create(&self, habit: &Habit) -> Result<()>;

    /// Insert or replace the whole document.
    fn upsert(&self, habit: &Habit) -> Result<()>;

    /// Zero the stored streak and clear its completions.
    fn reset_streak(&self, habit_id: &str) -> Result<()>;

    fn load_identity(&self) -> Result<Option<UserIdentity>>;

    fn save_identity(&self, identity: &UserIdentity) -> Result<()>;
}

/// Returns `~/.config/habitloop[-dev]/` based on HABITLOOP_ENV.
///
/// Set HABITLOOP_ENV=dev to use the development data directory, or
/// HABITLOOP_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HABITLOOP_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITLOOP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitloop-dev")
            } else {
                base_dir.join("habitloop")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
