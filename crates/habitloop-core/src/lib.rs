//! # Habitloop Core Library
//!
//! Core logic for the Habitloop habit tracker. Every operation is available
//! through the `habitloop` CLI binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Progress engine**: pure functions over a habit's completion history.
//!   Streaks are recomputed from the completion map on every change, and an
//!   explicit difficulty state machine reacts to streak milestones and
//!   missed days
//! - **Identity**: "I am a ..." statements, evidence entries and the
//!   alignment score derived from them
//! - **Session**: a `(state, event) -> state` reducer plus a controller that
//!   carries out its persistence and motivation effects
//! - **Storage**: SQLite document store and TOML configuration
//! - **Motivation**: best-effort messages from a hosted language model,
//!   with a static fallback
//!
//! ## Key Components
//!
//! - [`toggle_completion`] / [`evaluate_missed_day`]: the engine entry points
//! - [`SessionController`]: event dispatch over a [`HabitStore`]
//! - [`Database`]: habit and identity persistence
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod error;
pub mod habit;
pub mod identity;
pub mod motivation;
pub mod progress;
pub mod session;
pub mod stats;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, MotivationError, ValidationError};
pub use habit::{
    CompletionMap, Difficulty, EnvironmentLaw, EnvironmentalDesign, Habit, HabitTrigger, NewHabit,
    TriggerType,
};
pub use identity::{EvidenceEntry, Feeling, IdentityBadge, Reflection, UserIdentity};
pub use motivation::{Disabled, GeminiClient, Motivation, MotivationGenerator};
pub use progress::{compute_streak, evaluate_missed_day, reset_streak, toggle_completion};
pub use session::{AppState, Clock, SessionController, SessionEvent};
pub use storage::{Config, Database, HabitStore, MemoryStore};
