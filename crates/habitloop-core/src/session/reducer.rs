//! `(state, event) -> state` reducer for a session.
//!
//! Reduction is pure: persistence and motivation requests come back as
//! [`Effect`]s for the controller to carry out. Invalid input is rejected
//! before any part of the state is touched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{AppState, Clock};
use crate::error::{CoreError, Result, ValidationError};
use crate::habit::{
    validate_trigger_value, EnvironmentalDesign, Habit, HabitTrigger, NewHabit, TriggerType,
};
use crate::identity::{Feeling, Reflection, UserIdentity};
use crate::motivation::IdentityMotivationRequest;
use crate::progress::{self, Progress, ProgressNotice};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    AddHabit(NewHabit),
    /// `date` of `None` means today.
    ToggleCompletion {
        habit_id: String,
        date: Option<NaiveDate>,
    },
    /// Session start / day boundary.
    DayStarted,
    ResetStreak {
        habit_id: String,
    },
    UpdateTriggers {
        habit_id: String,
        triggers: Vec<HabitTrigger>,
    },
    /// Replaces the whole design; items are trimmed and de-duplicated.
    SetEnvironment {
        habit_id: String,
        environment: EnvironmentalDesign,
    },
    StackHabit {
        habit_id: String,
        stacked_with: Option<String>,
    },
    DefineIdentity {
        statement: String,
        habit_ids: Vec<String>,
    },
    LinkHabit {
        habit_id: String,
    },
    UnlinkHabit {
        habit_id: String,
    },
    SaveReflection {
        habit_id: String,
        feeling: Feeling,
        note: Option<String>,
        identity_alignment: Option<u8>,
    },
}

/// Work the controller performs after a reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    CreateHabit { habit_id: String },
    PersistHabit { habit_id: String },
    ResetStoredStreak { habit_id: String },
    PersistIdentity,
    Motivate { habit_name: String, streak: u32 },
    MotivateIdentity(IdentityMotivationRequest),
}

/// A progress notice attributed to the habit it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNotice {
    pub habit_id: String,
    pub habit_name: String,
    pub notice: ProgressNotice,
    pub message: String,
}

impl SessionNotice {
    fn new(habit: &Habit, notice: ProgressNotice) -> Self {
        Self {
            habit_id: habit.id.clone(),
            habit_name: habit.name.clone(),
            message: notice.message(),
            notice,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub state: AppState,
    pub notices: Vec<SessionNotice>,
    pub effects: Vec<Effect>,
}

impl Reduced {
    fn quiet(state: AppState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            notices: Vec::new(),
            effects,
        }
    }
}

fn position(state: &AppState, habit_id: &str) -> Result<usize> {
    state
        .habits
        .iter()
        .position(|h| h.id == habit_id)
        .ok_or_else(|| CoreError::habit_not_found(habit_id))
}

fn require_other_habit(state: &AppState, habit_id: &str, other: &str) -> Result<()> {
    if other == habit_id {
        return Err(ValidationError::InvalidValue {
            field: "habit",
            message: "a habit cannot be stacked after itself".into(),
        }
        .into());
    }
    position(state, other).map(|_| ())
}

/// Replace the habit at `idx` with the progress result, collecting notices.
fn commit(state: &mut AppState, idx: usize, progress: Progress) -> Vec<SessionNotice> {
    let notices = progress
        .notices
        .into_iter()
        .map(|n| SessionNotice::new(&progress.habit, n))
        .collect();
    state.habits[idx] = progress.habit;
    notices
}

pub fn reduce(mut state: AppState, event: SessionEvent, clock: &Clock) -> Result<Reduced> {
    debug!(?event, "reduce");
    match event {
        SessionEvent::AddHabit(input) => {
            let habit = Habit::from_new(input, clock.now)?;
            let habit_id = habit.id.clone();
            state.habits.push(habit);
            Ok(Reduced::quiet(state, vec![Effect::CreateHabit { habit_id }]))
        }

        SessionEvent::ToggleCompletion { habit_id, date } => {
            let idx = position(&state, &habit_id)?;
            let date = date.unwrap_or(clock.today);
            let progress =
                progress::toggle_completion(state.habits[idx].clone(), date, clock.today);
            let completed = progress.completed;
            let notices = commit(&mut state, idx, progress);

            let mut effects = vec![Effect::PersistHabit {
                habit_id: habit_id.clone(),
            }];
            if completed {
                let habit = &state.habits[idx];
                effects.push(Effect::Motivate {
                    habit_name: habit.name.clone(),
                    streak: habit.streak,
                });
            }
            Ok(Reduced {
                state,
                notices,
                effects,
            })
        }

        SessionEvent::DayStarted => {
            let mut notices = Vec::new();
            let mut effects = Vec::new();
            for idx in 0..state.habits.len() {
                let before = state.habits[idx].clone();
                let progress = progress::evaluate_missed_day(before.clone(), clock.today);
                notices.extend(commit(&mut state, idx, progress));
                if state.habits[idx] != before {
                    effects.push(Effect::PersistHabit {
                        habit_id: before.id,
                    });
                }
            }
            Ok(Reduced {
                state,
                notices,
                effects,
            })
        }

        SessionEvent::ResetStreak { habit_id } => {
            let idx = position(&state, &habit_id)?;
            let progress = progress::reset_streak(state.habits[idx].clone());
            let notices = commit(&mut state, idx, progress);
            Ok(Reduced {
                state,
                notices,
                effects: vec![Effect::ResetStoredStreak { habit_id }],
            })
        }

        SessionEvent::UpdateTriggers { habit_id, triggers } => {
            let idx = position(&state, &habit_id)?;
            let mut checked = Vec::with_capacity(triggers.len());
            for trigger in triggers {
                let value = validate_trigger_value(&trigger.value)?;
                if trigger.trigger_type == TriggerType::AfterHabit {
                    require_other_habit(&state, &habit_id, &value)?;
                }
                checked.push(HabitTrigger {
                    value,
                    habit_id: habit_id.clone(),
                    ..trigger
                });
            }
            state.habits[idx].triggers = checked;
            Ok(Reduced::quiet(state, vec![Effect::PersistHabit { habit_id }]))
        }

        SessionEvent::SetEnvironment {
            habit_id,
            environment,
        } => {
            let idx = position(&state, &habit_id)?;
            state.habits[idx].environment = environment.validated()?;
            Ok(Reduced::quiet(state, vec![Effect::PersistHabit { habit_id }]))
        }

        SessionEvent::StackHabit {
            habit_id,
            stacked_with,
        } => {
            let idx = position(&state, &habit_id)?;
            if let Some(other) = &stacked_with {
                require_other_habit(&state, &habit_id, other)?;
            }
            state.habits[idx].stacked_with_habit_id = stacked_with;
            Ok(Reduced::quiet(state, vec![Effect::PersistHabit { habit_id }]))
        }

        SessionEvent::DefineIdentity {
            statement,
            habit_ids,
        } => {
            for id in &habit_ids {
                position(&state, id)?;
            }
            match state.identity.as_mut() {
                Some(identity) => identity.redefine(&statement, habit_ids)?,
                None => {
                    state.identity = Some(UserIdentity::new(&statement, habit_ids, clock.now)?)
                }
            }
            Ok(Reduced::quiet(state, vec![Effect::PersistIdentity]))
        }

        SessionEvent::LinkHabit { habit_id } => {
            position(&state, &habit_id)?;
            let identity = state.identity.as_mut().ok_or(ValidationError::NoIdentity)?;
            let effects = if identity.link_habit(habit_id) {
                vec![Effect::PersistIdentity]
            } else {
                Vec::new()
            };
            Ok(Reduced::quiet(state, effects))
        }

        SessionEvent::UnlinkHabit { habit_id } => {
            let identity = state.identity.as_mut().ok_or(ValidationError::NoIdentity)?;
            let effects = if identity.unlink_habit(&habit_id) {
                vec![Effect::PersistIdentity]
            } else {
                Vec::new()
            };
            Ok(Reduced::quiet(state, effects))
        }

        SessionEvent::SaveReflection {
            habit_id,
            feeling,
            note,
            identity_alignment,
        } => {
            let idx = position(&state, &habit_id)?;
            let reflection =
                Reflection::new(&habit_id, clock.today, feeling, note, identity_alignment)?;

            let habit = &state.habits[idx];
            let Some(identity) = state.identity.as_mut().filter(|i| i.is_linked(&habit_id))
            else {
                // Reflections on unlinked habits leave no trace.
                return Ok(Reduced::quiet(state, Vec::new()));
            };

            let entry = reflection.to_evidence(habit, clock.now);
            let request = IdentityMotivationRequest {
                habit_name: habit.name.clone(),
                identity_statement: identity.statement.clone(),
                evidence_count: identity.evidence_count() + 1,
                alignment_score: entry.identity_alignment,
            };
            identity.add_evidence(entry);
            Ok(Reduced::quiet(
                state,
                vec![Effect::PersistIdentity, Effect::MotivateIdentity(request)],
            ))
        }
    }
}
