//! Session state, the event reducer and the controller that drives it.

mod reducer;
mod state;

pub use reducer::{reduce, Effect, Reduced, SessionEvent, SessionNotice};
pub use state::{AppState, Clock};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::motivation::{
    identity_motivation_or_fallback, motivate_or_fallback, IdentityMotivationRequest,
    Motivation, MotivationGenerator,
};
use crate::storage::{HabitStore, MotivationConfig};

/// What a caller gets back from [`SessionController::dispatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub notices: Vec<SessionNotice>,
    pub motivation: Option<Motivation>,
}

/// Motivation requests left over after persistence ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotivationRequest {
    Habit { habit_name: String, streak: u32 },
    Identity(IdentityMotivationRequest),
}

#[derive(Debug, Clone)]
struct Fallbacks {
    habit: String,
    identity: String,
}

/// Owns the in-memory state for one session and keeps the store in step
/// with it.
///
/// State is replaced only after every persistence effect of a reduction
/// succeeded; a failed write leaves the previous state in place.
pub struct SessionController<S, G> {
    store: S,
    generator: G,
    fallbacks: Fallbacks,
    clock: Clock,
    state: AppState,
}

impl<S: HabitStore, G: MotivationGenerator> SessionController<S, G> {
    /// Load everything from `store` and run the day-boundary check.
    ///
    /// Returns the controller together with any notices the check produced.
    pub fn open(
        store: S,
        generator: G,
        config: &MotivationConfig,
        clock: Clock,
    ) -> Result<(Self, Vec<SessionNotice>)> {
        let state = AppState {
            habits: store.fetch_all()?,
            identity: store.load_identity()?,
        };
        let mut controller = Self {
            store,
            generator,
            fallbacks: Fallbacks {
                habit: config.fallback_message.clone(),
                identity: config.identity_fallback_message.clone(),
            },
            clock,
            state,
        };
        let (notices, _) = controller.apply(SessionEvent::DayStarted)?;
        Ok((controller, notices))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Move a long-lived session to another day. Follow with
    /// [`SessionEvent::DayStarted`] to observe any missed day.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reduce `event` and run its persistence effects.
    ///
    /// Motivation requests are returned rather than executed so callers
    /// without an async runtime can still drive a session.
    pub fn apply(
        &mut self,
        event: SessionEvent,
    ) -> Result<(Vec<SessionNotice>, Vec<MotivationRequest>)> {
        let Reduced {
            state,
            notices,
            effects,
        } = reduce(self.state.clone(), event, &self.clock)?;

        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::CreateHabit { habit_id } => {
                    if let Some(habit) = state.habit(&habit_id) {
                        self.store.create(habit)?;
                    }
                }
                Effect::PersistHabit { habit_id } => {
                    if let Some(habit) = state.habit(&habit_id) {
                        self.store.upsert(habit)?;
                    }
                }
                Effect::ResetStoredStreak { habit_id } => {
                    self.store.reset_streak(&habit_id)?;
                }
                Effect::PersistIdentity => {
                    if let Some(identity) = &state.identity {
                        self.store.save_identity(identity)?;
                    }
                }
                Effect::Motivate { habit_name, streak } => {
                    pending.push(MotivationRequest::Habit { habit_name, streak });
                }
                Effect::MotivateIdentity(request) => {
                    pending.push(MotivationRequest::Identity(request));
                }
            }
        }

        debug!(notices = notices.len(), pending = pending.len(), "event applied");
        self.state = state;
        Ok((notices, pending))
    }

    /// Apply `event`, then await motivation with fallback.
    ///
    /// Only the first motivation request of a reduction is fulfilled.
    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<Outcome> {
        let (notices, pending) = self.apply(event)?;
        let motivation = match pending.into_iter().next() {
            Some(request) => Some(self.motivate(&request).await),
            None => None,
        };
        Ok(Outcome {
            notices,
            motivation,
        })
    }

    pub async fn motivate(&self, request: &MotivationRequest) -> Motivation {
        match request {
            MotivationRequest::Habit { habit_name, streak } => {
                motivate_or_fallback(
                    &self.generator,
                    habit_name,
                    *streak,
                    &self.fallbacks.habit,
                )
                .await
            }
            MotivationRequest::Identity(request) => {
                identity_motivation_or_fallback(&self.generator, request, &self.fallbacks.identity)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{Difficulty, Habit, NewHabit};
    use crate::identity::Feeling;
    use crate::motivation::Disabled;
    use crate::storage::MemoryStore;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn open(store: MemoryStore) -> SessionController<MemoryStore, Disabled> {
        let (controller, _) = SessionController::open(
            store,
            Disabled,
            &MotivationConfig::default(),
            Clock::on(today()),
        )
        .unwrap();
        controller
    }

    #[test]
    fn open_runs_day_check_and_persists() {
        let mut habit = Habit::from_new(
            NewHabit {
                difficulty: Difficulty::Medium,
                ..NewHabit::named("Run")
            },
            Clock::on(today()).now,
        )
        .unwrap();
        habit.missed_count = 1;
        habit.last_missed_date = Some(today() - Duration::days(3));
        let id = habit.id.clone();

        let (controller, notices) = SessionController::open(
            MemoryStore::with_habits([habit]),
            Disabled,
            &MotivationConfig::default(),
            Clock::on(today()),
        )
        .unwrap();

        assert_eq!(notices.len(), 1);
        let stored = controller.store().get(&id).unwrap();
        assert_eq!(stored.current_difficulty, Difficulty::Tiny);
        assert_eq!(stored.missed_count, 2);
    }

    #[test]
    fn add_then_toggle_round_trips_through_store() {
        let mut controller = open(MemoryStore::new());
        controller
            .apply(SessionEvent::AddHabit(NewHabit::named("Read")))
            .unwrap();
        let id = controller.state().habits[0].id.clone();

        let (_, pending) = controller
            .apply(SessionEvent::ToggleCompletion {
                habit_id: id.clone(),
                date: None,
            })
            .unwrap();

        assert_eq!(
            pending,
            vec![MotivationRequest::Habit {
                habit_name: "Read".into(),
                streak: 1
            }]
        );
        assert_eq!(controller.store().get(&id).unwrap().streak, 1);
    }

    #[test]
    fn failed_event_keeps_previous_state() {
        let mut controller = open(MemoryStore::new());
        let before = controller.state().clone();
        assert!(controller
            .apply(SessionEvent::ResetStreak {
                habit_id: "missing".into()
            })
            .is_err());
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn dispatch_falls_back_when_disabled() {
        let mut controller = open(MemoryStore::new());
        controller
            .apply(SessionEvent::AddHabit(NewHabit::named("Read")))
            .unwrap();
        let id = controller.state().habits[0].id.clone();

        let outcome = controller
            .dispatch(SessionEvent::ToggleCompletion {
                habit_id: id,
                date: None,
            })
            .await
            .unwrap();
        let motivation = outcome.motivation.unwrap();
        assert!(!motivation.generated);
        assert_eq!(motivation.message, MotivationConfig::default().fallback_message);
    }

    #[tokio::test]
    async fn reflection_persists_identity() {
        let mut controller = open(MemoryStore::new());
        controller
            .apply(SessionEvent::AddHabit(NewHabit::named("Write")))
            .unwrap();
        let id = controller.state().habits[0].id.clone();
        controller
            .apply(SessionEvent::DefineIdentity {
                statement: "writer".into(),
                habit_ids: vec![id.clone()],
            })
            .unwrap();

        let outcome = controller
            .dispatch(SessionEvent::SaveReflection {
                habit_id: id,
                feeling: Feeling::Good,
                note: None,
                identity_alignment: Some(4),
            })
            .await
            .unwrap();

        assert_eq!(outcome.motivation.unwrap().title, "You are a writer");
        let stored = controller.store().load_identity().unwrap().unwrap();
        assert_eq!(stored.evidence_count(), 1);
    }
}
