//! In-process store for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::HabitStore;
use crate::error::{CoreError, DatabaseError, Result};
use crate::habit::{CompletionMap, Habit};
use crate::identity::UserIdentity;

#[derive(Debug, Default)]
pub struct MemoryStore {
    habits: Mutex<BTreeMap<String, Habit>>,
    identity: Mutex<Option<UserIdentity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_habits(habits: impl IntoIterator<Item = Habit>) -> Self {
        let store = Self::new();
        store
            .habits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(habits.into_iter().map(|h| (h.id.clone(), h)));
        store
    }

    pub fn get(&self, id: &str) -> Option<Habit> {
        self.habits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }
}

impl HabitStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Habit>> {
        let mut habits: Vec<Habit> = self
            .habits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        habits.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(habits)
    }

    fn create(&self, habit: &Habit) -> Result<()> {
        let mut habits = self.habits.lock().unwrap_or_else(|e| e.into_inner());
        if habits.contains_key(&habit.id) {
            return Err(DatabaseError::Duplicate(habit.id.clone()).into());
        }
        habits.insert(habit.id.clone(), habit.clone());
        Ok(())
    }

    fn upsert(&self, habit: &Habit) -> Result<()> {
        self.habits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(habit.id.clone(), habit.clone());
        Ok(())
    }

    fn reset_streak(&self, habit_id: &str) -> Result<()> {
        let mut habits = self.habits.lock().unwrap_or_else(|e| e.into_inner());
        let habit = habits
            .get_mut(habit_id)
            .ok_or_else(|| CoreError::habit_not_found(habit_id))?;
        habit.streak = 0;
        habit.completions = CompletionMap::new();
        Ok(())
    }

    fn load_identity(&self) -> Result<Option<UserIdentity>> {
        Ok(self.identity.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save_identity(&self, identity: &UserIdentity) -> Result<()> {
        *self.identity.lock().unwrap_or_else(|e| e.into_inner()) = Some(identity.clone());
        Ok(())
    }
}
