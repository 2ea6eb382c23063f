//! Per-habit completion record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mapping from calendar day (`yyyy-MM-dd`) to "completed that day".
///
/// A missing key means "not completed". Equality ignores explicit `false`
/// entries so a map that had a day toggled on and off again compares equal
/// to one that never saw that day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<NaiveDate, bool>);

impl CompletionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self, date: NaiveDate) -> bool {
        self.0.get(&date).copied().unwrap_or(false)
    }

    pub fn set(&mut self, date: NaiveDate, completed: bool) {
        self.0.insert(date, completed);
    }

    /// Flip the flag for `date` and return the new value.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let entry = self.0.entry(date).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Dates marked complete, oldest first.
    pub fn completed_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().filter(|(_, done)| **done).map(|(d, _)| *d)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_dates().count()
    }

    pub fn is_empty(&self) -> bool {
        self.completed_count() == 0
    }
}

impl PartialEq for CompletionMap {
    fn eq(&self, other: &Self) -> bool {
        self.completed_dates().eq(other.completed_dates())
    }
}

impl Eq for CompletionMap {}

impl FromIterator<(NaiveDate, bool)> for CompletionMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
