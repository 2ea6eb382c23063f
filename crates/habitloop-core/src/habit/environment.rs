//! Environment design: changes to the surroundings that make a habit
//! obvious, attractive, easy and satisfying.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const ITEM_MAX_LEN: usize = 100;

/// One of the four habit-forming laws an environment change serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentLaw {
    Obvious,
    Attractive,
    Easy,
    Satisfying,
}

impl EnvironmentLaw {
    pub const ALL: [EnvironmentLaw; 4] = [
        EnvironmentLaw::Obvious,
        EnvironmentLaw::Attractive,
        EnvironmentLaw::Easy,
        EnvironmentLaw::Satisfying,
    ];

    /// Starter ideas shown while designing the environment.
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            EnvironmentLaw::Obvious => &[
                "Place visual reminders where you'll see them",
                "Set items out the night before",
                "Use sticky notes in key locations",
                "Create a dedicated space for this habit",
            ],
            EnvironmentLaw::Attractive => &[
                "Bundle with something you enjoy",
                "Join a community doing the same",
                "Track progress visually",
                "Create a ritual around it",
            ],
            EnvironmentLaw::Easy => &[
                "Reduce steps needed to start",
                "Prepare everything in advance",
                "Start with 2 minutes only",
                "Remove friction points",
            ],
            EnvironmentLaw::Satisfying => &[
                "Create immediate rewards",
                "Track streaks visually",
                "Share wins with someone",
                "Celebrate small victories",
            ],
        }
    }
}

impl std::fmt::Display for EnvironmentLaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EnvironmentLaw::Obvious => "obvious",
            EnvironmentLaw::Attractive => "attractive",
            EnvironmentLaw::Easy => "easy",
            EnvironmentLaw::Satisfying => "satisfying",
        })
    }
}

impl std::str::FromStr for EnvironmentLaw {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "obvious" => Ok(EnvironmentLaw::Obvious),
            "attractive" => Ok(EnvironmentLaw::Attractive),
            "easy" => Ok(EnvironmentLaw::Easy),
            "satisfying" => Ok(EnvironmentLaw::Satisfying),
            other => Err(ValidationError::InvalidValue {
                field: "law",
                message: format!("expected obvious, attractive, easy or satisfying, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalDesign {
    #[serde(default)]
    pub make_it_obvious: Vec<String>,
    #[serde(default)]
    pub make_it_attractive: Vec<String>,
    #[serde(default)]
    pub make_it_easy: Vec<String>,
    #[serde(default)]
    pub make_it_satisfying: Vec<String>,
}

fn validate_item(item: &str) -> Result<String, ValidationError> {
    let item = item.trim();
    let len = item.chars().count();
    if !(1..=ITEM_MAX_LEN).contains(&len) {
        return Err(ValidationError::Length {
            field: "environment item",
            min: 1,
            max: ITEM_MAX_LEN,
            len,
        });
    }
    Ok(item.to_string())
}

impl EnvironmentalDesign {
    pub fn items(&self, law: EnvironmentLaw) -> &[String] {
        match law {
            EnvironmentLaw::Obvious => &self.make_it_obvious,
            EnvironmentLaw::Attractive => &self.make_it_attractive,
            EnvironmentLaw::Easy => &self.make_it_easy,
            EnvironmentLaw::Satisfying => &self.make_it_satisfying,
        }
    }

    fn items_mut(&mut self, law: EnvironmentLaw) -> &mut Vec<String> {
        match law {
            EnvironmentLaw::Obvious => &mut self.make_it_obvious,
            EnvironmentLaw::Attractive => &mut self.make_it_attractive,
            EnvironmentLaw::Easy => &mut self.make_it_easy,
            EnvironmentLaw::Satisfying => &mut self.make_it_satisfying,
        }
    }

    /// Add a trimmed item. Returns `false` if it was already listed.
    pub fn add(&mut self, law: EnvironmentLaw, item: &str) -> Result<bool, ValidationError> {
        let item = validate_item(item)?;
        let items = self.items_mut(law);
        if items.contains(&item) {
            return Ok(false);
        }
        items.push(item);
        Ok(true)
    }

    pub fn remove(&mut self, law: EnvironmentLaw, item: &str) -> bool {
        let items = self.items_mut(law);
        let before = items.len();
        items.retain(|i| i != item.trim());
        items.len() != before
    }

    /// Trim every item and reject blank or overlong ones.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        for law in EnvironmentLaw::ALL {
            let items = self.items_mut(law);
            let mut cleaned: Vec<String> = Vec::with_capacity(items.len());
            for item in items.iter() {
                let item = validate_item(item)?;
                if !cleaned.contains(&item) {
                    cleaned.push(item);
                }
            }
            *items = cleaned;
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        EnvironmentLaw::ALL.iter().all(|&law| self.items(law).is_empty())
    }
}
