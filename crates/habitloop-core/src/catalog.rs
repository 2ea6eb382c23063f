//! Built-in habit suggestions offered when adding a habit.

use serde::Serialize;

use crate::habit::NewHabit;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuggestedHabit {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl SuggestedHabit {
    pub fn to_new_habit(&self) -> NewHabit {
        NewHabit {
            icon: self.icon.to_string(),
            ..NewHabit::named(self.name).with_description(self.description)
        }
    }
}

pub const SUGGESTIONS: &[SuggestedHabit] = &[
    SuggestedHabit {
        name: "Get Adequate Sleep",
        description: "Aim for 7-9 hours of rest with a calming bedtime routine.",
        icon: "Moon",
    },
    SuggestedHabit {
        name: "Stay Active Daily",
        description: "Walk, stretch, cycle or train. Any movement you enjoy counts.",
        icon: "Dumbbell",
    },
    SuggestedHabit {
        name: "Practice Mindfulness",
        description: "A few minutes of deep breathing or meditation.",
        icon: "Brain",
    },
    SuggestedHabit {
        name: "Keep a Gratitude Journal",
        description: "Note two or three things you are thankful for.",
        icon: "NotebookPen",
    },
    SuggestedHabit {
        name: "Nurture Social Connections",
        description: "Spend time with friends, family or your community.",
        icon: "Users",
    },
    SuggestedHabit {
        name: "Limit Screen Time",
        description: "Swap an hour of screens for reading or time outdoors.",
        icon: "MonitorOff",
    },
    SuggestedHabit {
        name: "Practice Self-Compassion",
        description: "Treat yourself with the kindness you would offer a friend.",
        icon: "Heart",
    },
    SuggestedHabit {
        name: "Nourish Your Body",
        description: "Eat whole foods and stay hydrated.",
        icon: "Apple",
    },
    SuggestedHabit {
        name: "Reflect Quietly",
        description: "Prayer, a walk in nature or quiet reflection.",
        icon: "Sparkles",
    },
];

/// 1-based lookup, matching the numbering printed by `catalog list`.
pub fn suggestion(number: usize) -> Option<&'static SuggestedHabit> {
    number.checked_sub(1).and_then(|i| SUGGESTIONS.get(i))
}
