use chrono::NaiveDate;
use clap::Subcommand;
use habitloop_core::catalog;
use habitloop_core::session::SessionEvent;
use habitloop_core::{
    Difficulty, EnvironmentLaw, EnvironmentalDesign, HabitTrigger, NewHabit, TriggerType,
};
use serde_json::json;

use super::{open_session, print_json, runtime, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name (2-50 characters)
        name: Option<String>,
        /// Short description (up to 100 characters)
        #[arg(long, default_value = "")]
        description: String,
        /// Icon key
        #[arg(long)]
        icon: Option<String>,
        /// Starting difficulty: tiny, easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        /// Something enjoyable to pair with the habit
        #[arg(long)]
        temptation: Option<String>,
        /// Identity tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Use the numbered suggestion from `catalog list`
        #[arg(long, conflicts_with = "name")]
        from_catalog: Option<usize>,
    },
    /// List habits, unfinished ones first
    List,
    /// Show one habit with its trigger labels
    Show {
        /// Habit ID
        id: String,
    },
    /// Toggle completion for today or a given date
    Toggle {
        /// Habit ID
        id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Erase the completion history and zero the streak
    Reset {
        /// Habit ID
        id: String,
    },
    /// Manage implementation-intention triggers
    Trigger {
        #[command(subcommand)]
        action: TriggerAction,
    },
    /// Stack a habit after another one, or clear the stack
    Stack {
        /// Habit ID
        id: String,
        /// Habit to do this one after; omit to clear
        #[arg(long)]
        after: Option<String>,
    },
    /// Design the surroundings that support a habit
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },
}

#[derive(Subcommand)]
pub enum EnvAction {
    /// Show the environment design with suggestions for empty laws
    Show {
        /// Habit ID
        id: String,
    },
    /// Add an environment change
    Add {
        /// Habit ID
        id: String,
        /// obvious, attractive, easy or satisfying
        #[arg(long)]
        law: EnvironmentLaw,
        /// The change, e.g. "Set out running shoes the night before"
        #[arg(long)]
        item: String,
    },
    /// Remove an environment change
    Remove {
        /// Habit ID
        id: String,
        /// obvious, attractive, easy or satisfying
        #[arg(long)]
        law: EnvironmentLaw,
        /// The change to remove, as listed by `habit env show`
        #[arg(long)]
        item: String,
    },
}

#[derive(Subcommand)]
pub enum TriggerAction {
    /// Add a trigger
    Add {
        /// Habit ID
        id: String,
        /// time, location, after-habit, emotional or environmental
        #[arg(long = "type")]
        trigger_type: TriggerType,
        /// Trigger value (a habit ID for after-habit)
        #[arg(long)]
        value: String,
    },
    /// Remove a trigger
    Remove {
        /// Habit ID
        id: String,
        /// Trigger ID
        trigger_id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, mut notices) = open_session()?;

    match action {
        HabitAction::Add {
            name,
            description,
            icon,
            difficulty,
            temptation,
            tags,
            from_catalog,
        } => {
            let input = match (from_catalog, name) {
                (Some(n), _) => catalog::suggestion(n)
                    .ok_or_else(|| format!("no catalog suggestion numbered {n}"))?
                    .to_new_habit(),
                (None, Some(name)) => NewHabit {
                    icon: icon.unwrap_or_else(|| habitloop_core::habit::DEFAULT_ICON.to_string()),
                    difficulty,
                    temptation_bundle: temptation,
                    identity_tags: tags,
                    ..NewHabit::named(name).with_description(description)
                },
                (None, None) => return Err("a habit name or --from-catalog is required".into()),
            };
            session.apply(SessionEvent::AddHabit(input))?;
            if let Some(habit) = session.state().habits.last() {
                print_json(habit)?;
            }
        }
        HabitAction::List => {
            let today = session.clock().today;
            print_json(&session.state().sorted_for_today(today))?;
        }
        HabitAction::Show { id } => {
            let state = session.state();
            let habit = state
                .habit(&id)
                .ok_or_else(|| format!("habit not found: {id}"))?;
            let labels: Vec<String> = habit
                .triggers
                .iter()
                .map(|t| t.label(|other| state.habit(other).map(|h| h.name.as_str())))
                .collect();
            print_json(&json!({
                "habit": habit,
                "triggerLabels": labels,
                "completedToday": habit.is_complete_on(session.clock().today),
            }))?;
        }
        HabitAction::Toggle { id, date } => {
            let outcome = runtime()?.block_on(session.dispatch(SessionEvent::ToggleCompletion {
                habit_id: id.clone(),
                date,
            }))?;
            notices.extend(outcome.notices);
            print_json(&json!({
                "habit": session.state().habit(&id),
                "notices": notices,
                "motivation": outcome.motivation,
            }))?;
        }
        HabitAction::Reset { id } => {
            let (reset, _) = session.apply(SessionEvent::ResetStreak {
                habit_id: id.clone(),
            })?;
            notices.extend(reset);
            print_json(&json!({
                "habit": session.state().habit(&id),
                "notices": notices,
            }))?;
        }
        HabitAction::Trigger { action } => run_trigger(&mut session, action)?,
        HabitAction::Env { action } => run_env(&mut session, action)?,
        HabitAction::Stack { id, after } => {
            session.apply(SessionEvent::StackHabit {
                habit_id: id.clone(),
                stacked_with: after,
            })?;
            print_json(&session.state().habit(&id))?;
        }
    }
    Ok(())
}

fn run_trigger(
    session: &mut Session,
    action: TriggerAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let (id, triggers) = match action {
        TriggerAction::Add {
            id,
            trigger_type,
            value,
        } => {
            let mut triggers = current_triggers(session, &id)?;
            triggers.push(HabitTrigger::new(&id, trigger_type, value)?);
            (id, triggers)
        }
        TriggerAction::Remove { id, trigger_id } => {
            let mut triggers = current_triggers(session, &id)?;
            let before = triggers.len();
            triggers.retain(|t| t.id != trigger_id);
            if triggers.len() == before {
                return Err(format!("trigger not found: {trigger_id}").into());
            }
            (id, triggers)
        }
    };

    session.apply(SessionEvent::UpdateTriggers {
        habit_id: id.clone(),
        triggers,
    })?;
    print_json(&session.state().habit(&id).map(|h| &h.triggers))
}

fn current_triggers(
    session: &Session,
    id: &str,
) -> Result<Vec<HabitTrigger>, Box<dyn std::error::Error>> {
    session
        .state()
        .habit(id)
        .map(|h| h.triggers.clone())
        .ok_or_else(|| format!("habit not found: {id}").into())
}

fn run_env(session: &mut Session, action: EnvAction) -> Result<(), Box<dyn std::error::Error>> {
    let (id, environment) = match action {
        EnvAction::Show { id } => {
            let environment = current_environment(session, &id)?;
            let suggestions: serde_json::Map<String, serde_json::Value> = EnvironmentLaw::ALL
                .iter()
                .filter(|&&law| environment.items(law).is_empty())
                .map(|&law| (law.to_string(), json!(law.suggestions())))
                .collect();
            return print_json(&json!({
                "environment": environment,
                "suggestions": suggestions,
            }));
        }
        EnvAction::Add { id, law, item } => {
            let mut environment = current_environment(session, &id)?;
            if !environment.add(law, &item)? {
                return Err(format!("already listed under {law}: {}", item.trim()).into());
            }
            (id, environment)
        }
        EnvAction::Remove { id, law, item } => {
            let mut environment = current_environment(session, &id)?;
            if !environment.remove(law, &item) {
                return Err(format!("not listed under {law}: {}", item.trim()).into());
            }
            (id, environment)
        }
    };

    session.apply(SessionEvent::SetEnvironment {
        habit_id: id.clone(),
        environment,
    })?;
    print_json(&session.state().habit(&id).map(|h| &h.environment))
}

fn current_environment(
    session: &Session,
    id: &str,
) -> Result<EnvironmentalDesign, Box<dyn std::error::Error>> {
    session
        .state()
        .habit(id)
        .map(|h| h.environment.clone())
        .ok_or_else(|| format!("habit not found: {id}").into())
}
