use clap::Subcommand;
use habitloop_core::identity::IdentitySummary;
use habitloop_core::session::SessionEvent;
use habitloop_core::Feeling;
use serde_json::json;

use super::{open_session, print_json, runtime, Session};

#[derive(Subcommand)]
pub enum IdentityAction {
    /// Define (or redefine) who you want to become: "I am a ..."
    Set {
        /// Identity statement, e.g. "runner"
        statement: String,
        /// Habit ID that supports the identity (repeatable)
        #[arg(long = "habit")]
        habits: Vec<String>,
    },
    /// Link a habit to the identity
    Link {
        /// Habit ID
        habit_id: String,
    },
    /// Unlink a habit from the identity
    Unlink {
        /// Habit ID
        habit_id: String,
    },
    /// Show score, badge and recent evidence
    Show,
    /// Reflect on a completed habit and record evidence
    Reflect {
        /// Habit ID
        habit_id: String,
        /// amazing, good, neutral or challenging
        #[arg(long)]
        feeling: Feeling,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
        /// How aligned with the identity it felt (1-5)
        #[arg(long)]
        alignment: Option<u8>,
    },
}

pub fn run(action: IdentityAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, _) = open_session()?;

    match action {
        IdentityAction::Set { statement, habits } => {
            session.apply(SessionEvent::DefineIdentity {
                statement,
                habit_ids: habits,
            })?;
            show(&session)?;
        }
        IdentityAction::Link { habit_id } => {
            session.apply(SessionEvent::LinkHabit { habit_id })?;
            show(&session)?;
        }
        IdentityAction::Unlink { habit_id } => {
            session.apply(SessionEvent::UnlinkHabit { habit_id })?;
            show(&session)?;
        }
        IdentityAction::Show => show(&session)?,
        IdentityAction::Reflect {
            habit_id,
            feeling,
            note,
            alignment,
        } => {
            let outcome = runtime()?.block_on(session.dispatch(SessionEvent::SaveReflection {
                habit_id,
                feeling,
                note,
                identity_alignment: alignment,
            }))?;
            print_json(&json!({
                "recorded": outcome.motivation.is_some(),
                "identity": session.state().identity.as_ref().map(IdentitySummary::from),
                "motivation": outcome.motivation,
            }))?;
        }
    }
    Ok(())
}

fn show(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let summary = session.state().identity.as_ref().map(IdentitySummary::from);
    print_json(&summary)
}
