pub mod auth;
pub mod catalog;
pub mod config;
pub mod day;
pub mod habit;
pub mod identity;
pub mod stats;

use habitloop_core::error::MotivationError;
use habitloop_core::motivation::{
    credentials, IdentityMotivationRequest, MotivationGenerator, MotivationMessage,
};
use habitloop_core::session::SessionNotice;
use habitloop_core::{Clock, Config, Database, Disabled, GeminiClient, SessionController};
use serde::Serialize;
use tracing::debug;

pub type Session = SessionController<Database, Generator>;

/// Generator picked from config at startup.
pub enum Generator {
    Gemini(GeminiClient),
    Off(Disabled),
}

impl Generator {
    pub fn from_config(config: &Config) -> Result<Self, MotivationError> {
        if !config.motivation.enabled {
            debug!("motivation disabled in config");
            return Ok(Generator::Off(Disabled));
        }
        let client = GeminiClient::new(&config.motivation, credentials::api_key())?;
        debug!(model = client.model(), "using gemini for motivation");
        Ok(Generator::Gemini(client))
    }
}

impl MotivationGenerator for Generator {
    async fn generate_motivation_message(
        &self,
        habit_name: &str,
        streak_length: u32,
    ) -> Result<MotivationMessage, MotivationError> {
        match self {
            Generator::Gemini(c) => c.generate_motivation_message(habit_name, streak_length).await,
            Generator::Off(d) => d.generate_motivation_message(habit_name, streak_length).await,
        }
    }

    async fn generate_identity_motivation(
        &self,
        request: &IdentityMotivationRequest,
    ) -> Result<MotivationMessage, MotivationError> {
        match self {
            Generator::Gemini(c) => c.generate_identity_motivation(request).await,
            Generator::Off(d) => d.generate_identity_motivation(request).await,
        }
    }
}

/// Open the database, load config and run the day-boundary check.
pub fn open_session() -> Result<(Session, Vec<SessionNotice>), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let generator = Generator::from_config(&config)?;
    let opened = SessionController::open(db, generator, &config.motivation, Clock::system())?;
    Ok(opened)
}

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
