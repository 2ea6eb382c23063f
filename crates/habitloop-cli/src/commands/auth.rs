use clap::Subcommand;
use habitloop_core::motivation::credentials;
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the Gemini API key in the OS keyring
    SetKey {
        /// API key
        key: String,
    },
    /// Remove the stored API key
    ClearKey,
    /// Check whether an API key is available
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                return Err("API key must not be empty".into());
            }
            credentials::store_api_key(key)?;
            println!("API key stored");
        }
        AuthAction::ClearKey => {
            credentials::clear_api_key()?;
            println!("API key removed");
        }
        AuthAction::Status => {
            print_json(&json!({
                "service": "gemini",
                "authenticated": credentials::api_key().is_some(),
            }))?;
        }
    }
    Ok(())
}
