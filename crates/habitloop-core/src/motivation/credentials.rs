//! API key lookup: environment first, then the OS keyring.

use tracing::debug;

const SERVICE: &str = "habitloop";
const KEYRING_KEY: &str = "gemini_api_key";
const ENV_KEYS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Resolve the model API key, or `None` if nothing is configured.
pub fn api_key() -> Option<String> {
    for var in ENV_KEYS {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
    }
    match keyring_store::get(KEYRING_KEY) {
        Ok(value) => value,
        Err(e) => {
            debug!("keyring lookup failed: {e}");
            None
        }
    }
}

pub fn store_api_key(value: &str) -> Result<(), keyring::Error> {
    keyring_store::set(KEYRING_KEY, value)
}

pub fn clear_api_key() -> Result<(), keyring::Error> {
    keyring_store::delete(KEYRING_KEY)
}

/// Thin wrapper around the OS keyring for credential storage.
mod keyring_store {
    use super::SERVICE;

    pub fn get(key: &str) -> Result<Option<String>, keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)
    }

    pub fn delete(key: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
