//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::{Deserialize, Deserializer, de::Error as _};

use crate::models::password::PasswordHash;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `PORT` (optional): HTTP server port, defaults to 5000
/// - `FIREBASE_SERVICE_ACCOUNT_KEY_BASE64` (optional): base64 encoded Google
///   service account JSON. Without it the document store stays unconfigured and
///   store-backed endpoints answer 503.
/// - `GEMINI_API_KEY` (optional): reserved for a real chat provider
/// - `BCRYPT_COST` (optional): password hashing cost between 4 and 31,
///   defaults to 10
/// - `USE_MEMORY_STORE` (optional): keep documents in process memory instead
///   of Firestore, for local development. Defaults to false.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub firebase_service_account_key_base64: Option<String>,

    #[serde(default)]
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_bcrypt_cost", deserialize_with = "bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default)]
    pub use_memory_store: bool,
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

fn default_bcrypt_cost() -> u32 {
    PasswordHash::DEFAULT_COST
}

/// Reject costs bcrypt would refuse, so a bad value stops startup instead of
/// failing every registration.
fn bcrypt_cost<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let cost = u32::deserialize(deserializer)?;

    if !(PasswordHash::MIN_COST..=PasswordHash::MAX_COST).contains(&cost) {
        return Err(D::Error::custom(format!(
            "BCRYPT_COST must be between {} and {}, got {cost}",
            PasswordHash::MIN_COST,
            PasswordHash::MAX_COST
        )));
    }

    Ok(cost)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into its expected type (e.g. a non-numeric `PORT`), or if
    /// `BCRYPT_COST` is outside the range bcrypt accepts.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: bcrypt_cost -> BCRYPT_COST
        envy::from_env::<Config>()
    }

    /// The service account blob, treating an empty value as absent.
    pub fn service_account_key(&self) -> Option<&str> {
        self.firebase_service_account_key_base64
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");

        f.debug_struct("Config")
            .field("port", &self.port)
            .field(
                "firebase_service_account_key_base64",
                &redact(&self.firebase_service_account_key_base64),
            )
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("use_memory_store", &self.use_memory_store)
            .finish()
    }
}
