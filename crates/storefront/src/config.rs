//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KUYEN_BASE_URL` - Public URL of the storefront (default: `https://kuyen.cl`)
//! - `KUYEN_DATA_DIR` - Directory for the cart slot and catalog file (default: `data`)
//! - `KUYEN_SESSION_SECRET` - Session signing secret; when set it must be
//!   at least 32 characters and not an obvious placeholder

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding the cart slot and the catalog file
    pub data_dir: PathBuf,
    /// Session signing secret, if sessions are enabled
    pub session_secret: Option<SecretString>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable is invalid or the session
    /// secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("KUYEN_BASE_URL", "https://kuyen.cl");
        let data_dir = PathBuf::from(get_env_or_default("KUYEN_DATA_DIR", "data"));

        let session_secret = match get_optional_env("KUYEN_SESSION_SECRET") {
            Some(value) => {
                validate_session_secret(&value, "KUYEN_SESSION_SECRET")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            data_dir,
            session_secret,
        })
    }

    /// Path of the catalog products file inside the data directory.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    /// Whether the session secret is configured.
    #[must_use]
    pub fn has_session_secret(&self) -> bool {
        self.session_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret is long enough and not a placeholder.
fn validate_session_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
