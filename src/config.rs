//! Token issuance configuration.

use chrono::TimeDelta;
use std::fmt;
use thiserror::Error;

/// Environment variable holding the shared token signing secret.
pub const TOKEN_SECRET_ENV: &str = "TASKGATE_TOKEN_SECRET";

/// Environment variable holding the token lifetime in seconds.
pub const TOKEN_TTL_ENV: &str = "TASKGATE_TOKEN_TTL_SECS";

const DEFAULT_SECRET: &str = "taskgate-development-secret";
const DEFAULT_TTL_SECS: i64 = 60 * 60;

/// Longest accepted token lifetime, in seconds (one year).
pub const MAX_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Errors returned while building a [`TokenConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required configuration variable {0}")]
    MissingVariable(&'static str),

    /// The signing secret is empty after trimming.
    #[error("token signing secret must not be empty")]
    EmptySecret,

    /// The token lifetime could not be parsed.
    #[error("invalid token lifetime '{0}', expected a positive number of seconds")]
    InvalidTtl(String),

    /// The token lifetime is shorter than one second.
    #[error("token lifetime must be positive, got {0} seconds")]
    NonPositiveTtl(i64),

    /// The token lifetime exceeds [`MAX_TTL_SECS`].
    #[error("token lifetime must not exceed {max} seconds, got {0}", max = MAX_TTL_SECS)]
    TtlTooLong(i64),
}

/// Shared signing secret and token lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenConfig {
    secret: String,
    ttl: TimeDelta,
}

impl TokenConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] for a blank secret,
    /// [`ConfigError::NonPositiveTtl`] when `ttl` is under one second, and
    /// [`ConfigError::TtlTooLong`] when it exceeds [`MAX_TTL_SECS`].
    pub fn new(secret: impl Into<String>, ttl: TimeDelta) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if ttl < TimeDelta::seconds(1) {
            return Err(ConfigError::NonPositiveTtl(ttl.num_seconds()));
        }
        if ttl > TimeDelta::seconds(MAX_TTL_SECS) {
            return Err(ConfigError::TtlTooLong(ttl.num_seconds()));
        }
        Ok(Self { secret, ttl })
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the secret is missing or either value is
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// The secret is required; the lifetime falls back to one hour.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the secret is missing or either value is
    /// invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret =
            lookup(TOKEN_SECRET_ENV).ok_or(ConfigError::MissingVariable(TOKEN_SECRET_ENV))?;
        let ttl = match lookup(TOKEN_TTL_ENV) {
            Some(raw) => {
                let seconds = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidTtl(raw.clone()))?;
                TimeDelta::try_seconds(seconds).ok_or(ConfigError::InvalidTtl(raw))?
            }
            None => TimeDelta::seconds(DEFAULT_TTL_SECS),
        };
        Self::new(secret, ttl)
    }

    /// Returns a copy with a different token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveTtl`] or [`ConfigError::TtlTooLong`]
    /// when `ttl` is out of range.
    pub fn with_ttl(self, ttl: TimeDelta) -> Result<Self, ConfigError> {
        Self::new(self.secret, ttl)
    }

    /// Returns the shared signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_owned(),
            ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}
