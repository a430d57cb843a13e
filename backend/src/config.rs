//! Boot-time configuration read from `ARTICLES_*` environment variables.
//!
//! Every value has a default, so the service starts with no environment at
//! all. Values that are present but malformed abort boot with a `ConfigError`
//! instead of silently falling back.

use crate::session::DEFAULT_SESSION_TTL;
use crate::store::LookupField;
use actix_web::cookie::Key;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_DATABASE: &str = "app.db";

/// Minimum decoded length of `ARTICLES_SECRET_KEY`, imposed by the cookie signer.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("ARTICLES_SECRET_KEY must decode to at least 64 bytes, got {0}")]
    SecretTooShort(usize),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Raw signing secret; `None` means a random key is generated per boot.
    pub secret_key: Option<Vec<u8>>,
    pub login_field: LookupField,
    pub view_limit: u64,
    pub seed_demo: bool,
    /// Idle time before a session is dropped; also the cookie `Max-Age`.
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE),
            secret_key: None,
            login_field: LookupField::default(),
            view_limit: crate::gate::DEFAULT_VIEW_LIMIT,
            seed_demo: false,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("ARTICLES_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("ARTICLES_PORT") {
            config.port = parse("ARTICLES_PORT", port)?;
        }
        if let Some(path) = lookup("ARTICLES_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(secret) = lookup("ARTICLES_SECRET_KEY") {
            let bytes = STANDARD
                .decode(secret.trim())
                .map_err(|e| invalid("ARTICLES_SECRET_KEY", "<redacted>", e))?;
            if bytes.len() < MIN_SECRET_LEN {
                return Err(ConfigError::SecretTooShort(bytes.len()));
            }
            config.secret_key = Some(bytes);
        }
        if let Some(field) = lookup("ARTICLES_LOGIN_FIELD") {
            config.login_field = parse("ARTICLES_LOGIN_FIELD", field)?;
        }
        if let Some(limit) = lookup("ARTICLES_VIEW_LIMIT") {
            config.view_limit = parse("ARTICLES_VIEW_LIMIT", limit)?;
        }
        if let Some(seed) = lookup("ARTICLES_SEED_DEMO") {
            config.seed_demo = parse("ARTICLES_SEED_DEMO", seed)?;
        }
        if let Some(ttl) = lookup("ARTICLES_SESSION_TTL") {
            let secs: u64 = parse("ARTICLES_SESSION_TTL", ttl.clone())?;
            if secs == 0 {
                return Err(invalid("ARTICLES_SESSION_TTL", &ttl, "must be at least one second"));
            }
            config.session_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Returns the key used to sign session cookies.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        match &self.secret_key {
            Some(bytes) => {
                Key::try_from(bytes.as_slice()).map_err(|_| ConfigError::SecretTooShort(bytes.len()))
            }
            None => {
                warn!("ARTICLES_SECRET_KEY not set, session cookies will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| invalid(var, &value, e))
}

fn invalid(var: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5555);
        assert_eq!(config.database_path, PathBuf::from("app.db"));
        assert_eq!(config.login_field, LookupField::Username);
        assert_eq!(config.view_limit, 3);
        assert!(!config.seed_demo);
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert!(config.secret_key.is_none());
        assert!(config.session_key().is_ok());
    }

    #[test]
    fn overrides_are_applied() {
        let secret = STANDARD.encode([7u8; 64]);
        let config = load(&[
            ("ARTICLES_PORT", "8080"),
            ("ARTICLES_LOGIN_FIELD", "name"),
            ("ARTICLES_VIEW_LIMIT", "10"),
            ("ARTICLES_SEED_DEMO", "true"),
            ("ARTICLES_SESSION_TTL", "1800"),
            ("ARTICLES_SECRET_KEY", &secret),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.login_field, LookupField::Name);
        assert_eq!(config.view_limit, 10);
        assert!(config.seed_demo);
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.secret_key.as_deref(), Some(&[7u8; 64][..]));
        assert!(config.session_key().is_ok());
    }

    #[test]
    fn malformed_port_is_rejected() {
        let err = load(&[("ARTICLES_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ARTICLES_PORT", .. }));
    }

    #[test]
    fn unknown_login_field_is_rejected() {
        let err = load(&[("ARTICLES_LOGIN_FIELD", "email")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ARTICLES_LOGIN_FIELD", .. }));
    }

    #[test]
    fn zero_session_ttl_is_rejected() {
        let err = load(&[("ARTICLES_SESSION_TTL", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ARTICLES_SESSION_TTL", .. }));
    }

    #[test]
    fn short_secret_is_rejected() {
        let secret = STANDARD.encode([1u8; 16]);
        let err = load(&[("ARTICLES_SECRET_KEY", &secret)]).unwrap_err();
        assert!(matches!(err, ConfigError::SecretTooShort(16)));
    }
}
