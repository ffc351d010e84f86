//! Runtime settings from the process environment (after an optional `.env`).

use crate::error::ConfigError;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://holocron.db";
pub const DEFAULT_LOG_FILTER: &str = "holocron=info,tower_http=info";

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Serialize user passwords in responses, as the API always has.
    pub expose_passwords: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: "0.0.0.0".into(),
            port: 3000,
            max_connections: 5,
            expose_passwords: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        if !database_url.starts_with("sqlite:") {
            return Err(ConfigError::UnsupportedDatabase(database_url));
        }
        Ok(Settings {
            database_url,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            expose_passwords: parse_or(&lookup, "EXPOSE_PASSWORDS", defaults.expose_passwords)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            tracing::warn!(key, error = %e, "invalid setting");
            ConfigError::Invalid { key, value: raw }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_address(), "0.0.0.0:3000");
        assert!(s.expose_passwords);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "8080"),
            ("EXPOSE_PASSWORDS", "false"),
        ])
        .unwrap();
        assert_eq!(s.database_url, "sqlite::memory:");
        assert_eq!(s.port, 8080);
        assert!(!s.expose_passwords);
    }

    #[test]
    fn rejects_bad_port() {
        let err = settings(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn rejects_non_sqlite_url() {
        let err = settings(&[("DATABASE_URL", "postgres://localhost/holocron")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDatabase(_)));
    }
}
