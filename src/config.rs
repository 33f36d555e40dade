/*
 * Responsibility
 * - Read environment variables (.env included) into Config
 * - DATABASE_URL / DATABASE_NAME are optional: missing values disable the database
 *   instead of failing startup
 * - Only a broken listen address is fatal
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Connection settings for the document database.
///
/// Both values are kept as given (empty values count as unset) so the
/// diagnostic endpoint can report what the process was started with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub name: Option<String>,
    pub server_selection_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub body_limit_bytes: usize,
    pub database: DatabaseSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(1024 * 1024);

        let server_selection_timeout = lookup("DATABASE_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let database = DatabaseSettings {
            url: non_empty("DATABASE_URL"),
            name: non_empty("DATABASE_NAME"),
            server_selection_timeout,
        };

        Ok(Self {
            addr,
            app_env,
            body_limit_bytes,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = config_from(&[]);

        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.name, None);
        assert_eq!(
            config.database.server_selection_timeout,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn reads_database_settings() {
        let config = config_from(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "comphilfe"),
            ("DATABASE_TIMEOUT_SECONDS", "2"),
        ]);

        assert_eq!(
            config.database.url.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.database.name.as_deref(), Some("comphilfe"));
        assert_eq!(
            config.database.server_selection_timeout,
            Duration::from_secs(2)
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("DATABASE_URL", "  "), ("DATABASE_NAME", "comphilfe")]);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.name.as_deref(), Some("comphilfe"));

        let config = config_from(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", ""),
        ]);
        assert_eq!(config.database.name, None);
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("BODY_LIMIT_BYTES", "0"),
            ("DATABASE_TIMEOUT_SECONDS", "-3"),
        ]);

        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
        assert_eq!(
            config.database.server_selection_timeout,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn production_env_is_case_insensitive() {
        assert_eq!(
            config_from(&[("APP_ENV", "PROD")]).app_env,
            AppEnv::Production
        );
        assert!(config_from(&[("APP_ENV", "Production")]).app_env.is_production());
        assert!(!config_from(&[("APP_ENV", "staging")]).app_env.is_production());
    }
}
