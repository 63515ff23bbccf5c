pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment, selected by `APP_ENV`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version reported by the liveness endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parses `key` into `T`, falling back to `default` when unset.
/// A set but unparsable value is an error, not a silent default.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_app_env() {
        let cases = [
            (None, Environment::Development),
            (Some("production"), Environment::Production),
            (Some("PRODUCTION"), Environment::Production),
            (Some("staging"), Environment::Development),
        ];

        for (value, expected) in cases {
            temp_env::with_var("APP_ENV", value, || {
                assert_eq!(Environment::from_env(), expected, "APP_ENV={:?}", value);
            });
        }
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("CATALOG_TEST_HOST", Some("db.internal"), || {
            assert_eq!(env_or_default("CATALOG_TEST_HOST", "localhost"), "db.internal");
        });
        temp_env::with_var_unset("CATALOG_TEST_HOST", || {
            assert_eq!(env_or_default("CATALOG_TEST_HOST", "localhost"), "localhost");
        });
    }

    #[test]
    fn test_env_required() {
        temp_env::with_var("CATALOG_TEST_URL", Some("postgresql://localhost"), || {
            assert_eq!(env_required("CATALOG_TEST_URL").unwrap(), "postgresql://localhost");
        });
        temp_env::with_var_unset("CATALOG_TEST_URL", || {
            let err = env_required("CATALOG_TEST_URL").unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "CATALOG_TEST_URL"));
        });
    }

    #[test]
    fn test_env_parse_or_uses_default_when_unset() {
        temp_env::with_var_unset("DB_MAX_CONNECTIONS_TEST", || {
            let value: u32 = env_parse_or("DB_MAX_CONNECTIONS_TEST", 10).unwrap();
            assert_eq!(value, 10);
        });
    }

    #[test]
    fn test_env_parse_or_parses_value() {
        temp_env::with_var("RUN_MIGRATIONS_TEST", Some(" false "), || {
            let value: bool = env_parse_or("RUN_MIGRATIONS_TEST", true).unwrap();
            assert!(!value);
        });
    }

    #[test]
    fn test_env_parse_or_rejects_garbage() {
        temp_env::with_var("DB_MIN_CONNECTIONS_TEST", Some("many"), || {
            let err = env_parse_or::<u32>("DB_MIN_CONNECTIONS_TEST", 1).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "DB_MIN_CONNECTIONS_TEST"));
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
