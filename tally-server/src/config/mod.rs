//! Service configuration
//!
//! Loaded from environment variables and validated up front. Missing or
//! malformed values come back as [`ConfigError`]; deciding to exit is left to
//! the binary.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DATABASE_URL` | yes | |
//! | `SUPABASE_URL` | yes | |
//! | `SUPABASE_KEY` | yes | |
//! | `PORT` | no | `5000` |
//! | `HOST` | no | `0.0.0.0` |
//! | `DB_MAX_CONNECTIONS` | no | `5` |
//! | `CORS_ORIGINS` | no | any origin |

mod secret;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub use secret::SecretString;

use crate::db::DEFAULT_MAX_CONNECTIONS;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {var}")]
    MissingRequired { var: String },

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Validated service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Connection string of the managed PostgreSQL database
    pub database_url: SecretString,
    /// Object storage endpoint
    pub storage_url: String,
    /// Object storage access key
    pub storage_key: SecretString,
    pub max_connections: u32,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] when `DATABASE_URL`,
    /// `SUPABASE_URL` or `SUPABASE_KEY` is unset or blank, and
    /// [`ConfigError::InvalidValue`] when a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingRequired { var: var.into() })
        };

        let database_url = required("DATABASE_URL")?;
        let storage_url = required("SUPABASE_URL")?;
        let storage_key = required("SUPABASE_KEY")?;

        reqwest::Url::parse(&storage_url).map_err(|e| ConfigError::InvalidValue {
            var: "SUPABASE_URL".into(),
            reason: e.to_string(),
        })?;

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let host = parse_or("HOST", lookup("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DB_MAX_CONNECTIONS".into(),
                reason: "must be at least 1".into(),
            });
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url: SecretString::new(database_url),
            storage_url,
            storage_key: SecretString::new(storage_key),
            max_connections,
            cors_origins,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.into(),
            reason: format!("cannot parse '{}'", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://tally@localhost/tally"),
        ("SUPABASE_URL", "https://project.example.co"),
        ("SUPABASE_KEY", "service-key"),
    ];

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.storage_key.expose(), "service-key");
        assert_eq!(config.bind_addr().port(), 5000);
    }

    #[test]
    fn each_credential_is_required() {
        for missing in ["DATABASE_URL", "SUPABASE_URL", "SUPABASE_KEY"] {
            let vars: Vec<_> = REQUIRED
                .iter()
                .copied()
                .filter(|(k, _)| *k != missing)
                .collect();
            let err = Config::from_lookup(lookup(&vars)).unwrap_err();
            assert_eq!(
                err,
                ConfigError::MissingRequired {
                    var: missing.into()
                }
            );
        }
    }

    #[test]
    fn blank_credential_is_missing() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/tally"),
            ("SUPABASE_URL", "https://project.example.co"),
            ("SUPABASE_KEY", "  "),
        ];

        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { var } if var == "SUPABASE_KEY"));
    }

    #[test]
    fn invalid_port_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "PORT"));
    }

    #[test]
    fn invalid_storage_url_rejected() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/tally"),
            ("SUPABASE_URL", "not a url"),
            ("SUPABASE_KEY", "k"),
        ];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "SUPABASE_URL"));
    }

    #[test]
    fn zero_connections_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("DB_MAX_CONNECTIONS", "0"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn cors_origins_split_and_trimmed() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CORS_ORIGINS", "http://localhost:5173, https://tally.example.com,"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "https://tally.example.com"]
        );
    }

    #[test]
    fn debug_output_hides_credentials() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("service-key"));
        assert!(!debug.contains("postgres://tally@localhost/tally"));
    }

    #[test]
    #[serial]
    fn from_env_reads_process_environment() {
        for (k, v) in REQUIRED {
            std::env::set_var(k, v);
        }
        std::env::set_var("PORT", "8080");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);

        std::env::remove_var("PORT");
        for (k, _) in REQUIRED {
            std::env::remove_var(k);
        }
    }

    #[test]
    #[serial]
    fn from_env_without_credentials_fails() {
        for (k, _) in REQUIRED {
            std::env::remove_var(k);
        }
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingRequired { .. })
        ));
    }
}
