use std::{env, net::SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment (and `.env`, when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// JWT validation is enabled only when an issuer is configured
    pub oidc_issuer_url: Option<String>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let run_migrations = match var("RUN_MIGRATIONS") {
            None => true,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                name: "RUN_MIGRATIONS",
                value,
            })?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            oidc_issuer_url: var("OIDC_ISSUER_URL"),
            run_migrations,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/catalog")]).unwrap();

        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.run_migrations);
        assert!(config.oidc_issuer_url.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(
            config(&[("DATABASE_URL", " ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("OIDC_ISSUER_URL", "https://issuer.example.com"),
            ("RUN_MIGRATIONS", "off"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert!(!config.run_migrations);
        assert_eq!(
            config.oidc_issuer_url.as_deref(),
            Some("https://issuer.example.com")
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("DATABASE_URL", "x"), ("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { name: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("DATABASE_URL", "x"), ("RUN_MIGRATIONS", "maybe")]),
            Err(ConfigError::Invalid { name: "RUN_MIGRATIONS", .. })
        ));
    }
}
