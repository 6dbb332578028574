//! Server configuration, read from the environment once at startup

use parks_core::pagination::DEFAULT_MAX_PAGE_LIMIT;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    /// Presence selects the relational backend
    pub database_url: Option<String>,
    pub static_dir: PathBuf,
    pub max_page_limit: u32,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        info!("Loading configuration from environment...");

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:5000".to_string());

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dist/public"));

        let config = Self {
            bind_address,
            database_url,
            static_dir,
            max_page_limit: parse_or(&lookup, "MAX_PAGE_LIMIT", DEFAULT_MAX_PAGE_LIMIT),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5),
        };

        info!(
            "Config loaded: bind={}, database={}, static_dir={}, max_page_limit={}",
            config.bind_address,
            if config.database_url.is_some() { "set" } else { "unset" },
            config.static_dir.display(),
            config.max_page_limit
        );

        config
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_address, "0.0.0.0:5000");
        assert_eq!(config.static_dir, PathBuf::from("dist/public"));
        assert_eq!(config.max_page_limit, DEFAULT_MAX_PAGE_LIMIT);
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        assert_eq!(config(&[("DATABASE_URL", "  ")]).database_url, None);
        assert_eq!(
            config(&[("DATABASE_URL", "sqlite://parks.db")]).database_url,
            Some("sqlite://parks.db".to_string())
        );
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = config(&[("MAX_PAGE_LIMIT", "lots"), ("DB_MAX_CONNECTIONS", "8")]);
        assert_eq!(config.max_page_limit, DEFAULT_MAX_PAGE_LIMIT);
        assert_eq!(config.db_max_connections, 8);
    }
}
