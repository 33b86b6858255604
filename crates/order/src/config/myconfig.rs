use anyhow::{Context, Result, anyhow};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ORDER_TIMEZONE: &str = "Europe/Moscow";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub order_timezone: String,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = match lookup("PORT") {
            Some(port_str) => port_str
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            None => DEFAULT_PORT,
        };

        let order_timezone = lookup("ORDER_TIMEZONE")
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORDER_TIMEZONE.to_string());

        let otel_endpoint = lookup("OTEL_ENDPOINT").filter(|v| !v.is_empty());

        let is_dev = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            run_migrations,
            port,
            order_timezone,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/orders")])).unwrap();

        assert_eq!(config.database_url, "postgres://db/orders");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.order_timezone, "Europe/Moscow");
        assert!(!config.run_migrations);
        assert!(config.otel_endpoint.is_none());
        assert!(!config.is_dev);
        assert!(!config.enable_file_log);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn run_migrations_rejects_unknown_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/orders"),
            ("RUN_MIGRATIONS", "yes"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/orders"),
            ("RUN_MIGRATIONS", "true"),
            ("PORT", "9000"),
            ("ORDER_TIMEZONE", "UTC"),
            ("OTEL_ENDPOINT", "http://otel-collector:4317"),
            ("DEV_MODE", "1"),
            ("ENABLE_FILE_LOG", "true"),
        ]))
        .unwrap();

        assert!(config.run_migrations);
        assert_eq!(config.port, 9000);
        assert_eq!(config.order_timezone, "UTC");
        assert_eq!(
            config.otel_endpoint.as_deref(),
            Some("http://otel-collector:4317")
        );
        assert!(config.is_dev);
        assert!(config.enable_file_log);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/orders"),
            ("PORT", "not-a-port"),
        ]));

        assert!(result.is_err());
    }
}
