use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};
use tracing::level_filters::LevelFilter;

#[derive(Deserialize)]
pub struct SSLConfig {
    pub private_key_file: PathBuf,
    pub certificate_chain_file: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub disabled: bool,
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, anyhow::Error> {
        if self.disabled {
            return Ok(LevelFilter::OFF);
        }
        LevelFilter::from_str(&self.level)
            .with_context(|| format!("Invalid log level: {}", self.level))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            disabled: false,
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub origins: Vec<String>,
    /// Seconds a preflight response may be cached.
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

/// Where bearer tokens are verified. Exactly one of `secret` (HS256) and `public_key_file`
/// (RS256 PEM) is expected.
#[derive(Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub secret: Option<String>,
    pub public_key_file: Option<PathBuf>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default)]
    pub run_migrations: bool,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub telemetry: Option<TelemetryConfig>,
    pub ssl: Option<SSLConfig>,
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        Self::parse(&config)
    }

    pub fn parse(config: &str) -> Result<Config, anyhow::Error> {
        toml::from_str(config).with_context(|| "Unable to parse config")
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let database_url = read_env("DATABASE_URL")?;
        let max_pool_size = match read_optional_env("MAX_POOL_SIZE") {
            Some(size) => size.parse().context("Unable to parse MAX_POOL_SIZE value")?,
            None => default_max_pool_size(),
        };
        let run_migrations = match read_optional_env("RUN_MIGRATIONS") {
            Some(run) => run.parse().context("Unable to parse RUN_MIGRATIONS value")?,
            None => false,
        };
        let port = match read_optional_env("PORT") {
            Some(port) => port.parse().context("Unable to parse PORT value")?,
            None => default_port(),
        };

        let log = LogConfig {
            level: read_optional_env("LOG_LEVEL").unwrap_or_else(default_log_level),
            disabled: false,
        };
        let cors = CorsConfig {
            origins: read_optional_env("CORS_ORIGINS")
                .map(|origins| split_list(&origins))
                .unwrap_or_default(),
            max_age: default_cors_max_age(),
        };
        let auth = AuthConfig {
            secret: read_optional_env("AUTH_SECRET"),
            public_key_file: read_optional_env("AUTH_PUBLIC_KEY_FILE").map(PathBuf::from),
            issuer: read_optional_env("AUTH_ISSUER"),
            audience: read_optional_env("AUTH_AUDIENCE"),
        };
        let telemetry = match (
            read_optional_env("OTLP_ENDPOINT"),
            read_optional_env("OTLP_API_KEY"),
        ) {
            (Some(endpoint), Some(api_key)) => Some(TelemetryConfig {
                endpoint,
                api_key,
                api_key_header: default_api_key_header(),
            }),
            (None, None) => None,
            _ => return Err(anyhow!("OTLP_ENDPOINT and OTLP_API_KEY must be set together")),
        };

        let config = Config {
            database_url,
            max_pool_size,
            run_migrations,
            port,
            log,
            cors,
            auth,
            telemetry,
            ssl: None,
        };
        Ok(config)
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}

fn read_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_max_age() -> usize {
    3 * 60 * 60
}

fn default_api_key_header() -> String {
    "x-honeycomb-team".to_string()
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_port() -> u16 {
    9000
}

#[cfg(test)]
mod tests {
    use core::prelude::v1::test;
    use super::{split_list, Config};
    use tracing::level_filters::LevelFilter;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse(r#"database_url = "postgres://localhost/budget""#).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/budget");
        assert_eq!(config.max_pool_size, 10);
        assert!(!config.run_migrations);
        assert_eq!(config.port, 9000);
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::INFO);
        assert!(config.cors.origins.is_empty());
        assert_eq!(config.cors.max_age, 10800);
        assert!(config.auth.secret.is_none());
        assert!(config.telemetry.is_none());
        assert!(config.ssl.is_none());
    }

    #[test]
    fn full_config() {
        let config = Config::parse(
            r#"
            database_url = "postgres://localhost/budget"
            run_migrations = true
            port = 8080

            [log]
            level = "debug"

            [cors]
            origins = ["https://frontendweb-budget.example"]
            max_age = 60

            [auth]
            secret = "not so secret"
            issuer = "https://budget.eu.auth0.com/"
            audience = "https://budget-api"

            [telemetry]
            endpoint = "https://api.honeycomb.io"
            api_key = "key"
            "#,
        )
        .unwrap();

        assert!(config.run_migrations);
        assert_eq!(config.port, 8080);
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.cors.origins, vec!["https://frontendweb-budget.example"]);
        assert_eq!(config.cors.max_age, 60);
        assert_eq!(config.auth.secret.as_deref(), Some("not so secret"));
        assert_eq!(
            config.auth.audience.as_deref(),
            Some("https://budget-api")
        );
        let telemetry = config.telemetry.unwrap();
        assert_eq!(telemetry.api_key_header, "x-honeycomb-team");
    }

    #[test]
    fn disabled_log_turns_everything_off() {
        let config = Config::parse(
            r#"
            database_url = "postgres://localhost/budget"
            [log]
            level = "debug"
            disabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn invalid_log_level() {
        let config = Config::parse(
            r#"
            database_url = "postgres://localhost/budget"
            [log]
            level = "chatty"
            "#,
        )
        .unwrap();
        assert!(config.log.level_filter().is_err());
    }

    #[test]
    fn missing_database_url() {
        assert!(Config::parse("port = 9000").is_err());
    }

    #[test]
    fn splits_comma_separated_lists() {
        assert_eq!(
            split_list("https://a.example, https://b.example,,"),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
