use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("expected development or production, got {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RateLimitSettings {
    pub window: Duration,
    pub max_requests: u32,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// `*` or a comma separated list of allowed origins
    pub cors_origin: String,
    pub rate_limit: RateLimitSettings,
    /// Key the rate limiter on the first `X-Forwarded-For` hop instead of
    /// the peer address. Only safe behind a proxy that overwrites the header.
    pub trust_proxy: bool,
    pub environment: Environment,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let window_secs: u64 = try_load("RATE_LIMIT_WINDOW_SECS", "900")?;
        let max_requests: u32 = try_load("RATE_LIMIT_MAX_REQUESTS", "100")?;

        if window_secs == 0 {
            return Err(invalid("RATE_LIMIT_WINDOW_SECS", "must be at least 1"));
        }
        if max_requests == 0 {
            return Err(invalid("RATE_LIMIT_MAX_REQUESTS", "must be at least 1"));
        }

        Ok(Self {
            database_url: load_or("DATABASE_URL", "sqlite://bookings.db"),
            port: try_load("PORT", "5000")?,
            cors_origin: load_or("CORS_ORIGIN", "*"),
            rate_limit: RateLimitSettings {
                window: Duration::from_secs(window_secs),
                max_requests,
            },
            trust_proxy: try_load("TRUST_PROXY", "false")?,
            environment: try_load("APP_ENV", "production")?,
            log_dir: load_or("LOG_DIR", "./logs"),
        })
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { key: key.to_string(), reason: reason.into() }
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    parse_value(key, &load_or(key, default))
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| invalid(key, e.to_string()))
}
