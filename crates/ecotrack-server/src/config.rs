use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

const DEV_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ECOTRACK_JWT_SECRET is unset or still a placeholder")]
    InsecureSecret,

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub token_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let allow_dev = get("ECOTRACK_ALLOW_DEV_SECRET").as_deref() == Some("1");
        let jwt_secret = match get("ECOTRACK_JWT_SECRET").unwrap_or_default() {
            s if s.is_empty() && allow_dev => DEV_SECRET.to_string(),
            s if s.is_empty() => return Err(ConfigError::InsecureSecret),
            s if PLACEHOLDER_SECRETS.contains(&s.as_str()) && !allow_dev => {
                return Err(ConfigError::InsecureSecret);
            }
            s => s,
        };

        Ok(Self {
            jwt_secret,
            db_path: get("ECOTRACK_DB_PATH").unwrap_or_else(|| "ecotrack.db".into()).into(),
            host: get("ECOTRACK_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse(&get, "ECOTRACK_PORT", 3000)?,
            token_days: parse(&get, "ECOTRACK_TOKEN_DAYS", 30)?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = format!("{}:{}", self.host, self.port);
        value.parse().map_err(|_| ConfigError::Invalid {
            name: "ECOTRACK_HOST",
            value,
        })
    }
}

fn parse<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}
