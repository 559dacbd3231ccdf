use crate::capture::upload::RetryPolicy;
use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_password_hash: String,
    pub admin_token_ttl_hours: i64,
    /// Origin used when building candidate links, e.g. `https://assess.example.com`.
    pub public_origin: String,
    pub uploads_dir: String,
    pub public_rps: u32,
    pub admin_rps: u32,
    pub max_upload_mb: usize,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            admin_password_hash: get_env("ADMIN_PASSWORD_HASH")?,
            admin_token_ttl_hours: get_env_parse_or("ADMIN_TOKEN_TTL_HOURS", 12)?,
            public_origin: get_env("PUBLIC_ORIGIN")?
                .trim_end_matches('/')
                .to_string(),
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            public_rps: get_env_parse("PUBLIC_RPS")?,
            admin_rps: get_env_parse("ADMIN_RPS")?,
            max_upload_mb: get_env_parse_or("MAX_UPLOAD_MB", 100)?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn session_url(&self, token: &str) -> String {
        format!("{}/test/{}", self.public_origin, token)
    }
}

/// Settings for the candidate-side capture client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = RetryPolicy::default();
        Ok(Self {
            base_url: get_env("ASSESSMENT_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            retry: RetryPolicy {
                attempts: get_env_parse_or("UPLOAD_ATTEMPTS", defaults.attempts)?,
                timeout: Duration::from_secs(get_env_parse_or(
                    "UPLOAD_TIMEOUT_SECS",
                    defaults.timeout.as_secs(),
                )?),
                backoff: Duration::from_millis(get_env_parse_or(
                    "UPLOAD_BACKOFF_MS",
                    defaults.backoff.as_millis() as u64,
                )?),
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(_) => get_env_parse(name),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    init_config_with(Config::from_env()?)
}

pub fn init_config_with(config: Config) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
