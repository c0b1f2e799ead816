use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const ONE_DAY_SECS: u64 = 86_400;
const MAX_SESSION_TTL_SECS: i64 = 365 * 86_400;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    pub session_ttl: chrono::Duration,
    pub session_sweep_interval: Duration,
    pub session_cookie_name: String,
    pub cookie_secure: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 8080)?;
        let ttl_secs: u64 = parse_or(&lookup, "SESSION_TTL_SECS", ONE_DAY_SECS)?;
        let sweep_secs: u64 = parse_or(&lookup, "SESSION_SWEEP_SECS", ONE_DAY_SECS)?;
        if sweep_secs == 0 {
            anyhow::bail!("SESSION_SWEEP_SECS must be greater than zero");
        }

        let ttl_secs = i64::try_from(ttl_secs).context("SESSION_TTL_SECS is out of range")?;
        if ttl_secs == 0 || ttl_secs > MAX_SESSION_TTL_SECS {
            anyhow::bail!(
                "SESSION_TTL_SECS must be between 1 and {} (365 days), got {}",
                MAX_SESSION_TTL_SECS,
                ttl_secs
            );
        }
        let session_ttl = chrono::Duration::try_seconds(ttl_secs)
            .context("SESSION_TTL_SECS is out of range")?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            bind_address: format!("0.0.0.0:{}", port),
            allowed_origins,
            session_ttl,
            session_sweep_interval: Duration::from_secs(sweep_secs),
            session_cookie_name: lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "sid".to_string()),
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", false)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
