use std::env;

use anyhow::{Context, Result, anyhow};
use chrono::Weekday;
use dotenvy::dotenv;

use crate::leave::LeavePolicy;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub leave_policy: LeavePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let monthly_limit: f64 = or_default("MONTHLY_PAID_LEAVE_LIMIT", "1.5")
            .parse()
            .context("MONTHLY_PAID_LEAVE_LIMIT must be a number")?;
        if !monthly_limit.is_finite() || monthly_limit < 0.0 {
            return Err(anyhow!("MONTHLY_PAID_LEAVE_LIMIT must be a non-negative number"));
        }

        let weekend_days = parse_weekend_days(&or_default("WEEKEND_DAYS", "Sat,Sun"))?;

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            log_dir: or_default("LOG_DIR", "logs"),

            rate_protected_per_min: or_default("RATE_PROTECTED_PER_MIN", "1000")
                .parse()
                .context("RATE_PROTECTED_PER_MIN must be an unsigned integer")?,

            api_prefix: or_default("API_PREFIX", "/api"),

            leave_policy: LeavePolicy {
                monthly_limit,
                weekend_days,
                ..LeavePolicy::default()
            },
        })
    }
}

/// "Sat,Sun" -> [Sat, Sun]. An empty list means no weekend at all.
fn parse_weekend_days(value: &str) -> Result<Vec<Weekday>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .map(|day| {
            day.parse::<Weekday>()
                .map_err(|_| anyhow!("WEEKEND_DAYS contains an unknown day '{day}'"))
        })
        .collect()
}
