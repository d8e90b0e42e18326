use std::str::FromStr;

use serde::Deserialize;

/// Longest token lifetime accepted from `JWT_EXPIRY_HOURS` (ten years).
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 366 * 10;

/// What a producer does when the reminder queue is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Log a warning and discard the notification. The request path never waits.
    Drop,
    /// Wait for the dispatcher to free a slot. A slow dispatcher stalls the caller.
    Block,
}

impl FromStr for OverflowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(OverflowPolicy::Drop),
            "block" => Ok(OverflowPolicy::Block),
            other => Err(anyhow::anyhow!(
                "unknown overflow policy '{}', expected 'drop' or 'block'",
                other
            )),
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverflowPolicy::Drop => write!(f, "drop"),
            OverflowPolicy::Block => write!(f, "block"),
        }
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// JWT secret for API authentication
    pub jwt_secret: String,

    /// JWT token expiry in hours
    pub jwt_expiry_hours: u64,

    /// Address the HTTP server binds to (default: 0.0.0.0:8080)
    pub bind_addr: String,

    /// Capacity of the reminder notification queue (default: 100)
    pub reminder_queue_capacity: usize,

    /// Behaviour of enqueue when the reminder queue is full (default: drop)
    pub reminder_overflow_policy: OverflowPolicy,

    /// Upper bound on concurrent scheduling attempts. `None` means unbounded.
    pub reminder_max_in_flight: Option<usize>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let reminder_queue_capacity: usize = std::env::var("REMINDER_QUEUE_CAPACITY")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("REMINDER_QUEUE_CAPACITY must be a valid usize"))?;
        if reminder_queue_capacity == 0 {
            anyhow::bail!("REMINDER_QUEUE_CAPACITY must be greater than zero");
        }

        let reminder_max_in_flight = match std::env::var("REMINDER_MAX_IN_FLIGHT") {
            Ok(raw) if !raw.trim().is_empty() => {
                let limit: usize = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("REMINDER_MAX_IN_FLIGHT must be a valid usize")
                })?;
                if limit == 0 {
                    anyhow::bail!("REMINDER_MAX_IN_FLIGHT must be greater than zero");
                }
                Some(limit)
            }
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
            jwt_expiry_hours: parse_jwt_expiry_hours(
                &std::env::var("JWT_EXPIRY_HOURS").unwrap_or_else(|_| "24".to_string()),
            )?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            reminder_queue_capacity,
            reminder_overflow_policy: std::env::var("REMINDER_OVERFLOW_POLICY")
                .unwrap_or_else(|_| "drop".to_string())
                .parse()?,
            reminder_max_in_flight,
        })
    }
}

fn parse_jwt_expiry_hours(raw: &str) -> anyhow::Result<u64> {
    let hours: u64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("JWT_EXPIRY_HOURS must be a valid u64"))?;
    if hours == 0 || hours > MAX_JWT_EXPIRY_HOURS {
        anyhow::bail!("JWT_EXPIRY_HOURS must be between 1 and {}", MAX_JWT_EXPIRY_HOURS);
    }
    Ok(hours)
}
