use std::time::Duration;

use anyhow::Context;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret. `None` means every sign/verify fails with a config error.
    pub secret: Option<String>,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let port = std::env::var("APP_PORT")
            .or_else(|_| std::env::var("PORT"))
            .unwrap_or_else(|_| "5000".into());
        let port = port
            .parse::<u16>()
            .with_context(|| format!("invalid port {port:?}"))?;

        let ttl = std::env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "7d".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "ideaboard".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "ideaboard-users".into()),
            ttl: parse_ttl(&ttl).with_context(|| format!("invalid JWT_EXPIRES_IN {ttl:?}"))?,
        };

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );

        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            jwt,
            cors_origins,
        })
    }
}

/// Parses a token lifetime. A bare number is seconds (`3600`); otherwise a
/// number, possibly fractional, followed by a unit in short or long form:
/// `7d`, `12h`, `1.5h`, `2 days`, `1y`. Units are case-insensitive and the
/// result must be at least one second.
pub fn parse_ttl(raw: &str) -> anyhow::Result<Duration> {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;

    let raw = raw.trim();
    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split);
    let n: f64 = number.parse().context("expected a number")?;
    let secs_per_unit = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 0.001,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => 7.0 * DAY,
        "y" | "yr" | "yrs" | "year" | "years" => 365.25 * DAY,
        other => anyhow::bail!("unknown unit {other:?}"),
    };
    let secs = n * secs_per_unit;
    anyhow::ensure!(
        secs.is_finite() && secs >= 1.0,
        "lifetime must be at least one second"
    );
    Ok(Duration::from_secs(secs as u64))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
