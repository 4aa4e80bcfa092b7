//! Service configuration

use crate::ConfigError;
use std::time::Duration;

/// Cache entry lifetime used when nothing else is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Upper bound on concurrent sanitization workers per listing.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Environment variable holding the cache TTL.
pub const CACHE_TTL_ENV: &str = "CACHE_TTL";

/// Configuration consumed by the document service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Lifetime of a cached sanitized document. Zero disables caching,
    /// since every entry is already expired when written.
    pub cache_ttl: Duration,
    /// Static cap on sanitization workers for a single listing.
    pub max_workers: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl ServiceConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the worker cap. Zero is raised to one so a non-empty page
    /// always has a worker.
    pub fn with_max_workers(mut self, max: usize) -> Self {
        self.max_workers = max.max(1);
        self
    }

    /// Create a config from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL`: cache entry lifetime in Go duration syntax, e.g.
    ///   `"30s"`, `"500ms"`, `"1m30s"`, `"1.5s"`, or a bare number of seconds
    ///   (default: 60s). Negative values clamp to zero.
    ///
    /// The worker cap is a static policy and is not read from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(CACHE_TTL_ENV) {
            config.cache_ttl = parse_duration(CACHE_TTL_ENV, &raw)?;
        }
        Ok(config)
    }
}

/// Parse a Go-style duration such as `"30s"`, `"1m30s"`, `"1.5s"` or `"-1s"`.
///
/// A string is an optional sign followed by one or more `<number><unit>`
/// segments, where the number may carry a fraction and the unit is one of
/// `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare number is read as
/// seconds. Negative durations clamp to zero, which disables caching.
pub fn parse_duration(field: &str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let value = raw.trim();
    let (negative, mut rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if rest.is_empty() {
        return Err(invalid("expected a number followed by a unit"));
    }

    let mut total_nanos = 0f64;
    // bare number, seconds
    if let Ok(secs) = rest.parse::<f64>() {
        total_nanos = secs * NANOS_PER_SEC;
        rest = "";
    }
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (num_str, tail) = rest.split_at(num_end);
        let num: f64 = num_str
            .parse()
            .map_err(|_| invalid("expected a number before each unit"))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);
        let multiplier = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => NANOS_PER_SEC,
            "m" => 60.0 * NANOS_PER_SEC,
            "h" => 3600.0 * NANOS_PER_SEC,
            "" => return Err(invalid("missing unit, expected ns, us, ms, s, m or h")),
            _ => return Err(invalid("unknown unit, expected ns, us, ms, s, m or h")),
        };
        total_nanos += (num * multiplier).round();
        rest = next;
    }

    if total_nanos.is_nan() || total_nanos.abs() > u64::MAX as f64 {
        return Err(invalid("number out of range"));
    }
    Ok(clamp(negative, total_nanos))
}

const NANOS_PER_SEC: f64 = 1e9;

fn clamp(negative: bool, nanos: f64) -> Duration {
    if negative || nanos <= 0.0 {
        Duration::ZERO
    } else {
        Duration::from_nanos(nanos.round().min(u64::MAX as f64) as u64)
    }
}
