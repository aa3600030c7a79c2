//! Runtime settings read from the environment (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Mount point for resource routes, normalized to `/segment` or empty for root.
    pub api_prefix: String,
    pub jwt_secret: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. `DATABASE_URL` and `JWT_SECRET` are required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: v,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "RUN_MIGRATIONS",
                value: v,
            })?,
            None => true,
        };

        let api_prefix = normalize_prefix(
            &lookup("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.into()),
        );

        Ok(Settings {
            database_url,
            bind_addr,
            api_prefix,
            jwt_secret,
            db_max_connections,
            run_migrations,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// "api/" -> "/api", "/" -> "".
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_absent() {
        let s = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/stockroom"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();
        assert_eq!(s.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(s.api_prefix, "/api");
        assert_eq!(s.db_max_connections, 5);
        assert!(s.run_migrations);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = Settings::from_lookup(lookup(&[("DATABASE_URL", "postgres://x/y")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn rejects_bad_numbers_and_flags() {
        let base = [
            ("DATABASE_URL", "postgres://x/y"),
            ("JWT_SECRET", "s"),
        ];
        let mut with_pool = base.to_vec();
        with_pool.push(("DB_MAX_CONNECTIONS", "0"));
        assert!(Settings::from_lookup(lookup(&with_pool)).is_err());

        let mut with_flag = base.to_vec();
        with_flag.push(("RUN_MIGRATIONS", "maybe"));
        assert!(Settings::from_lookup(lookup(&with_flag)).is_err());
    }

    #[test]
    fn prefix_normalization() {
        assert_eq!(normalize_prefix("api/"), "/api");
        assert_eq!(normalize_prefix("/v1/api"), "/v1/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }
}
