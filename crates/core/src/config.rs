use std::env;

use crate::error::{ClientError, Result};

/// Environment-derived client configuration. Built once at startup and
/// passed into the transport constructors; nothing reads the environment
/// after this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub grpc_endpoint: String,
    pub rest_endpoint: String,
    pub default_limit: i64,
    pub default_offset: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grpc_endpoint: "localhost:50051".to_string(),
            rest_endpoint: "http://localhost:8080".to_string(),
            default_limit: 10,
            default_offset: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        apply_overrides(&mut cfg, load_env_overrides()?);
        Ok(cfg)
    }
}

#[derive(Debug, Default)]
struct ConfigOverrides {
    grpc_endpoint: Option<String>,
    rest_endpoint: Option<String>,
    default_limit: Option<i64>,
    default_offset: Option<i64>,
}

fn load_env_overrides() -> Result<ConfigOverrides> {
    Ok(ConfigOverrides {
        grpc_endpoint: env::var("GRPC_ENDPOINT").ok(),
        rest_endpoint: env::var("REST_ENDPOINT").ok(),
        default_limit: parse_int_var("DEFAULT_LIMIT")?,
        default_offset: parse_int_var("DEFAULT_OFFSET")?,
    })
}

fn parse_int_var(name: &str) -> Result<Option<i64>> {
    match env::var(name) {
        Ok(v) => Ok(Some(v.parse::<i64>().map_err(|e| {
            ClientError::Config(format!("bad {name} in environment: {e} (value={v})"))
        })?)),
        Err(_) => Ok(None),
    }
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides) {
    if let Some(v) = overrides.grpc_endpoint {
        cfg.grpc_endpoint = v;
    }
    if let Some(v) = overrides.rest_endpoint {
        cfg.rest_endpoint = v;
    }
    if let Some(v) = overrides.default_limit {
        cfg.default_limit = v;
    }
    if let Some(v) = overrides.default_offset {
        cfg.default_offset = v;
    }
}
