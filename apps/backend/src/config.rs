//! Server configuration from environment variables.

use std::path::PathBuf;

use quiz_core::{EngineConfig, GroupPolicy, WeightBounds};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("QUIZ_WEIGHT_MIN and QUIZ_WEIGHT_MAX must be set together, with min <= max")]
    Bounds,
}

/// Runtime configuration for the quiz server.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding deck files.
    pub decks_dir: PathBuf,
    /// Directory holding per-user weight files.
    pub weights_dir: PathBuf,
    pub engine: EngineConfig,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Recognized variables:
    /// - HOST, PORT: listen address (default 0.0.0.0:3000)
    /// - DECKS_DIR: deck files (default `data`)
    /// - WEIGHTS_DIR: weight files (default `user`)
    /// - QUIZ_OPTIONS: options per quiz (default 4)
    /// - QUIZ_GROUP_POLICY: `clamp` or `strict`
    /// - QUIZ_WEIGHT_MIN, QUIZ_WEIGHT_MAX: optional weight bounds
    /// - QUIZ_SEED: optional RNG seed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT")?.unwrap_or(3000);
        let decks_dir = lookup("DECKS_DIR").unwrap_or_else(|| "data".to_string()).into();
        let weights_dir = lookup("WEIGHTS_DIR").unwrap_or_else(|| "user".to_string()).into();

        let mut engine = EngineConfig::default();
        if let Some(options) = parse_var::<usize, _>(&lookup, "QUIZ_OPTIONS")? {
            if options == 0 {
                return Err(ConfigError::Invalid {
                    name: "QUIZ_OPTIONS",
                    value: options.to_string(),
                });
            }
            engine.options_per_quiz = options;
        }
        if let Some(policy) = lookup("QUIZ_GROUP_POLICY") {
            engine.group_policy =
                GroupPolicy::from_str(&policy).ok_or(ConfigError::Invalid {
                    name: "QUIZ_GROUP_POLICY",
                    value: policy,
                })?;
        }
        engine.weight_bounds = match (
            parse_var(&lookup, "QUIZ_WEIGHT_MIN")?,
            parse_var(&lookup, "QUIZ_WEIGHT_MAX")?,
        ) {
            (None, None) => None,
            (Some(min), Some(max)) => Some(WeightBounds::new(min, max).ok_or(ConfigError::Bounds)?),
            _ => return Err(ConfigError::Bounds),
        };

        Ok(Self {
            host,
            port,
            decks_dir,
            weights_dir,
            engine,
            seed: parse_var(&lookup, "QUIZ_SEED")?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
