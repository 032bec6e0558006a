//! Server configuration from environment variables

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::domain::DoseRule;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_dir: Option<PathBuf>,
    pub dose_window_minutes: Option<u32>,
}

impl Config {
    /// Read the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("MEDI_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "MEDI_PORT", 3000)?,
            log_dir: lookup("MEDI_LOG_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            dose_window_minutes: parse_opt(&lookup, "MEDI_DOSE_WINDOW_MINUTES")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn dose_rule(&self) -> Option<DoseRule> {
        self.dose_window_minutes.map(DoseRule::new)
    }
}

fn parse_opt<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match parse_opt(lookup, key)? {
        Some(value) => Ok(value),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:3000");
        assert_eq!(config.log_dir, None);
        assert_eq!(config.dose_rule(), None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("MEDI_HOST", "127.0.0.1"),
            ("MEDI_PORT", "8080"),
            ("MEDI_LOG_DIR", "/var/log/medi"),
            ("MEDI_DOSE_WINDOW_MINUTES", "30"),
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/medi")));
        assert_eq!(config.dose_rule(), Some(DoseRule::new(30)));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config(&[("MEDI_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "MEDI_PORT", .. }));
    }

    #[test]
    fn test_negative_window_is_an_error() {
        assert!(config(&[("MEDI_DOSE_WINDOW_MINUTES", "-5")]).is_err());
    }
}
