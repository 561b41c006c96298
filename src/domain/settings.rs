//! Runtime settings resolved from the configuration port.

use crate::domain::error::RealfinError;
use crate::domain::financing::DEFAULT_FIXED_INCREASE;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_TEXT_PATH: &str = "financiamentos.txt";
pub const DEFAULT_SNAPSHOT_PATH: &str = "financiamentos.snapshot";
pub const DEFAULT_LOG_FILTER: &str = "realfin=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub text_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub house_fixed_increase: f64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_path: PathBuf::from(DEFAULT_TEXT_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            house_fixed_increase: DEFAULT_FIXED_INCREASE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, RealfinError> {
    let text_path = non_empty_path(config, "storage", "text_path", DEFAULT_TEXT_PATH)?;
    let snapshot_path =
        non_empty_path(config, "storage", "snapshot_path", DEFAULT_SNAPSHOT_PATH)?;

    let house_fixed_increase = fixed_increase(config)?;

    if text_path == snapshot_path {
        return Err(RealfinError::ConfigInvalid {
            section: "storage".to_string(),
            key: "snapshot_path".to_string(),
            reason: "snapshot_path must differ from text_path".to_string(),
        });
    }

    let log_filter = config
        .get_string("logging", "filter")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    Ok(Settings {
        text_path,
        snapshot_path,
        house_fixed_increase,
        log_filter,
    })
}

fn fixed_increase(config: &dyn ConfigPort) -> Result<f64, RealfinError> {
    let invalid = |reason: String| RealfinError::ConfigInvalid {
        section: "house".to_string(),
        key: "fixed_increase".to_string(),
        reason,
    };

    let Some(raw) = config.get_string("house", "fixed_increase") else {
        return Ok(DEFAULT_FIXED_INCREASE);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("fixed_increase must be non-negative".to_string()));
    }
    Ok(value)
}

fn non_empty_path(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: &str,
) -> Result<PathBuf, RealfinError> {
    match config.get_string(section, key) {
        None => Ok(PathBuf::from(default)),
        Some(s) if s.trim().is_empty() => Err(RealfinError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{} must not be empty", key),
        }),
        Some(s) => Ok(PathBuf::from(s.trim())),
    }
}
