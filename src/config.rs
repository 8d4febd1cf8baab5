use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;

/// Tunables of the analysis engine. Every field is optional in the file;
/// the defaults are the constants the passes are specified with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub base_traffic: f64,
    pub forecast_months: u32,
    pub noise_ratio: f64,
    pub max_prioritized_issues: usize,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_traffic: 1000.0,
            forecast_months: 12,
            noise_ratio: 0.1,
            max_prioritized_issues: 20,
            seed: None,
        }
    }
}

pub fn load_config(path: &str) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    let config: EngineConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(config)
}
