use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampling: SamplingConfig,
    pub ranking: RankingConfig,
    pub detector: DetectorConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Per-probe deadline; a probe past it is treated as failed.
    pub probe_timeout_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            probe_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub limit: usize,
    pub metric: String,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            limit: 5,
            metric: "cpu".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// "random" (reference stand-in) or "load-threshold".
    pub kind: String,
    pub attack_probability: f64,
    pub load_factor: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            kind: "random".to_string(),
            attack_probability: 0.1,
            load_factor: 4.0,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hostpulse").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
