use crate::errors::{GradingError, GradingResult};
use crate::grading::TestSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Per-assignment grader configuration (`oktest.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraderConfig {
    pub version: u32,
    pub assignment_name: String,
    /// Key used to lock and verify answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_key: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl GraderConfig {
    pub fn settings(&self) -> TestSettings {
        TestSettings {
            verbose: self.verbose,
            interactive: self.interactive,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn load_config(path: &Path) -> GradingResult<GraderConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| GradingError::Config {
        message: format!("failed to read config {}: {}", path.display(), e),
    })?;
    parse_config(&raw)
}

pub fn parse_config(raw: &str) -> GradingResult<GraderConfig> {
    let cfg: GraderConfig = serde_yaml::from_str(raw).map_err(|e| GradingError::Config {
        message: format!("failed to parse YAML: {}", e),
    })?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(GradingError::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                cfg.version, SUPPORTED_CONFIG_VERSION
            ),
        });
    }
    if cfg.assignment_name.trim().is_empty() {
        return Err(GradingError::Config {
            message: "config has no assignment_name".into(),
        });
    }
    Ok(cfg)
}
