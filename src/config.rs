use std::path::Path;

use serde::Deserialize;

use crate::storage::SignalLabels;
use crate::{AnalyzerError, AnalyzerResult};

pub const ENV_SERVICE_URL: &str = "ALARM_ANALYZER_SERVICE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ALARM_ANALYZER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub process_path: String,
    pub health_path: String,
    /// 0 disables the timeout
    pub timeout_secs: u64,
    pub plc_field: String,
    pub base_field: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: "http://localhost:5000".to_string(),
            process_path: "/api/process".to_string(),
            health_path: "/api/health".to_string(),
            timeout_secs: 120,
            plc_field: "l5k_file".to_string(),
            base_field: "csv_file".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled_label: String,
    pub disabled_label: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let labels = SignalLabels::default();
        ExportConfig {
            enabled_label: labels.enabled,
            disabled_label: labels.disabled,
        }
    }
}

impl ExportConfig {
    pub fn signal_labels(&self) -> SignalLabels {
        SignalLabels {
            enabled: self.enabled_label.clone(),
            disabled: self.disabled_label.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub service: ServiceConfig,
    pub export: ExportConfig,
}

impl AnalyzerConfig {
    pub fn from_toml_str(s: &str) -> AnalyzerResult<Self> {
        toml::from_str(s).map_err(|e| AnalyzerError::Message(format!("invalid config: {e}")))
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> AnalyzerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVICE_URL).filter(|v| !v.trim().is_empty()) {
            self.service.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.service.timeout_secs = secs.trim().parse().map_err(|e| {
                AnalyzerError::Message(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds: {e}"))
            })?;
        }
        Ok(self)
    }
}

/// Load the config file (defaults when `path` is `None`) and apply the
/// process environment on top.
pub fn load_config(path: Option<&Path>) -> AnalyzerResult<AnalyzerConfig> {
    let config = match path {
        Some(p) => {
            let s = std::fs::read_to_string(p)
                .map_err(|e| AnalyzerError::Message(format!("failed to read {}: {e}", p.display())))?;
            AnalyzerConfig::from_toml_str(&s)?
        }
        None => AnalyzerConfig::default(),
    };
    config.with_env_overrides(|key| std::env::var(key).ok())
}
