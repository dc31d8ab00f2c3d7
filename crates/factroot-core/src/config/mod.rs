//! Configuration management

use crate::error::{FactRootError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Resolution policy
    #[serde(default)]
    pub engine: EngineConfig,

    /// Catalog files backing the knowledge sources
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,

    /// Fallback prediction service
    #[serde(default)]
    pub predictor: PredictorConfig,
}

/// What to do when the fallback predictor fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictionFailurePolicy {
    /// Surface `PredictionUnavailable` to the caller
    #[default]
    Error,
    /// Answer with the "not found" result instead
    NotFound,
}

/// Resolution policy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// A hit must score strictly above this to be answered deterministically
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,

    /// Per knowledge source lookup timeout in milliseconds
    #[serde(default = "default_adapter_timeout_ms")]
    pub adapter_timeout_ms: u64,

    /// Maximum queries resolved at once by a batch
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,

    #[serde(default)]
    pub on_prediction_failure: PredictionFailurePolicy,
}

fn default_relevance_threshold() -> f64 {
    0.7
}

fn default_adapter_timeout_ms() -> u64 {
    5000
}

fn default_batch_concurrency() -> usize {
    8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
            adapter_timeout_ms: default_adapter_timeout_ms(),
            batch_concurrency: default_batch_concurrency(),
            on_prediction_failure: PredictionFailurePolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_millis(self.adapter_timeout_ms)
    }

    /// Check that every knob is usable
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(FactRootError::Config(format!(
                "relevance_threshold must be within [0, 1], got {}",
                self.relevance_threshold
            )));
        }
        if self.batch_concurrency == 0 {
            return Err(FactRootError::Config(
                "batch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.adapter_timeout_ms == 0 {
            return Err(FactRootError::Config(
                "adapter_timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("FACTROOT_RELEVANCE_THRESHOLD") {
            self.relevance_threshold = value.parse().map_err(|_| {
                FactRootError::Config(format!(
                    "FACTROOT_RELEVANCE_THRESHOLD is not a number: {}",
                    value
                ))
            })?;
        }
        if let Ok(value) = std::env::var("FACTROOT_ADAPTER_TIMEOUT_MS") {
            self.adapter_timeout_ms = value.parse().map_err(|_| {
                FactRootError::Config(format!(
                    "FACTROOT_ADAPTER_TIMEOUT_MS is not an integer: {}",
                    value
                ))
            })?;
        }
        Ok(())
    }
}

/// Catalog files for each knowledge source (YAML, JSON or CSV)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeBaseConfig {
    #[serde(default)]
    pub standards: Option<PathBuf>,

    #[serde(default)]
    pub datasheets: Option<PathBuf>,

    #[serde(default)]
    pub handbooks: Option<PathBuf>,
}

/// Prediction service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Base URL of the OpenAI-compatible service
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("FACTROOT_PREDICTOR_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            model: default_model(),
            api_key: std::env::var("FACTROOT_PREDICTOR_API_KEY").ok(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    std::env::var("FACTROOT_PREDICTOR_MODEL")
        .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string())
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load config from `FACTROOT_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        let path = std::env::var("FACTROOT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::load_from(&path)
    }

    /// Load config from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };

        if let Some(base) = path.parent() {
            config.knowledge_base.resolve_relative_to(base);
        }
        config.engine.apply_env_overrides()?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

impl KnowledgeBaseConfig {
    /// Make relative catalog paths relative to the config file's directory
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.standards, &mut self.datasheets, &mut self.handbooks]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
