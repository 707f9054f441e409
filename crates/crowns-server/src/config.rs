use crowns_bot::{EngineParams, StrategyKind};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "config/crowns.yaml";
const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_WORKERS: usize = 4;
const NAME_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root service configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            strategies: default_strategies(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerSettings {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ServerSettings =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Loads `explicit` when given. Otherwise the default path is used if it
    /// exists and built-in defaults if it does not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    Self::from_path(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.engine.validate()?;
        self.logging.normalize()?;
        validate_strategies(&self.strategies)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.bind.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "server.bind".to_string(),
                message: "bind address must not be empty".to_string(),
            });
        }

        if self.workers == 0 {
            return Err(ValidationError::InvalidField {
                field: "server.workers".to_string(),
                message: "at least one worker is required".to_string(),
            });
        }

        Ok(())
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

/// Meld engine knobs. Unset values fall back to the process environment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_max_allocation_steps")]
    pub max_allocation_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_allocation_steps: default_max_allocation_steps(),
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_allocation_steps == 0 {
            return Err(ValidationError::InvalidField {
                field: "engine.max_allocation_steps".to_string(),
                message: "step bound must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn params(&self) -> EngineParams {
        EngineParams::default().with_max_allocation_steps(self.max_allocation_steps)
    }
}

fn default_max_allocation_steps() -> usize {
    EngineParams::from_env().max_allocation_steps()
}

/// One advisor exposed at `/bots/<name>`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StrategyConfig {
    pub name: String,
    #[serde(deserialize_with = "deserialize_kind")]
    pub kind: StrategyKind,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<StrategyKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn default_strategies() -> Vec<StrategyConfig> {
    vec![
        StrategyConfig {
            name: "melder".to_string(),
            kind: StrategyKind::Meld,
            seed: None,
        },
        StrategyConfig {
            name: "random".to_string(),
            kind: StrategyKind::Random,
            seed: None,
        },
    ]
}

fn validate_strategies(strategies: &[StrategyConfig]) -> Result<(), ValidationError> {
    if strategies.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "strategies".to_string(),
            message: "at least one strategy must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for strategy in strategies {
        if strategy.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "strategies.name".to_string(),
                message: "strategy name must not be empty".to_string(),
            });
        }

        if !strategy.name.chars().all(|c| NAME_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("strategies[{}].name", strategy.name),
                message: "strategy name may only contain alphanumeric characters, '.', '_' or '-'"
                    .to_string(),
            });
        }

        if !seen.insert(strategy.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "strategies".to_string(),
                message: format!("strategy name '{}' defined more than once", strategy.name),
            });
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Log to this file instead of stdout.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }

        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }

        if self
            .file
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            self.file = None;
        }

        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
