//! Runtime configuration.
//!
//! # Responsibility
//! - Layer built-in defaults, an optional TOML file and `VOCAB_*` environment
//!   variables into one validated `AppConfig`.
//!
//! # Invariants
//! - Later layers override earlier ones: defaults < file < environment.
//! - Nested keys use `__` in environment variables, e.g.
//!   `VOCAB_DICTIONARY__API_KEY`.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "VOCAB_";
const DEFAULT_DATABASE_PATH: &str = "vocab.db";
const DEFAULT_DICTIONARY_URL: &str = "https://od-api.oxforddictionaries.com/api/v2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_level: String,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    pub dictionary: DictionaryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
            dictionary: DictionaryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub base_url: String,
    pub language: String,
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DICTIONARY_URL.to_string(),
            language: "en-gb".to_string(),
            app_id: None,
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    FileNotFound(PathBuf),
    Parse(figment::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                write!(f, "configuration file not found: {}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse configuration: {err}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::FileNotFound(_) | Self::Invalid(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Parse(value)
    }
}

/// Builder over a `Figment` that merges configuration layers in order.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Starts from built-in defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::from(Serialized::defaults(AppConfig::default())),
        }
    }

    /// Merges a TOML file; a missing file is an error.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Ok(self.merge(Toml::file(path)))
    }

    /// Merges `VOCAB_*` environment variables.
    pub fn with_env(self) -> Self {
        self.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn merge(self, provider: impl figment::Provider) -> Self {
        Self {
            figment: self.figment.merge(provider),
        }
    }

    /// Extracts and validates the merged configuration.
    pub fn extract(&self) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = self.figment.extract()?;
        validate(&config)?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads defaults, the optional `file`, then the environment.
pub fn load_config(file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let loader = match file {
        Some(path) => ConfigLoader::new().with_file(path)?,
        None => ConfigLoader::new(),
    };
    loader.with_env().extract()
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.database_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "database_path cannot be empty".to_string(),
        ));
    }
    if config.dictionary.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "dictionary.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if let Some(log_dir) = config.log_dir.as_ref() {
        if !log_dir.is_absolute() {
            return Err(ConfigError::Invalid(format!(
                "log_dir must be an absolute path, got `{}`",
                log_dir.display()
            )));
        }
    }
    Ok(())
}
