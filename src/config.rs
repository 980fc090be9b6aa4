//! Configuration file handling.
//!
//! Settings live in `~/.config/filtrapx/config.toml` (or the path in
//! `FILTRAPX_CONFIG`). Every section has defaults, so a missing file or a
//! partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extract::DEFAULT_SIGNATURE_MARKER;
use crate::normalize::{FrequencySpeller, NoisePhrases, Normalizer};
use crate::output::OutputFormat;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FILTRAPX_CONFIG";

/// Errors loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Dictionary(#[from] crate::normalize::DictionaryError),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub normalize: NormalizeConfig,
    pub output: OutputConfig,
}

/// Where inputs are looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Folder searched by `--termux` for the most recent export.
    pub latest_dir: PathBuf,
    /// Extension of input files inside directories.
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            latest_dir: PathBuf::from("../storage/downloads/Telegram"),
            extension: "txt".to_string(),
        }
    }
}

/// Text normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Extra "no data" phrases, added to the built-in ones.
    pub noise_phrases: Vec<String>,
    /// Transliterate accented letters instead of dropping them.
    pub transliterate: bool,
    /// Attribution line identifying the legacy bot export.
    pub signature_marker: String,
    /// Extra word list for the spelling pass (`word [frequency]` per line).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,
    /// Run the spelling pass on bot exports.
    pub spelling: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            noise_phrases: Vec::new(),
            transliterate: false,
            signature_marker: DEFAULT_SIGNATURE_MARKER.to_string(),
            dictionary: None,
            spelling: true,
        }
    }
}

impl NormalizeConfig {
    /// Normalizer with the configured phrases plus `extra_noise`.
    pub fn normalizer(&self, extra_noise: &[String]) -> Normalizer {
        let phrases = self.noise_phrases.iter().chain(extra_noise.iter());
        Normalizer::new(NoisePhrases::with_extra(phrases)).with_transliteration(self.transliterate)
    }

    /// Speller for the spelling pass, if enabled.
    pub fn speller(&self) -> Result<Option<FrequencySpeller>, ConfigError> {
        if !self.spelling {
            return Ok(None);
        }
        Ok(Some(FrequencySpeller::with_dictionary(self.dictionary.as_deref())?))
    }
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the report is written to.
    pub dir: PathBuf,
    /// Report file name without extension.
    pub file_name: String,
    pub format: OutputFormat,
    /// Table name used by SQL output.
    pub sql_table: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            file_name: "resultados".to_string(),
            format: OutputFormat::Text,
            sql_table: "pessoas".to_string(),
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("filtrapx").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location; defaults if the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(write_err)
    }
}
