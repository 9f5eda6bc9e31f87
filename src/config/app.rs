// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::consts::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
use crate::core::entropy::{DeviceEntropy, EntropySource, OsEntropy};
use crate::core::transcode::Codeset;
use crate::enums::EntropyKind;
use crate::error::{KeygenError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_terminal")]
    pub terminal: Terminal,
    #[serde(default = "default_entropy")]
    pub entropy: Entropy,
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Terminal {
    pub device: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entropy {
    #[serde(default)]
    pub source: EntropyKind,
    #[serde(default = "default_entropy_device")]
    pub device: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Locale {
    /// Overrides the codeset taken from `LC_ALL`/`LC_CTYPE`/`LANG`
    pub codeset: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            terminal: default_terminal(),
            entropy: default_entropy(),
            locale: Locale::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| KeygenError::Config(e.to_string()))
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using built-in defaults");
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| KeygenError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Source codeset for password conversion
    pub fn codeset(&self) -> Result<Codeset> {
        let codeset = match &self.locale.codeset {
            Some(label) => Codeset::from_label(label)?,
            None => Codeset::from_env()?,
        };
        Ok(codeset)
    }

    /// The configured random source
    pub fn entropy_source(&self) -> Box<dyn EntropySource> {
        match self.entropy.source {
            EntropyKind::Os => Box::new(OsEntropy),
            EntropyKind::Device => Box::new(DeviceEntropy::new(&self.entropy.device)),
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load the config named by `AESCRYPT_KEYGEN_CONFIG` once per process.
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }
    let config_path =
        std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let conf = Config::from_file(&config_path)?;
    Ok(CONFIG.get_or_init(|| conf))
}
