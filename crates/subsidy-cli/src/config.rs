// crates/subsidy-cli/src/config.rs
//
// Runtime configuration for the subsidy CLI.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

use thiserror::Error;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No file at the path. Callers fall back to defaults.
    #[error("Config file {path} not found")]
    NotFound { path: String },

    #[error("Could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Path of the JSON file holding the ledger state.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Unit price (wei per gas unit) used when no `--unit-price` is given.
    #[serde(default = "default_unit_price")]
    pub unit_price: u64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_state_file() -> String {
    "~/.subsidy/ledger.json".to_string()
}

fn default_unit_price() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            unit_price: default_unit_price(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// A missing file is `ConfigError::NotFound`; a file that exists but
    /// cannot be read or parsed is a hard error.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let expanded = expand_tilde(path);
        let contents = match fs::read_to_string(&expanded) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound { path: expanded })
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: expanded,
                    source,
                })
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Malformed {
            path: expanded,
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
