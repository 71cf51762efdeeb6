// crates/subsidy-cli/src/store.rs
//
// JSON state file holding the ledger state and the beneficiary credit book
// between CLI invocations.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use subsidy_core::{Address, SubsidyError, Wei};
use subsidy_ledger::LedgerState;

/// Errors reading or writing the state file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("State file IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: SubsidyError,
    },
}

/// Everything the CLI persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub ledger: LedgerState,
    /// Payouts credited to each beneficiary.
    #[serde(default)]
    pub credits: BTreeMap<Address, Wei>,
}

impl StateFile {
    /// Load the state file, or an empty state if it does not exist yet.
    pub async fn load(path: &str) -> Result<Self, StoreError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| StoreError::Malformed {
                path: path.to_string(),
                source: e.into(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No state file at {}, starting empty", path);
                Ok(Self::default())
            }
            Err(source) => Err(StoreError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }

    /// Write the state file, creating parent directories as needed.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write never leaves a truncated state file.
    pub async fn save(&self, path: &str) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_string(),
            source,
        };

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| StoreError::Malformed {
            path: path.to_string(),
            source: e.into(),
        })?;
        let tmp = format!("{}.tmp", path);
        tokio::fs::write(&tmp, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
        Ok(())
    }
}
