// crates/subsidy-ledger/src/state.rs
//
// Serializable form of a ledger's state, for hosts that persist the ledger
// between calls. Composite keys cannot be JSON object keys, so entries are
// stored as lists.

use serde::{Deserialize, Serialize};
use subsidy_core::{Address, CriteriaId, SubsidyError, Wei};

use crate::record::{CriteriaParams, SubsidyRecord};

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsEntry {
    pub operator: Address,
    pub criteria: CriteriaId,
    pub params: CriteriaParams,
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub operator: Address,
    pub criteria: CriteriaId,
    pub record: SubsidyRecord,
}

/// Everything a ledger owns, minus its collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub params: Vec<ParamsEntry>,
    #[serde(default)]
    pub records: Vec<RecordEntry>,
    #[serde(default)]
    pub pool_balance: Wei,
}

impl LedgerState {
    pub fn to_json(&self) -> Result<String, SubsidyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SubsidyError> {
        Ok(serde_json::from_str(json)?)
    }
}
