// crates/subsidy-ledger/src/record.rs
//
// Keys and per-key records shared by the parameter registry and the ledger.

use serde::{Deserialize, Serialize};
use subsidy_core::{Address, CriteriaId, Timestamp, Wei};

/// Composite key of the registry and the ledger: (operator, criteria).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubsidyKey {
    /// The operator that owns the parameters and claims the subsidy.
    pub operator: Address,
    /// The operator-defined criteria id.
    pub criteria: CriteriaId,
}

impl SubsidyKey {
    pub fn new(operator: Address, criteria: CriteriaId) -> Self {
        Self { operator, criteria }
    }
}

/// Per-criteria configuration set by an operator.
///
/// A `gas_usage` of 0 means the criteria has not been configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaParams {
    /// Estimated execution cost units for this criteria.
    pub gas_usage: u32,
    /// Floor on the rate a funder may choose.
    pub min_gas_per_second: u32,
}

impl CriteriaParams {
    pub fn is_configured(&self) -> bool {
        self.gas_usage != 0
    }
}

/// The subsidy balance and accrual state for one (operator, criteria) key.
///
/// `gas_usage` and `min_gas_per_second` are snapshots taken at fund time.
/// Claims never read them; they record what the funder agreed to, so
/// reconfiguring the registry later does not touch an existing record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyRecord {
    /// Remaining claimable value in wei.
    pub available: Wei,
    /// Snapshot of the registry's gas usage at fund time.
    pub gas_usage: u32,
    /// Snapshot of the registry's minimum rate at fund time.
    pub min_gas_per_second: u32,
    /// Funder-chosen accrual rate in gas units per second.
    pub gas_per_second: u32,
    /// Time of the last fund or claim.
    pub last_updated: Timestamp,
}

impl SubsidyRecord {
    /// A record is active while it still holds a balance. Only inactive
    /// records can be funded.
    pub fn is_active(&self) -> bool {
        self.available > 0
    }

    /// Whether the key has ever been funded. Funding requires configured
    /// gas usage and snapshots it, so a record that only ever saw claims
    /// keeps `gas_usage == 0`.
    pub fn is_funded(&self) -> bool {
        self.gas_usage != 0
    }
}
