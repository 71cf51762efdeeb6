use thiserror::Error;

use crate::identity::Address;
use crate::types::{CriteriaId, Wei};

/// Errors surfaced by the subsidy ledger.
///
/// Every variant is returned to the immediate caller. A failed call leaves the
/// ledger exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubsidyError {
    /// Batch configuration lists differ in length.
    #[error(
        "Array lengths do not match: {criteria} criteria, {gas_usage} gas usages, \
         {min_gas_per_second} minimum rates"
    )]
    ArrayLengthsDoNotMatch {
        criteria: usize,
        gas_usage: usize,
        min_gas_per_second: usize,
    },

    /// Funding attempted for a criteria the operator never configured.
    #[error("Gas usage not set for operator {operator} criteria {criteria}")]
    GasUsageNotSet {
        operator: Address,
        criteria: CriteriaId,
    },

    /// Funder proposed a rate under the configured floor.
    #[error("Gas per second too low: {provided} < minimum {minimum}")]
    GasPerSecondTooLow { provided: u32, minimum: u32 },

    /// Funding amount under the minimum viable deposit.
    #[error("Subsidy too low: {value} wei < minimum {minimum} wei")]
    SubsidyTooLow { value: Wei, minimum: Wei },

    /// Funding attempted while the record still holds a balance.
    #[error("Already subsidized: operator {operator} criteria {criteria} has {available} wei available")]
    AlreadySubsidized {
        operator: Address,
        criteria: CriteriaId,
        available: Wei,
    },

    /// The payout transfer primitive rejected the transfer.
    #[error("ETH transfer failed: {0}")]
    EthTransferFailed(String),

    /// Internal accounting invariant violated.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SubsidyError {
    fn from(e: serde_json::Error) -> Self {
        SubsidyError::Serialization(e.to_string())
    }
}
