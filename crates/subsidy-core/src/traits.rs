// crates/subsidy-core/src/traits.rs
//
// Interfaces to the collaborators the ledger consumes but does not own.

use crate::error::SubsidyError;
use crate::identity::Address;
use crate::types::{Timestamp, Wei};

/// Source of "current time in seconds".
///
/// Must be monotonically non-decreasing across calls on the same ledger.
/// Implemented by `subsidy_ledger::env::{SystemClock, ManualClock}`.
pub trait Clock: Send + Sync {
    /// Current time in whole seconds.
    fn now(&self) -> Timestamp;
}

/// Live price-per-gas-unit signal (the network's current base fee).
///
/// Read synchronously at claim time. No caching, no staleness check.
pub trait UnitPriceOracle: Send + Sync {
    /// Current price of one gas unit, in wei.
    fn unit_price(&self) -> Wei;
}

/// Primitive that moves native value out of the ledger's pool.
///
/// Implemented by `subsidy_ledger::env::CreditTransfer`.
pub trait ValueTransfer: Send + Sync {
    /// Move `amount` wei to `to`.
    ///
    /// Failure must be reported as `SubsidyError::EthTransferFailed`. An
    /// implementation that fails must not have moved any value.
    fn transfer(&self, to: &Address, amount: Wei) -> Result<(), SubsidyError>;
}
