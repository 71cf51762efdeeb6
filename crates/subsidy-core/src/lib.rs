// crates/subsidy-core/src/lib.rs
//
// subsidy-core: Core types, error taxonomy, and collaborator traits for the
// gas subsidy ledger.
//
// This is the leaf crate that the ledger and the CLI depend on. It defines the
// identity and unit types shared by every crate, the error variants surfaced to
// callers, and the trait interfaces for the clock, the unit-price signal, and
// the value transfer primitive.

pub mod error;
pub mod identity;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use subsidy_core::Address;`

pub use error::SubsidyError;
pub use identity::Address;
pub use traits::{Clock, UnitPriceOracle, ValueTransfer};
pub use types::{CriteriaId, Timestamp, Wei};
