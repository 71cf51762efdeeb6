// crates/subsidy-core/src/types.rs

/// Amount of native currency in its smallest unit (18-decimal fixed point).
pub type Wei = u128;

/// Wall-clock time in whole seconds, as recorded in subsidy records.
pub type Timestamp = u32;

/// Operator-defined classification id for a type of subsidized work.
pub type CriteriaId = u64;
