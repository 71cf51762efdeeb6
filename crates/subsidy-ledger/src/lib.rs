// crates/subsidy-ledger/src/lib.rs
//
// subsidy-ledger: gas subsidy accounting for bridge operators.
//
// Operators configure per-criteria gas parameters; funders deposit value for
// an (operator, criteria) pair at a chosen gas-per-second rate; operators
// claim what has accrued, scaled by the live unit price, to a beneficiary.
//
// All monetary values are tracked in wei (1 ETH = 10^18 wei).

pub mod accrual;
pub mod env;
pub mod ledger;
pub mod pool;
pub mod record;
pub mod registry;
pub mod state;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use accrual::{accrued_amount, capped_payout, elapsed_seconds};
pub use env::{CreditTransfer, FixedUnitPrice, LedgerEnv, ManualClock, SystemClock};
pub use ledger::SubsidyLedger;
pub use pool::SubsidyPool;
pub use record::{CriteriaParams, SubsidyKey, SubsidyRecord};
pub use registry::ParameterRegistry;
pub use state::{LedgerState, ParamsEntry, RecordEntry};
pub use token::{parse_amount, Ether, MIN_SUBSIDY_WEI, WEI_PER_ETHER};
