// crates/subsidy-cli/src/commands/mod.rs
//
// Command module declarations and the session every command runs against.

pub mod claim;
pub mod configure;
pub mod fund;
pub mod show;

use std::sync::Arc;

use subsidy_core::{SubsidyError, Wei};
use subsidy_ledger::{CreditTransfer, FixedUnitPrice, LedgerEnv, SubsidyLedger, SystemClock};

use crate::output::OutputFormat;
use crate::store::StateFile;

/// A ledger opened from the state file, wired to the wall clock, a
/// configured unit price, and the persisted beneficiary credit book.
pub struct Session {
    pub ledger: SubsidyLedger,
    pub transfer: Arc<CreditTransfer>,
    pub price: Arc<FixedUnitPrice>,
    pub format: OutputFormat,
}

impl Session {
    pub fn open(state: StateFile, unit_price: Wei, format: OutputFormat) -> Result<Self, SubsidyError> {
        let transfer = Arc::new(CreditTransfer::with_credits(state.credits));
        let price = Arc::new(FixedUnitPrice::new(unit_price));
        let env = LedgerEnv::new(Arc::new(SystemClock), price.clone(), transfer.clone());
        let ledger = SubsidyLedger::from_state(state.ledger, env)?;
        Ok(Self {
            ledger,
            transfer,
            price,
            format,
        })
    }

    /// Current state, ready to be written back to disk.
    pub fn snapshot(&self) -> StateFile {
        StateFile {
            ledger: self.ledger.state(),
            credits: self.transfer.credits(),
        }
    }
}
