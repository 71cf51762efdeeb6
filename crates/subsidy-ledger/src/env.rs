// crates/subsidy-ledger/src/env.rs
//
// Reference implementations of the ledger's external collaborators: clocks,
// a settable unit-price signal, and a value transfer primitive that credits an
// in-process balance book.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use subsidy_core::{Address, Clock, SubsidyError, Timestamp, UnitPriceOracle, ValueTransfer, Wei};

/// Wall-clock time from the host, in whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = chrono::Utc::now().timestamp();
        Timestamp::try_from(secs.max(0)).unwrap_or(Timestamp::MAX)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU32,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicU32::new(start),
        }
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance(&self, secs: u32) {
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| Some(t.saturating_add(secs)));
    }

    /// Jump to `at`. Ignored if `at` is earlier than the current time.
    pub fn set(&self, at: Timestamp) {
        self.now.fetch_max(at, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

/// A unit-price signal whose value is set by the host.
#[derive(Debug, Default)]
pub struct FixedUnitPrice {
    price: Mutex<Wei>,
}

impl FixedUnitPrice {
    pub fn new(price: Wei) -> Self {
        Self {
            price: Mutex::new(price),
        }
    }

    pub fn set(&self, price: Wei) {
        *self.price.lock().unwrap_or_else(PoisonError::into_inner) = price;
    }
}

impl UnitPriceOracle for FixedUnitPrice {
    fn unit_price(&self) -> Wei {
        *self.price.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Default)]
struct CreditBook {
    credits: BTreeMap<Address, Wei>,
    rejected: BTreeSet<Address>,
}

/// Value transfer that credits beneficiaries in an in-process balance book.
///
/// Destinations can be marked as rejecting, to model recipients that cannot
/// accept value. A rejected transfer credits nothing.
#[derive(Debug, Default)]
pub struct CreditTransfer {
    book: Mutex<CreditBook>,
}

impl CreditTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of credited balances.
    pub fn with_credits(credits: BTreeMap<Address, Wei>) -> Self {
        Self {
            book: Mutex::new(CreditBook {
                credits,
                rejected: BTreeSet::new(),
            }),
        }
    }

    /// Make every future transfer to `to` fail.
    pub fn reject(&self, to: Address) {
        self.book().rejected.insert(to);
    }

    /// Let transfers to `to` succeed again.
    pub fn accept(&self, to: &Address) {
        self.book().rejected.remove(to);
    }

    /// Total credited to `to` so far.
    pub fn credited(&self, to: &Address) -> Wei {
        self.book().credits.get(to).copied().unwrap_or(0)
    }

    /// Snapshot of every credited balance.
    pub fn credits(&self) -> BTreeMap<Address, Wei> {
        self.book().credits.clone()
    }

    /// Sum of every credited balance.
    pub fn total_credited(&self) -> Wei {
        self.book().credits.values().fold(0, |acc, v| acc.saturating_add(*v))
    }

    fn book(&self) -> MutexGuard<'_, CreditBook> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ValueTransfer for CreditTransfer {
    fn transfer(&self, to: &Address, amount: Wei) -> Result<(), SubsidyError> {
        let mut book = self.book();
        if book.rejected.contains(to) {
            return Err(SubsidyError::EthTransferFailed(format!(
                "destination {} does not accept value",
                to
            )));
        }
        let balance = book.credits.entry(*to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or_else(|| {
            SubsidyError::EthTransferFailed(format!("balance of {} would overflow", to))
        })?;
        Ok(())
    }
}

/// The collaborators a ledger reads from and pays out through.
#[derive(Clone)]
pub struct LedgerEnv {
    pub clock: Arc<dyn Clock>,
    pub oracle: Arc<dyn UnitPriceOracle>,
    pub transfer: Arc<dyn ValueTransfer>,
}

impl LedgerEnv {
    pub fn new(
        clock: Arc<dyn Clock>,
        oracle: Arc<dyn UnitPriceOracle>,
        transfer: Arc<dyn ValueTransfer>,
    ) -> Self {
        Self {
            clock,
            oracle,
            transfer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(1_000);
        clock.advance(3_600);
        assert_eq!(clock.now(), 4_600);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new(1_000);
        clock.set(500);
        assert_eq!(clock.now(), 1_000);
        clock.set(2_000);
        assert_eq!(clock.now(), 2_000);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }

    #[test]
    fn test_fixed_price_set() {
        let price = FixedUnitPrice::new(1);
        assert_eq!(price.unit_price(), 1);
        price.set(25_000_000_000);
        assert_eq!(price.unit_price(), 25_000_000_000);
    }

    #[test]
    fn test_credit_transfer_accumulates() {
        let transfer = CreditTransfer::new();
        let to = Address::repeat_byte(7);
        transfer.transfer(&to, 10).unwrap();
        transfer.transfer(&to, 5).unwrap();
        assert_eq!(transfer.credited(&to), 15);
        assert_eq!(transfer.total_credited(), 15);
    }

    #[test]
    fn test_rejected_destination_fails_without_credit() {
        let transfer = CreditTransfer::new();
        let to = Address::repeat_byte(7);
        transfer.reject(to);

        let result = transfer.transfer(&to, 10);
        assert!(matches!(result, Err(SubsidyError::EthTransferFailed(_))));
        assert_eq!(transfer.credited(&to), 0);

        transfer.accept(&to);
        transfer.transfer(&to, 10).unwrap();
        assert_eq!(transfer.credited(&to), 10);
    }

    #[test]
    fn test_overflowing_credit_fails_without_change() {
        let to = Address::repeat_byte(7);
        let transfer = CreditTransfer::with_credits(BTreeMap::from([(to, Wei::MAX)]));
        assert!(transfer.transfer(&to, 1).is_err());
        assert_eq!(transfer.credited(&to), Wei::MAX);
    }
}
