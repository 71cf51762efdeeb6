// crates/subsidy-ledger/src/pool.rs
//
// Pooled native-currency balance held by the ledger.
//
// The pool receives every funded deposit and pays out every settled claim.
// It backs all subsidy records at once: the sum of their available balances
// must never exceed the pool balance.

use serde::{Deserialize, Serialize};
use subsidy_core::{SubsidyError, Wei};

/// The ledger's pooled balance, in wei.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyPool {
    balance: Wei,
}

impl SubsidyPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { balance: 0 }
    }

    /// Create a pool holding `balance` wei.
    pub fn with_balance(balance: Wei) -> Self {
        Self { balance }
    }

    /// Add a deposit to the pool.
    ///
    /// # Errors
    /// Returns `SubsidyError::InvalidState` if the balance would overflow.
    /// The pool is unchanged on error.
    pub fn deposit(&mut self, amount: Wei) -> Result<(), SubsidyError> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            SubsidyError::InvalidState(format!(
                "Pool balance overflow: {} wei + {} wei",
                self.balance, amount
            ))
        })?;
        Ok(())
    }

    /// Take a payout out of the pool.
    ///
    /// # Errors
    /// Returns `SubsidyError::InvalidState` if the pool holds less than
    /// `amount`. The pool is unchanged on error.
    pub fn withdraw(&mut self, amount: Wei) -> Result<(), SubsidyError> {
        if amount > self.balance {
            return Err(SubsidyError::InvalidState(format!(
                "Insufficient pool balance: requested {} wei but only {} wei held",
                amount, self.balance
            )));
        }
        self.balance -= amount;
        Ok(())
    }

    /// Current pool balance in wei.
    pub fn balance(&self) -> Wei {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::WEI_PER_ETHER;

    #[test]
    fn test_new_pool_is_empty() {
        assert_eq!(SubsidyPool::new().balance(), 0);
    }

    #[test]
    fn test_deposits_accumulate() {
        let mut pool = SubsidyPool::new();
        pool.deposit(WEI_PER_ETHER).unwrap();
        pool.deposit(WEI_PER_ETHER / 2).unwrap();
        assert_eq!(pool.balance(), WEI_PER_ETHER + WEI_PER_ETHER / 2);
    }

    #[test]
    fn test_deposit_overflow_leaves_pool_unchanged() {
        let mut pool = SubsidyPool::with_balance(Wei::MAX - 1);
        assert!(pool.deposit(2).is_err());
        assert_eq!(pool.balance(), Wei::MAX - 1);
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let mut pool = SubsidyPool::with_balance(WEI_PER_ETHER);
        pool.withdraw(WEI_PER_ETHER).unwrap();
        assert_eq!(pool.balance(), 0);
    }

    #[test]
    fn test_withdraw_insufficient_balance() {
        let mut pool = SubsidyPool::with_balance(10);
        let result = pool.withdraw(11);
        assert!(matches!(result, Err(SubsidyError::InvalidState(_))));
        assert_eq!(pool.balance(), 10);
    }

    #[test]
    fn test_withdraw_zero_is_noop() {
        let mut pool = SubsidyPool::with_balance(10);
        pool.withdraw(0).unwrap();
        assert_eq!(pool.balance(), 10);
    }
}
