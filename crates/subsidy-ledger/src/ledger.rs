// crates/subsidy-ledger/src/ledger.rs
//
// The subsidy ledger: parameter registry plus per-(operator, criteria)
// subsidy records backed by one pooled balance.
//
// Record lifecycle:
//   Uninitialized (no record, or available == 0) --fund--> Active
//   Active --claim--> Active (partial) or Uninitialized (drained)
//   Active --fund--> rejected with AlreadySubsidized
//
// Every mutating call takes `&mut self` and either commits in full or leaves
// the ledger untouched. Claims stage the new record and pool balance, pay out
// through the transfer primitive, and only then commit.

use std::collections::BTreeMap;

use subsidy_core::{Address, CriteriaId, SubsidyError, Wei};

use crate::accrual::{accrued_amount, capped_payout, elapsed_seconds};
use crate::env::LedgerEnv;
use crate::pool::SubsidyPool;
use crate::record::{CriteriaParams, SubsidyKey, SubsidyRecord};
use crate::registry::ParameterRegistry;
use crate::state::{LedgerState, ParamsEntry, RecordEntry};
use crate::token::{Ether, MIN_SUBSIDY_WEI};

/// Gas subsidy ledger for bridge operators.
pub struct SubsidyLedger {
    registry: ParameterRegistry,
    records: BTreeMap<SubsidyKey, SubsidyRecord>,
    pool: SubsidyPool,
    env: LedgerEnv,
}

impl SubsidyLedger {
    /// Create an empty ledger.
    pub fn new(env: LedgerEnv) -> Self {
        Self {
            registry: ParameterRegistry::new(),
            records: BTreeMap::new(),
            pool: SubsidyPool::new(),
            env,
        }
    }

    /// Rebuild a ledger from persisted state.
    ///
    /// # Errors
    /// Returns `SubsidyError::InvalidState` if the records claim more than the
    /// pool holds.
    pub fn from_state(state: LedgerState, env: LedgerEnv) -> Result<Self, SubsidyError> {
        let mut ledger = Self::new(env);
        for entry in state.params {
            ledger
                .registry
                .insert(SubsidyKey::new(entry.operator, entry.criteria), entry.params);
        }
        for entry in state.records {
            ledger
                .records
                .insert(SubsidyKey::new(entry.operator, entry.criteria), entry.record);
        }
        ledger.pool = SubsidyPool::with_balance(state.pool_balance);
        ledger.check_solvency()?;
        Ok(ledger)
    }

    /// Export the ledger's state for persistence.
    pub fn state(&self) -> LedgerState {
        LedgerState {
            params: self
                .registry
                .entries()
                .map(|(key, params)| ParamsEntry {
                    operator: key.operator,
                    criteria: key.criteria,
                    params: *params,
                })
                .collect(),
            records: self
                .records
                .iter()
                .map(|(key, record)| RecordEntry {
                    operator: key.operator,
                    criteria: key.criteria,
                    record: *record,
                })
                .collect(),
            pool_balance: self.pool.balance(),
        }
    }

    /// Batch-configure criteria parameters in the caller's own partition.
    ///
    /// # Errors
    /// Returns `SubsidyError::ArrayLengthsDoNotMatch` if the lists differ in
    /// length; nothing is written.
    pub fn configure(
        &mut self,
        caller: &Address,
        criteria: &[CriteriaId],
        gas_usage: &[u32],
        min_gas_per_second: &[u32],
    ) -> Result<(), SubsidyError> {
        self.registry
            .configure(caller, criteria, gas_usage, min_gas_per_second)?;
        tracing::info!(
            "Operator {} configured {} criteria",
            caller,
            criteria.len()
        );
        Ok(())
    }

    /// Fund the subsidy for `(operator, criteria)` with `value` wei attached
    /// by `funder`, accruing at `gas_per_second`.
    ///
    /// The registry parameters are copied into the record, so later
    /// reconfiguration does not affect it.
    ///
    /// # Errors
    /// - `AlreadySubsidized` if the record still holds a balance.
    /// - `GasUsageNotSet` if the operator has not configured the criteria.
    /// - `GasPerSecondTooLow` if `gas_per_second` is under the configured floor.
    /// - `SubsidyTooLow` if `value` is under `MIN_SUBSIDY_WEI`.
    ///
    /// On error nothing is written and the deposit is not taken.
    pub fn fund(
        &mut self,
        funder: &Address,
        value: Wei,
        operator: &Address,
        criteria: CriteriaId,
        gas_per_second: u32,
    ) -> Result<(), SubsidyError> {
        let key = SubsidyKey::new(*operator, criteria);

        let existing = self.read_record(operator, criteria);
        if existing.is_active() {
            return Err(SubsidyError::AlreadySubsidized {
                operator: *operator,
                criteria,
                available: existing.available,
            });
        }

        let params = self.registry.get(operator, criteria);
        if !params.is_configured() {
            return Err(SubsidyError::GasUsageNotSet {
                operator: *operator,
                criteria,
            });
        }
        if gas_per_second < params.min_gas_per_second {
            return Err(SubsidyError::GasPerSecondTooLow {
                provided: gas_per_second,
                minimum: params.min_gas_per_second,
            });
        }
        if value < MIN_SUBSIDY_WEI {
            return Err(SubsidyError::SubsidyTooLow {
                value,
                minimum: MIN_SUBSIDY_WEI,
            });
        }

        self.pool.deposit(value)?;
        let now = self.env.clock.now();
        self.records.insert(
            key,
            SubsidyRecord {
                available: value,
                gas_usage: params.gas_usage,
                min_gas_per_second: params.min_gas_per_second,
                gas_per_second,
                last_updated: now,
            },
        );

        tracing::info!(
            "Funder {} subsidized operator {} criteria {} with {} at {} gas/s",
            funder,
            operator,
            criteria,
            Ether::from_wei(value),
            gas_per_second
        );
        Ok(())
    }

    /// Claim the subsidy accrued for `(caller, criteria)` since the last
    /// accrual point and pay it to `beneficiary`.
    ///
    /// Pays `min(elapsed * gas_per_second * unit_price, available)` and moves
    /// the accrual point to now, even when the payout is zero. Returns the
    /// amount paid.
    ///
    /// # Errors
    /// Returns `SubsidyError::EthTransferFailed` if the transfer primitive
    /// rejects the payout. The record and pool are left exactly as they were.
    pub fn claim_subsidy(
        &mut self,
        caller: &Address,
        criteria: CriteriaId,
        beneficiary: &Address,
    ) -> Result<Wei, SubsidyError> {
        let key = SubsidyKey::new(*caller, criteria);
        let record = self.read_record(caller, criteria);

        let now = self.env.clock.now();
        let unit_price = self.env.oracle.unit_price();
        let elapsed = elapsed_seconds(record.last_updated, now);
        let accrued = accrued_amount(elapsed, record.gas_per_second, unit_price);
        let payout = capped_payout(accrued, record.available);

        tracing::debug!(
            "Accrual for operator {} criteria {}: {}s x {} gas/s x {} wei = {} wei, payout {} wei",
            caller,
            criteria,
            elapsed,
            record.gas_per_second,
            unit_price,
            accrued,
            payout
        );

        let staged = SubsidyRecord {
            available: record.available - payout,
            last_updated: now,
            ..record
        };
        let mut staged_pool = self.pool.clone();
        staged_pool.withdraw(payout)?;

        if let Err(e) = self.env.transfer.transfer(beneficiary, payout) {
            tracing::warn!(
                "Payout of {} wei to {} failed for operator {} criteria {}: {}",
                payout,
                beneficiary,
                caller,
                criteria,
                e
            );
            return Err(match e {
                SubsidyError::EthTransferFailed(_) => e,
                other => SubsidyError::EthTransferFailed(other.to_string()),
            });
        }

        self.pool = staged_pool;
        self.records.insert(key, staged);

        tracing::info!(
            "Operator {} claimed {} for criteria {} to {} ({} remaining)",
            caller,
            Ether::from_wei(payout),
            criteria,
            beneficiary,
            Ether::from_wei(staged.available)
        );
        Ok(payout)
    }

    /// The record for `(operator, criteria)`; zeroed if none exists.
    pub fn read_record(&self, operator: &Address, criteria: CriteriaId) -> SubsidyRecord {
        self.records
            .get(&SubsidyKey::new(*operator, criteria))
            .copied()
            .unwrap_or_default()
    }

    /// The registry parameters for `(operator, criteria)`; zeroed if never
    /// configured.
    pub fn criteria_params(&self, operator: &Address, criteria: CriteriaId) -> CriteriaParams {
        self.registry.get(operator, criteria)
    }

    /// What a claim on `(operator, criteria)` would pay right now, at the
    /// current clock and price. Changes nothing.
    pub fn claimable(&self, operator: &Address, criteria: CriteriaId) -> Wei {
        let record = self.read_record(operator, criteria);
        let elapsed = elapsed_seconds(record.last_updated, self.env.clock.now());
        let accrued = accrued_amount(elapsed, record.gas_per_second, self.env.oracle.unit_price());
        capped_payout(accrued, record.available)
    }

    /// All records, ordered by (operator, criteria).
    pub fn records(&self) -> impl Iterator<Item = (&SubsidyKey, &SubsidyRecord)> {
        self.records.iter()
    }

    /// Native balance held by the ledger.
    pub fn pool_balance(&self) -> Wei {
        self.pool.balance()
    }

    /// Sum of `available` across every record.
    pub fn total_available(&self) -> Wei {
        self.records
            .values()
            .fold(0, |acc, r| acc.saturating_add(r.available))
    }

    /// Verify that the pool covers every record's available balance.
    ///
    /// # Errors
    /// Returns `SubsidyError::InvalidState` if it does not.
    pub fn check_solvency(&self) -> Result<(), SubsidyError> {
        let owed = self.total_available();
        if owed > self.pool.balance() {
            return Err(SubsidyError::InvalidState(format!(
                "Records owe {} wei but the pool holds {} wei",
                owed,
                self.pool.balance()
            )));
        }
        Ok(())
    }
}
