// crates/subsidy-ledger/src/accrual.rs
//
// Lazy accrual arithmetic for subsidy claims.
//
// A record accrues `elapsed * gas_per_second * unit_price` wei between two
// accrual points. Nothing accrues in the background: the amount only
// materializes when a claim reads the clock and the price signal.
//
// The product can exceed u128 for extreme inputs. Multiplication saturates,
// which is exact for every caller because the result is always capped by the
// record's available balance (itself a u128).

use subsidy_core::{Timestamp, Wei};

/// Seconds elapsed between the last accrual point and `now`.
///
/// Returns 0 if the clock reports a time before `last_updated`.
pub fn elapsed_seconds(last_updated: Timestamp, now: Timestamp) -> u32 {
    now.saturating_sub(last_updated)
}

/// Value accrued over `elapsed` seconds at `gas_per_second`, priced at
/// `unit_price` wei per gas unit.
pub fn accrued_amount(elapsed: u32, gas_per_second: u32, unit_price: Wei) -> Wei {
    let gas = elapsed as u64 * gas_per_second as u64;
    (gas as Wei).saturating_mul(unit_price)
}

/// The amount a claim pays out: the accrued value, never more than what is
/// still available.
pub fn capped_payout(accrued: Wei, available: Wei) -> Wei {
    accrued.min(available)
}
