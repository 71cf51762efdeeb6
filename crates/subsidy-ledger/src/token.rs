// crates/subsidy-ledger/src/token.rs
//
// Native currency units and the minimum funding threshold.
//
// All accounting is done in wei (18-decimal fixed point) held in u128, so no
// floating-point value ever touches a balance.

use std::fmt;

use serde::{Deserialize, Serialize};
use subsidy_core::Wei;

/// Number of wei in one ether.
pub const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;

/// Number of decimal places in the ether denomination.
pub const ETHER_DECIMALS: usize = 18;

/// Minimum value accepted by `fund`: 0.1 ether.
pub const MIN_SUBSIDY_WEI: Wei = WEI_PER_ETHER / 10;

/// An amount of native currency, displayed in ether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ether {
    /// Amount in wei.
    pub wei: Wei,
}

impl Ether {
    /// Create an amount from a wei value.
    pub fn from_wei(wei: Wei) -> Self {
        Self { wei }
    }
}

impl fmt::Display for Ether {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.wei / WEI_PER_ETHER;
        let frac = self.wei % WEI_PER_ETHER;
        if frac == 0 {
            write!(f, "{} ETH", whole)
        } else {
            let frac_str = format!("{:0width$}", frac, width = ETHER_DECIMALS);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} ETH", whole, trimmed)
        }
    }
}

/// Parse a user-supplied amount into wei.
///
/// Accepted forms:
/// - `"123"` or `"123wei"` — an integer number of wei.
/// - `"1.5eth"` or `"2eth"` — a decimal number of ether, at most 18 decimals.
pub fn parse_amount(input: &str) -> Result<Wei, String> {
    let s = input.trim();
    if let Some(ether) = s.strip_suffix("eth") {
        return parse_ether(ether.trim());
    }
    let digits = s.strip_suffix("wei").unwrap_or(s).trim();
    digits
        .parse::<Wei>()
        .map_err(|e| format!("Invalid wei amount '{}': {}", input, e))
}

fn parse_ether(s: &str) -> Result<Wei, String> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err("Empty ether amount".to_string());
    }
    if frac.len() > ETHER_DECIMALS {
        return Err(format!(
            "Ether amount '{}' has more than {} decimal places",
            s, ETHER_DECIMALS
        ));
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<Wei>()
            .map_err(|e| format!("Invalid ether amount '{}': {}", s, e))?
            .checked_mul(WEI_PER_ETHER)
            .ok_or_else(|| format!("Ether amount '{}' overflows", s))?
    };

    let frac_wei = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = ETHER_DECIMALS);
        padded
            .parse::<Wei>()
            .map_err(|e| format!("Invalid ether amount '{}': {}", s, e))?
    };

    whole_wei
        .checked_add(frac_wei)
        .ok_or_else(|| format!("Ether amount '{}' overflows", s))
}
