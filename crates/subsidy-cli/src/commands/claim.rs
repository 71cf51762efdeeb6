// crates/subsidy-cli/src/commands/claim.rs
//
// `subsidy claim` — pay out what the caller's subsidy has accrued.

use clap::Args;
use serde::Serialize;

use subsidy_core::{Address, CriteriaId, Wei};
use subsidy_ledger::Ether;

use super::Session;
use crate::output::{format_json, OutputFormat};

/// Arguments for `subsidy claim`.
#[derive(Debug, Args)]
pub struct ClaimArgs {
    /// Operator identity issuing the claim (hex address).
    #[arg(long)]
    pub caller: Address,
    /// Criteria id.
    #[arg(long)]
    pub criteria: CriteriaId,
    /// Recipient of the payout (hex address).
    #[arg(long)]
    pub beneficiary: Address,
    /// Unit price in wei per gas unit; overrides the configured value.
    #[arg(long)]
    pub unit_price: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ClaimReceipt {
    operator: Address,
    criteria: CriteriaId,
    beneficiary: Address,
    paid: Wei,
    remaining: Wei,
}

/// Run the claim command.
pub fn run(session: &mut Session, args: &ClaimArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(price) = args.unit_price {
        session.price.set(price as Wei);
    }

    let paid = session
        .ledger
        .claim_subsidy(&args.caller, args.criteria, &args.beneficiary)?;
    let remaining = session
        .ledger
        .read_record(&args.caller, args.criteria)
        .available;

    match session.format {
        OutputFormat::Json => {
            let receipt = ClaimReceipt {
                operator: args.caller,
                criteria: args.criteria,
                beneficiary: args.beneficiary,
                paid,
                remaining,
            };
            println!("{}", format_json(&receipt));
        }
        OutputFormat::Table => {
            println!(
                "Claimed {} ({} wei) to {}",
                Ether::from_wei(paid),
                paid,
                args.beneficiary
            );
            println!("  Remaining: {}", Ether::from_wei(remaining));
        }
    }
    Ok(())
}
