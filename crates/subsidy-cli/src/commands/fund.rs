// crates/subsidy-cli/src/commands/fund.rs
//
// `subsidy fund` — deposit value for an (operator, criteria) pair.

use clap::Args;
use serde::Serialize;

use subsidy_core::{Address, CriteriaId, Timestamp, Wei};
use subsidy_ledger::{parse_amount, Ether};

use super::Session;
use crate::output::{format_json, OutputFormat};

/// Arguments for `subsidy fund`.
#[derive(Debug, Args)]
pub struct FundArgs {
    /// Identity attaching the value (hex address).
    #[arg(long)]
    pub funder: Address,
    /// Operator whose criteria is being subsidized (hex address).
    #[arg(long)]
    pub operator: Address,
    /// Criteria id.
    #[arg(long)]
    pub criteria: CriteriaId,
    /// Accrual rate in gas units per second.
    #[arg(long = "rate")]
    pub gas_per_second: u32,
    /// Attached value: wei ("1000", "1000wei") or ether ("1.5eth").
    #[arg(long, value_parser = parse_amount)]
    pub value: Wei,
}

#[derive(Debug, Serialize)]
struct FundReceipt {
    funder: Address,
    operator: Address,
    criteria: CriteriaId,
    available: Wei,
    gas_per_second: u32,
    last_updated: Timestamp,
}

/// Fund the record and render the result in the session's output format.
pub fn execute(session: &mut Session, args: &FundArgs) -> Result<String, Box<dyn std::error::Error>> {
    session.ledger.fund(
        &args.funder,
        args.value,
        &args.operator,
        args.criteria,
        args.gas_per_second,
    )?;

    let record = session.ledger.read_record(&args.operator, args.criteria);
    let rendered = match session.format {
        OutputFormat::Json => format_json(&FundReceipt {
            funder: args.funder,
            operator: args.operator,
            criteria: args.criteria,
            available: record.available,
            gas_per_second: record.gas_per_second,
            last_updated: record.last_updated,
        }),
        OutputFormat::Table => format!(
            "Funded operator {} criteria {} with {}\n  Rate:         {} gas/s\n  Last updated: {}",
            args.operator,
            args.criteria,
            Ether::from_wei(record.available),
            record.gas_per_second,
            record.last_updated
        ),
    };
    Ok(rendered)
}

/// Run the fund command.
pub fn run(session: &mut Session, args: &FundArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", execute(session, args)?);
    Ok(())
}
