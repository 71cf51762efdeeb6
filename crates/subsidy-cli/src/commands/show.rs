// crates/subsidy-cli/src/commands/show.rs
//
// Read-only commands: `subsidy show`, `subsidy list`, `subsidy balances`.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use subsidy_core::{Address, CriteriaId, Wei};
use subsidy_ledger::Ether;

use super::Session;
use crate::output::{print_rows, OutputFormat};

/// Arguments for `subsidy show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Operator owning the record (hex address).
    #[arg(long)]
    pub operator: Address,
    /// Criteria id.
    #[arg(long)]
    pub criteria: CriteriaId,
    /// Unit price for the claimable preview; overrides the configured value.
    #[arg(long)]
    pub unit_price: Option<u64>,
}

/// A row in the record table.
#[derive(Debug, Tabled, Serialize)]
struct RecordRow {
    #[tabled(rename = "Operator")]
    operator: Address,
    #[tabled(rename = "Criteria")]
    criteria: CriteriaId,
    #[tabled(rename = "Available")]
    #[serde(skip)]
    available_display: String,
    #[tabled(skip)]
    available: Wei,
    #[tabled(rename = "Gas/s")]
    gas_per_second: u32,
    #[tabled(rename = "Gas usage")]
    gas_usage: u32,
    #[tabled(rename = "Min gas/s")]
    min_gas_per_second: u32,
    #[tabled(rename = "Last updated")]
    last_updated: u32,
    #[tabled(rename = "Claimable")]
    #[serde(skip)]
    claimable_display: String,
    #[tabled(skip)]
    claimable: Wei,
}

/// A row in the beneficiary balance table.
#[derive(Debug, Tabled, Serialize)]
struct BalanceRow {
    #[tabled(rename = "Beneficiary")]
    beneficiary: Address,
    #[tabled(rename = "Credited")]
    #[serde(skip)]
    credited_display: String,
    #[tabled(skip)]
    credited: Wei,
}

fn record_row(session: &Session, operator: &Address, criteria: CriteriaId) -> RecordRow {
    let record = session.ledger.read_record(operator, criteria);
    let claimable = session.ledger.claimable(operator, criteria);
    RecordRow {
        operator: *operator,
        criteria,
        available_display: Ether::from_wei(record.available).to_string(),
        available: record.available,
        gas_per_second: record.gas_per_second,
        gas_usage: record.gas_usage,
        min_gas_per_second: record.min_gas_per_second,
        last_updated: record.last_updated,
        claimable_display: Ether::from_wei(claimable).to_string(),
        claimable,
    }
}

/// Run the show command: one record plus its claimable preview and the
/// registry parameters currently configured for it.
pub fn run_show(session: &Session, args: &ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(price) = args.unit_price {
        session.price.set(price as Wei);
    }
    let row = record_row(session, &args.operator, args.criteria);
    print_rows(session.format, &[row]);

    let params = session.ledger.criteria_params(&args.operator, args.criteria);
    if params.is_configured() {
        tracing::debug!(
            "Registry for {} criteria {}: gas usage {}, min {} gas/s",
            args.operator,
            args.criteria,
            params.gas_usage,
            params.min_gas_per_second
        );
    } else {
        tracing::warn!(
            "Criteria {} is not configured for operator {}",
            args.criteria,
            args.operator
        );
    }
    Ok(())
}

/// Rows for every record that has been funded at least once. Claims on a
/// never-funded key leave a zeroed record behind; those are not listed.
fn listed_rows(session: &Session) -> Vec<RecordRow> {
    session
        .ledger
        .records()
        .filter(|(_, record)| record.is_funded())
        .map(|(key, _)| record_row(session, &key.operator, key.criteria))
        .collect()
}

/// Run the list command: every funded record in the ledger.
pub fn run_list(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let rows = listed_rows(session);
    print_rows(session.format, &rows);
    if session.format == OutputFormat::Table {
        println!(
            "Pool: {}  |  Owed: {}",
            Ether::from_wei(session.ledger.pool_balance()),
            Ether::from_wei(session.ledger.total_available())
        );
    }
    Ok(())
}

/// Run the balances command: payouts credited per beneficiary.
pub fn run_balances(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<BalanceRow> = session
        .transfer
        .credits()
        .into_iter()
        .map(|(beneficiary, credited)| BalanceRow {
            beneficiary,
            credited_display: Ether::from_wei(credited).to_string(),
            credited,
        })
        .collect();
    print_rows(session.format, &rows);
    Ok(())
}
