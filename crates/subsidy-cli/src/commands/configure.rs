// crates/subsidy-cli/src/commands/configure.rs
//
// `subsidy configure` — batch-set gas usage and minimum rate for criteria in
// the caller's own partition.

use clap::Args;
use serde::Serialize;

use subsidy_core::{Address, CriteriaId};

use super::Session;
use crate::output::{format_json, OutputFormat};

/// Arguments for `subsidy configure`.
#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Operator identity issuing the call (hex address).
    #[arg(long)]
    pub caller: Address,
    /// Criteria ids, comma separated.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub criteria: Vec<CriteriaId>,
    /// Gas usage per criteria, comma separated, same order as --criteria.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub gas_usage: Vec<u32>,
    /// Minimum gas per second per criteria, comma separated.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub min_gas_per_second: Vec<u32>,
}

#[derive(Debug, Serialize)]
struct ConfiguredCriteria {
    criteria: CriteriaId,
    gas_usage: u32,
    min_gas_per_second: u32,
}

#[derive(Debug, Serialize)]
struct ConfigureReceipt {
    operator: Address,
    entries: Vec<ConfiguredCriteria>,
}

/// Apply the batch and render the result in the session's output format.
pub fn execute(session: &mut Session, args: &ConfigureArgs) -> Result<String, Box<dyn std::error::Error>> {
    session.ledger.configure(
        &args.caller,
        &args.criteria,
        &args.gas_usage,
        &args.min_gas_per_second,
    )?;

    let entries: Vec<ConfiguredCriteria> = args
        .criteria
        .iter()
        .zip(&args.gas_usage)
        .zip(&args.min_gas_per_second)
        .map(|((&criteria, &gas_usage), &min_gas_per_second)| ConfiguredCriteria {
            criteria,
            gas_usage,
            min_gas_per_second,
        })
        .collect();

    let rendered = match session.format {
        OutputFormat::Json => format_json(&ConfigureReceipt {
            operator: args.caller,
            entries,
        }),
        OutputFormat::Table => {
            let mut text = format!(
                "Configured {} criteria for operator {}",
                entries.len(),
                args.caller
            );
            for entry in &entries {
                text.push_str(&format!(
                    "\n  criteria {}: gas usage {}, min {} gas/s",
                    entry.criteria, entry.gas_usage, entry.min_gas_per_second
                ));
            }
            text
        }
    };
    Ok(rendered)
}

/// Run the configure command.
pub fn run(session: &mut Session, args: &ConfigureArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", execute(session, args)?);
    Ok(())
}
