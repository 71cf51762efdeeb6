// crates/subsidy-cli/src/main.rs
//
// CLI entrypoint for the gas subsidy ledger.
//
// Loads configuration, initializes tracing, opens the ledger from its JSON
// state file, runs one operation, and writes the state back if the operation
// changed it.

mod commands;
mod config;
mod output;
mod store;

use clap::{Parser, Subcommand};
use commands::claim::ClaimArgs;
use commands::configure::ConfigureArgs;
use commands::fund::FundArgs;
use commands::show::ShowArgs;
use commands::Session;
use config::{expand_tilde, CliConfig, ConfigError};
use output::OutputFormat;
use store::StateFile;

/// Gas subsidy ledger CLI for bridge operators and funders.
#[derive(Parser, Debug)]
#[command(
    name = "subsidy",
    version = "0.1.0",
    about = "Gas subsidy ledger: configure criteria, fund subsidies, claim accrued gas costs"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.subsidy/config.toml")]
    config: String,

    /// Path to the ledger state file; overrides the configured value.
    #[arg(long, global = true)]
    state: Option<String>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Batch-configure gas usage and minimum rate for your criteria.
    Configure(ConfigureArgs),

    /// Deposit value for an operator's criteria at a chosen rate.
    Fund(FundArgs),

    /// Claim accrued subsidy to a beneficiary.
    Claim(ClaimArgs),

    /// Show one subsidy record and what it could pay right now.
    Show(ShowArgs),

    /// List every subsidy record.
    List,

    /// Show payouts credited to beneficiaries.
    Balances,
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Configure(_) | Commands::Fund(_) | Commands::Claim(_)
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, falling back to defaults only if the
    // file does not exist. A file that exists but does not parse is an error.
    let (cli_config, config_missing) = match CliConfig::load(&cli.config) {
        Ok(cfg) => (cfg, false),
        Err(ConfigError::NotFound { .. }) => (CliConfig::default(), true),
        Err(e) => return Err(e.into()),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli_config.log_level)),
        )
        .init();

    if config_missing {
        tracing::warn!("No config file at {}. Using defaults.", cli.config);
    } else {
        tracing::debug!("Loaded configuration from {}", cli.config);
    }

    let state_path = expand_tilde(cli.state.as_deref().unwrap_or(&cli_config.state_file));
    tracing::debug!("Ledger state file: {}", state_path);

    let state = StateFile::load(&state_path).await?;
    let format = OutputFormat::from_json_flag(cli.json);
    let mut session = Session::open(state, cli_config.unit_price as u128, format)?;

    match &cli.command {
        Commands::Configure(args) => commands::configure::run(&mut session, args)?,
        Commands::Fund(args) => commands::fund::run(&mut session, args)?,
        Commands::Claim(args) => commands::claim::run(&mut session, args)?,
        Commands::Show(args) => commands::show::run_show(&session, args)?,
        Commands::List => commands::show::run_list(&session)?,
        Commands::Balances => commands::show::run_balances(&session)?,
    }

    if cli.command.mutates() {
        session.snapshot().save(&state_path).await?;
        tracing::debug!("Saved ledger state to {}", state_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_configure_lists() {
        let cli = Cli::try_parse_from([
            "subsidy",
            "configure",
            "--caller",
            "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a",
            "--criteria",
            "1,2",
            "--gas-usage",
            "50000,80000",
            "--min-gas-per-second",
            "5,7",
        ])
        .unwrap();
        match cli.command {
            Commands::Configure(args) => {
                assert_eq!(args.criteria, vec![1, 2]);
                assert_eq!(args.gas_usage, vec![50_000, 80_000]);
                assert_eq!(args.min_gas_per_second, vec![5, 7]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_fund_value_in_ether() {
        let cli = Cli::try_parse_from([
            "subsidy",
            "--json",
            "fund",
            "--funder",
            "0x0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f",
            "--operator",
            "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a",
            "--criteria",
            "1",
            "--rate",
            "10",
            "--value",
            "1eth",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.command.mutates());
        match cli.command {
            Commands::Fund(args) => {
                assert_eq!(args.value, 1_000_000_000_000_000_000);
                assert_eq!(args.gas_per_second, 10);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn parse_args(args: &[&str]) -> Cli {
        let mut argv = vec!["subsidy"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    const OPERATOR: &str = "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a";
    const FUNDER: &str = "0x0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f";

    #[test]
    fn test_json_configure_and_fund_print_receipts() {
        let configure = parse_args(&[
            "--json",
            "configure",
            "--caller",
            OPERATOR,
            "--criteria",
            "1,2",
            "--gas-usage",
            "50000,80000",
            "--min-gas-per-second",
            "5,7",
        ]);
        let mut session = Session::open(
            StateFile::default(),
            1,
            OutputFormat::from_json_flag(configure.json),
        )
        .unwrap();

        let out = match &configure.command {
            Commands::Configure(args) => commands::configure::execute(&mut session, args).unwrap(),
            other => panic!("unexpected command {:?}", other),
        };
        let receipt: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(receipt["operator"], OPERATOR);
        assert_eq!(receipt["entries"].as_array().unwrap().len(), 2);
        assert_eq!(receipt["entries"][1]["criteria"], 2);
        assert_eq!(receipt["entries"][1]["gas_usage"], 80_000);
        assert_eq!(receipt["entries"][1]["min_gas_per_second"], 7);

        let fund = parse_args(&[
            "--json",
            "fund",
            "--funder",
            FUNDER,
            "--operator",
            OPERATOR,
            "--criteria",
            "1",
            "--rate",
            "10",
            "--value",
            "1eth",
        ]);
        let out = match &fund.command {
            Commands::Fund(args) => commands::fund::execute(&mut session, args).unwrap(),
            other => panic!("unexpected command {:?}", other),
        };
        let receipt: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(receipt["funder"], FUNDER);
        assert_eq!(receipt["operator"], OPERATOR);
        assert_eq!(receipt["criteria"], 1);
        assert_eq!(receipt["available"], 1_000_000_000_000_000_000u64);
        assert_eq!(receipt["gas_per_second"], 10);
        assert!(receipt["last_updated"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_table_fund_prints_text() {
        let mut session = Session::open(StateFile::default(), 1, OutputFormat::Table).unwrap();
        let configure = parse_args(&[
            "configure",
            "--caller",
            OPERATOR,
            "--criteria",
            "1",
            "--gas-usage",
            "50000",
            "--min-gas-per-second",
            "5",
        ]);
        if let Commands::Configure(args) = &configure.command {
            let out = commands::configure::execute(&mut session, args).unwrap();
            assert!(out.starts_with("Configured 1 criteria"));
        }
        let fund = parse_args(&[
            "fund",
            "--funder",
            FUNDER,
            "--operator",
            OPERATOR,
            "--criteria",
            "1",
            "--rate",
            "10",
            "--value",
            "0.5eth",
        ]);
        let out = match &fund.command {
            Commands::Fund(args) => commands::fund::execute(&mut session, args).unwrap(),
            other => panic!("unexpected command {:?}", other),
        };
        assert!(out.contains("with 0.5 ETH"));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        let result = Cli::try_parse_from([
            "subsidy",
            "claim",
            "--caller",
            "0x1234",
            "--criteria",
            "1",
            "--beneficiary",
            "0x0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_only_commands_do_not_mutate() {
        let cli = Cli::try_parse_from(["subsidy", "list"]).unwrap();
        assert!(!cli.command.mutates());
    }
}
