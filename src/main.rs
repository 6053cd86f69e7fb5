use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Rates { base } => fxconv::AppCommand::Rates { bases: base },
            Commands::Convert { amount, from, to } => {
                fxconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Chart { from, to, days } => fxconv::AppCommand::Chart { from, to, days },
            Commands::History { clear } => fxconv::AppCommand::History { clear },
            Commands::Currencies => fxconv::AppCommand::Currencies,
            Commands::Favorite { code } => fxconv::AppCommand::Favorite { code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display exchange rates for one or more base currencies
    Rates {
        /// Base currency; repeat for several. Defaults to the configured base
        #[arg(short, long)]
        base: Vec<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,
    },
    /// Display a simulated rate history for a currency pair
    Chart {
        from: String,
        to: String,
        /// Number of days before today to include
        #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(..=3650))]
        days: u32,
    },
    /// Display recent conversions
    History {
        /// Remove all stored conversions
        #[arg(long)]
        clear: bool,
    },
    /// List supported currencies, favorites first
    Currencies,
    /// Add or remove a favorite currency
    Favorite { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
