use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use costwise::core::log::init_logging;
use std::path::PathBuf;

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

impl From<Commands> for costwise::AppCommand {
    fn from(cmd: Commands) -> costwise::AppCommand {
        match cmd {
            Commands::Costs => costwise::AppCommand::Costs,
            Commands::Pricing {
                market_size,
                export,
            } => costwise::AppCommand::Pricing {
                market_size,
                export,
            },
            Commands::Insights { recommendations } => {
                costwise::AppCommand::Insights { recommendations }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the cost, profitability and break-even report
    Costs,
    /// Suggest an optimal price with strategy scenarios
    Pricing {
        /// Market size override; defaults to the produced unit count
        #[arg(long)]
        market_size: Option<f64>,
        /// Write the scenarios to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Fetch AI-generated narrative insights for the cost report
    Insights {
        /// Also fetch pricing and product recommendations
        #[arg(long)]
        recommendations: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => costwise::cli::setup::setup(),
        Some(cmd) => costwise::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
