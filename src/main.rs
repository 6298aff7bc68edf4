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
            Commands::Convert {
                amount,
                from,
                to,
                swap,
            } => fxconv::AppCommand::Convert {
                amount,
                from,
                to,
                swap,
            },
            Commands::Currencies => fxconv::AppCommand::Currencies,
            Commands::Interactive => fxconv::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount using the latest exchange rate
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code, e.g. USD
        from: Option<String>,
        /// Target currency code, e.g. EUR
        to: Option<String>,
        /// Exchange source and target before converting
        #[arg(short, long)]
        swap: bool,
    },
    /// List supported currencies
    Currencies,
    /// Start an interactive conversion session
    Interactive,
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
