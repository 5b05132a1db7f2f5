use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use xspend::core::log::init_logging;
use xspend::{AppCommand, RunOptions, SaveTarget};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Operations file to read instead of the configured one
    #[arg(long, global = true)]
    operations: Option<PathBuf>,

    /// Save the report as JSON, to PATH or to the configured reports directory
    #[arg(long, global = true, num_args = 0..=1, value_name = "PATH")]
    save: Option<Option<PathBuf>>,

    /// Print a table instead of JSON
    #[arg(long, global = true)]
    table: bool,

    /// API key for the exchange rates service
    #[arg(long, global = true, env = "API_KEY_CURRENCY", hide_env_values = true)]
    currency_api_key: Option<String>,

    /// API key for the stock listing service
    #[arg(long, global = true, env = "API_KEY_FINANCIAL", hide_env_values = true)]
    stocks_api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the dashboard for the month of DATE ("dd.mm.yyyy HH:MM:SS")
    Summary { date: String },
    /// Display cashback per category for a month
    Cashback { year: i32, month: u32 },
    /// Display spending in a category over the three months before DATE
    Spending {
        category: String,
        /// End of the window ("dd.mm.yyyy"), defaults to now
        date: Option<String>,
    },
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Summary { date } => AppCommand::Summary { date },
            Commands::Cashback { year, month } => AppCommand::Cashback { year, month },
            Commands::Spending { category, date } => AppCommand::Spending { category, date },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = RunOptions {
        operations_path: cli.operations,
        save: cli.save.map(|path| path.map_or(SaveTarget::Default, SaveTarget::Path)),
        table: cli.table,
        currency_api_key: cli.currency_api_key,
        stocks_api_key: cli.stocks_api_key,
    };

    let result = match cli.command {
        Some(Commands::Setup) => xspend::cli::setup::setup(),
        Some(cmd) => xspend::run_command(cmd.into(), cli.config_path.as_deref(), &options)
            .await
            .map(|_| ()),
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
