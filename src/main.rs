use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use nbg_rates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Language of currency names (ka or en), overrides the config
    #[arg(short, long, global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for nbg_rates::AppCommand {
    fn from(cmd: Commands) -> nbg_rates::AppCommand {
        match cmd {
            Commands::Rate { code, date } => nbg_rates::AppCommand::Rate { code, date },
            Commands::Show { code, date } => nbg_rates::AppCommand::Show { code, date },
            Commands::List { date, all } => nbg_rates::AppCommand::List { date, all },
            Commands::History { code, days } => nbg_rates::AppCommand::History { code, days },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Print the rate of one currency per single unit
    Rate {
        /// Currency code, e.g. USD
        code: String,
        /// Date as YYYY-MM-DD, a timestamp, "today" or "yesterday"
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show every detail of one currency
    Show {
        /// Currency code, e.g. USD
        code: String,
        /// Date as YYYY-MM-DD, a timestamp, "today" or "yesterday"
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List rates for the configured currencies
    List {
        /// Date as YYYY-MM-DD, a timestamp, "today" or "yesterday"
        #[arg(short, long)]
        date: Option<String>,
        /// List every published currency instead of the configured ones
        #[arg(short, long)]
        all: bool,
    },
    /// Show a currency's rate over recent days
    History {
        /// Currency code, e.g. USD
        code: String,
        /// Number of days to look back, including today
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => nbg_rates::cli::setup::setup(),
        Some(cmd) => {
            nbg_rates::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.language.as_deref(),
            )
            .await
        }
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
