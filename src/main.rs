use anyhow::Result;
use clap::{Parser, Subcommand};
use kurs::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// API key for exchangerate-api.com, overrides the configuration file
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Currency to convert from, e.g. USD
    #[arg(short, long)]
    from: Option<String>,

    /// Currency to convert to, e.g. EUR
    #[arg(short, long)]
    to: Option<String>,

    /// Amount to convert
    #[arg(short, long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// Display language: en, ru or uz
    #[arg(short, long)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
}

impl From<Cli> for kurs::RunOptions {
    fn from(cli: Cli) -> kurs::RunOptions {
        kurs::RunOptions {
            config_path: cli.config_path,
            api_key: cli.api_key,
            from: cli.from,
            to: cli.to,
            amount: cli.amount,
            lang: cli.lang,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command.take() {
        Some(Commands::Setup) => kurs::cli::setup::setup(),
        None => kurs::run(cli.into()).await.map(|_| ()),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
