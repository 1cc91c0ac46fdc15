//! telegpt: entry point. Loads `.env`, initializes logging, parses the CLI and runs the bot.

use anyhow::Result;
use clap::Parser;
use relay_bot::{init_tracing, load_config, BaseConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(BaseConfig::log_file_from_env().as_deref())?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            telegpt::run(config).await
        }
    }
}
