use clap::Parser;
use tracing::debug;

use marketsync::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use marketsync::adapter::inbound::cli::output::{self, OutputConfig};
use marketsync::adapter::inbound::cli::{check, fees, markets};
use marketsync::error::Result;
use marketsync::infrastructure::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));
    output::configure_color(cli.color, cli.json);

    if let Err(err) = run(&cli).await {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let (path, explicit) = cli.config_path();
    let config = Config::load_or_default(&path, explicit)?;
    config.init_logging(cli.verbose);
    debug!(path = %path.display(), explicit, "Configuration loaded");

    match cli.command() {
        Commands::Fees => fees::execute(&config).await,
        Commands::Markets(args) => markets::execute(&config, &args).await,
        Commands::Check(CheckCommand::Config) => {
            check::config::execute(&config, &path, explicit || path.exists())
        }
    }
}
