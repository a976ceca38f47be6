//! docrag CLI entry point.

use anyhow::Result;
use clap::Parser;

use docrag::cli::commands::{document, embed, init, search, seed};
use docrag::cli::{handle_error, Cli, Commands};
use docrag::domain::models::Config;
use docrag::infrastructure::{ConfigLoader, LoggerImpl};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _logger = LoggerImpl::init(&config.logging)?;
    let json = cli.json;

    match cli.command {
        Commands::Init(args) => init::execute(args, json).await,
        Commands::Add(args) => document::execute_add(args, config, json).await,
        Commands::List => document::execute_list(config, json).await,
        Commands::Show(args) => document::execute_show(args, config, json).await,
        Commands::Update(args) => document::execute_update(args, config, json).await,
        Commands::Delete(args) => document::execute_delete(args, config, json).await,
        Commands::Search(args) => search::execute(args, config, json).await,
        Commands::Seed(args) => seed::execute(args, config, json).await,
        Commands::Embed(args) => embed::execute(args, config, json).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}
