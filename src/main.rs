mod cli;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use pipebox::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = load_config(args.config)?;
            let requests = match args.requests {
                Some(path) => server::load_batch(&path)?,
                None => server::sample_batch(),
            };
            server::run(config, requests).await?;
        }
        Commands::Check(args) => {
            let config = load_config(args.config)?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, AnyError> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
