use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pipebox")]
#[command(about = "Pipebox request pipeline CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a batch of requests through the pipeline and print the responses
    Run(RunArgs),
    /// Validate the configuration and print it
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Configuration file (defaults to $PIPEBOX_CONFIG or config/pipebox.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// TOML file with a `[[requests]]` batch; the built-in sample batch is used otherwise
    #[arg(long)]
    pub requests: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Configuration file (defaults to $PIPEBOX_CONFIG or config/pipebox.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
