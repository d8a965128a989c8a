use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kendra_sync::{deploy::DeployCommand, sync::SyncArgs};

/// Kendra data source provisioning and sync trigger
#[derive(Parser)]
#[command(name = "kendra-sync")]
#[command(version)]
#[command(about = "Provision a Kendra index with a document connector and trigger its sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate deployment templates
    #[command(alias = "deploy")]
    Create {
        #[command(subcommand)]
        platform: DeployCommand,
    },
    /// Start one data source sync job
    Sync(SyncArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { platform } => platform.run(),
        Commands::Sync(args) => run_sync(args),
    }
}

fn run_sync(args: SyncArgs) -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(kendra_sync::sync::run(args))
}
