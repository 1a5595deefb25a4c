use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "soundcheck")]
pub struct Cli {
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Migrate(MigrateArgs),
    Status(StatusArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    #[arg(long, default_value = "migrations")]
    pub dir: PathBuf,

    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "migrations")]
    pub dir: PathBuf,
}
