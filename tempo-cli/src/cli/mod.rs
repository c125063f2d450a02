//! Command-line interface definition and dispatch

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::accounts::AccountsArgs;
use commands::fill::FillArgs;

#[derive(Debug, Parser)]
#[command(
    name = "tempo-cli",
    version,
    about = "Fill Tempo account keys into Jira issue spreadsheets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve Tempo accounts for the issues in a spreadsheet and write
    /// the account keys back
    Fill(FillArgs),
    /// List Tempo accounts
    Accounts(AccountsArgs),
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fill(args) => commands::fill::handle_fill_command(args).await,
        Commands::Accounts(args) => commands::accounts::handle_accounts_command(args).await,
    }
}
