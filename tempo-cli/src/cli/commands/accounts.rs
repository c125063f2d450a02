//! Accounts command handler
//!
//! Lists the first page of Tempo accounts, mainly to check the token
//! and see which account keys a fill run could write.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::api::tempo::{self, TempoClient};
use crate::config;

#[derive(Debug, Args)]
pub struct AccountsArgs {
    /// JSON config file with credentials
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// How many Tempo accounts to fetch
    #[arg(long, default_value_t = tempo::DEFAULT_PAGE_LIMIT)]
    pub account_limit: u32,
}

pub async fn handle_accounts_command(args: AccountsArgs) -> Result<()> {
    let user_config = config::load_user_config(args.config.as_deref())?;
    let token = config::resolve_tempo_token(user_config)?;

    let client = TempoClient::new(tempo::DEFAULT_BASE_URL, &token)?;
    let accounts = client.list_accounts(args.account_limit).await?;

    if accounts.is_empty() {
        println!("No accounts returned");
        return Ok(());
    }

    let id_width = accounts
        .iter()
        .map(|a| a.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("id".len());
    let key_width = accounts
        .iter()
        .map(|a| a.key.len())
        .max()
        .unwrap_or(0)
        .max("key".len());

    println!(
        "{}",
        format!(
            "{:>id_width$}  {:<key_width$}  {}",
            "id", "key", "name"
        )
        .bold()
    );
    for account in &accounts {
        println!(
            "{:>id_width$}  {:<key_width$}  {}",
            account.id, account.key, account.name
        );
    }

    Ok(())
}
