//! Fill command handler
//!
//! Reads issue keys from the sheet, resolves their Tempo accounts via
//! Jira and Tempo, and writes the account keys back into the sheet.
//! Unreadable rows are reported and skipped; a failed API call aborts
//! the run before the sheet is touched.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use colored::*;
use dialoguer::Input;
use is_terminal::IsTerminal;

use crate::api::tempo::{self, TempoClient};
use crate::api::{Account, JiraClient};
use crate::config;
use crate::fill::excel::{layout, reader, writer};
use crate::fill::{assemble_account_index, dedupe_keys, partition_outcomes};

#[derive(Debug, Args)]
pub struct FillArgs {
    /// Excel file with issue keys in column A of the first sheet
    pub file: PathBuf,

    /// JSON config file with credentials
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// 0-based column that receives the account key
    #[arg(long, default_value_t = layout::DEFAULT_ACCOUNT_COL)]
    pub account_column: u16,

    /// How many Tempo accounts to fetch
    #[arg(long, default_value_t = tempo::DEFAULT_PAGE_LIMIT)]
    pub account_limit: u32,

    /// Resolve accounts and show the planned writes without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle_fill_command(args: FillArgs) -> Result<()> {
    if !args.file.exists() {
        bail!("File does not exist: {}", args.file.display());
    }
    if args.account_column as usize == layout::ISSUE_KEY_COL {
        log::warn!("account column {} is the issue key column; keys will be overwritten", args.account_column);
    }

    let user_config = config::load_user_config(args.config.as_deref())?;
    let run_config = config::resolve(user_config)?;

    // Stage 1: the sheet
    let outcomes = reader::read_issue_keys(&args.file)?;
    let (keys, row_errors) = partition_outcomes(outcomes);
    if !row_errors.is_empty() {
        eprintln!(
            "{}",
            format!("{} row(s) could not be read:", row_errors.len()).red()
        );
        for error in &row_errors {
            eprintln!("  {}", error);
        }
    }
    let keys = dedupe_keys(keys);
    println!(
        "Read {} issue key(s) from {}",
        keys.len(),
        args.file.display()
    );
    let keys = ensure_keys(keys)?;

    // Stage 2: Jira
    let jira = JiraClient::new(
        &run_config.jira_endpoint,
        &run_config.jira_email,
        &run_config.jira_api_key,
    )?;
    let issues = jira.search_issues(&keys).await.inspect_err(|_| {
        eprintln!("{}", "Failed to load Jira issues for keys:".red());
        for key in &keys {
            eprintln!("  {}", key);
        }
    })?;
    println!("Jira returned {} issue(s)", issues.len());

    // Stage 3: Tempo
    let tempo_client = TempoClient::new(tempo::DEFAULT_BASE_URL, &run_config.tempo_access_token)?;
    let accounts = tempo_client
        .list_accounts(args.account_limit)
        .await
        .inspect_err(|_| eprintln!("{}", "Failed to load Tempo accounts".red()))?;
    println!("Tempo returned {} account(s)", accounts.len());

    // Stage 4: join
    let index = assemble_account_index(&issues, &accounts);
    println!("Matched {} issue(s) to accounts", index.len());

    if args.dry_run {
        print_planned_writes(&index);
        println!("{}", "Dry run, spreadsheet not modified".yellow());
        return Ok(());
    }

    // Stage 5: write back
    let filled = writer::write_account_keys(&args.file, &index, args.account_column)?;
    println!(
        "{} {} row(s) updated in {}",
        "Done:".green().bold(),
        filled,
        args.file.display()
    );

    Ok(())
}

fn print_planned_writes(index: &crate::fill::AccountIndex) {
    let mut entries: Vec<(&String, &Account)> = index.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (key, account) in entries {
        println!("  {} -> {}", key, account.key);
    }
}

/// Fall back to prompting for keys when the sheet had none
fn ensure_keys(keys: Vec<String>) -> Result<Vec<String>> {
    if !keys.is_empty() {
        return Ok(keys);
    }
    if !std::io::stdin().is_terminal() {
        bail!("No issue keys found in the sheet");
    }

    let input: String = Input::new()
        .with_prompt("No issue keys found in the sheet; enter keys separated by commas")
        .interact_text()?;
    let keys = dedupe_keys(
        input
            .split(',')
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect(),
    );
    if keys.is_empty() {
        bail!("No issue keys provided");
    }
    Ok(keys)
}
