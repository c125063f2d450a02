use clap::Parser;
use colored::*;

mod api;
mod cli;
mod config;
mod fill;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::Cli::parse();
    if let Err(error) = cli::run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), error);
        std::process::exit(1);
    }
}
