use anyhow::Result;
use clap::Parser;
use colored::*;
use log::{debug, info};
use std::process::ExitCode;

use tinydb_cli::cli::{Cli, Commands, commands};
use tinydb_cli::environment::Environment;
use tinydb_cli::error::exit_code_for;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A .env file may carry TINYDB_* settings; a missing file is fine.
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Starting tinydb");

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut env = Environment::load(cli.config.clone())?.with_overrides(cli.overrides());
    debug!("Using config file {:?}", env.config_path());

    match cli.command {
        Commands::Config(args) => commands::config_command(&mut env, args).await,
        Commands::Keys(args) => commands::keys_command(&mut env, args).await,
        Commands::Whoami(args) => commands::whoami_command(&env, args).await,
        Commands::Request(args) => commands::request_command(&env, args).await,
    }
}
