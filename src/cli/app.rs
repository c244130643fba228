use super::commands::ConfigCommands;
use super::commands::KeysCommands;
use super::commands::RequestCommands;
use super::commands::WhoamiCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::environment::Overrides;

#[derive(Parser)]
#[command(name = "tinydb")]
#[command(version)]
#[command(about = "Administrative client for the TinyDB document database service")]
pub struct Cli {
    /// Configuration file to use instead of the per-user default
    #[arg(long, global = true, env = "TINYDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// API endpoint for this invocation (not saved)
    #[arg(long, global = true, env = "TINYDB_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Admin secret for this invocation (not saved)
    #[arg(long, global = true, env = "TINYDB_ADMIN_SECRET", hide_env_values = true)]
    pub admin_secret: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            admin_secret: self.admin_secret.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Local configuration: endpoint, admin secret, default tenant
    Config(ConfigCommands),
    /// Stored tenant API keys
    Keys(KeysCommands),
    /// Show who the server thinks a tenant credential belongs to
    Whoami(WhoamiCommands),
    /// Send an authenticated request to the API and print the JSON response
    Request(RequestCommands),
}
