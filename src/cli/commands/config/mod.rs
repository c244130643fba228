//! Local configuration commands

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::environment::Environment;

mod remove_tenant;
mod set;
mod show;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the current configuration with secrets masked
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the configuration file path
    Path,
    /// Set a configuration value
    Set {
        /// Setting name
        #[arg(value_enum)]
        name: ConfigKey,
        /// New value (the admin secret is prompted for when omitted)
        value: Option<String>,
    },
    /// Clear a configuration value
    Unset {
        /// Setting name
        #[arg(value_enum)]
        name: ConfigKey,
    },
    /// Forget a tenant and every key stored for it
    RemoveTenant {
        /// Tenant id
        tenant: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Base URL of the TinyDB API
    Endpoint,
    /// Secret for administrative operations
    AdminSecret,
    /// Tenant used when --tenant is omitted
    DefaultTenant,
}

pub async fn config_command(env: &mut Environment, args: ConfigCommands) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show { json } => show::show_command(env, json),
        ConfigSubcommands::Path => show::path_command(env),
        ConfigSubcommands::Set { name, value } => set::set_command(env, name, value),
        ConfigSubcommands::Unset { name } => set::unset_command(env, name),
        ConfigSubcommands::RemoveTenant { tenant, force } => {
            remove_tenant::remove_tenant_command(env, &tenant, force)
        }
    }
}
