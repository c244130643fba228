//! Stored API key commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::environment::Environment;

mod delete;
mod list;
mod store;
mod use_key;
mod verify;

#[derive(Args)]
pub struct KeysCommands {
    #[command(subcommand)]
    pub command: KeysSubcommands,
}

#[derive(Subcommand)]
pub enum KeysSubcommands {
    /// Store an API key for a tenant under an alias
    Store {
        /// Tenant id
        tenant: String,
        /// Local name for the key
        alias: String,
        /// Raw API key (prompted for when omitted)
        #[arg(long)]
        key: Option<String>,
        /// Non-secret key prefix shown in listings
        #[arg(long)]
        prefix: Option<String>,
        /// Application the key is scoped to
        #[arg(long)]
        app_id: Option<String>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Make this the tenant's default key and the default tenant
        #[arg(long)]
        default: bool,
    },
    /// List stored keys
    List {
        /// Only show this tenant
        #[arg(long)]
        tenant: Option<String>,
    },
    /// Make a stored key the tenant's default
    Use {
        /// Tenant id
        tenant: String,
        /// Key alias
        alias: String,
    },
    /// Delete a stored key
    Delete {
        /// Tenant id
        tenant: String,
        /// Key alias
        alias: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
        /// Keep the tenant entry even when no keys remain
        #[arg(long)]
        keep_empty: bool,
    },
    /// Verify a raw API key with the server and store it as the tenant's default
    Verify {
        /// Raw API key (prompted for when omitted)
        key: Option<String>,
    },
}

pub async fn keys_command(env: &mut Environment, args: KeysCommands) -> Result<()> {
    match args.command {
        KeysSubcommands::Store {
            tenant,
            alias,
            key,
            prefix,
            app_id,
            description,
            default,
        } => store::store_command(
            env,
            store::StoreOptions {
                tenant,
                alias,
                key,
                prefix,
                app_id,
                description,
                default,
            },
        ),
        KeysSubcommands::List { tenant } => list::list_command(env, tenant.as_deref()),
        KeysSubcommands::Use { tenant, alias } => use_key::use_command(env, &tenant, &alias),
        KeysSubcommands::Delete {
            tenant,
            alias,
            force,
            keep_empty,
        } => delete::delete_command(env, &tenant, &alias, force, !keep_empty),
        KeysSubcommands::Verify { key } => verify::verify_command(env, key).await,
    }
}
