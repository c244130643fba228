use anyhow::{Context, Result};
use colored::*;
use log::info;

use super::ConfigKey;
use crate::environment::Environment;
use crate::ui::prompt_secret;

pub fn set_command(env: &mut Environment, name: ConfigKey, value: Option<String>) -> Result<()> {
    info!("Setting {:?}", name);

    match name {
        ConfigKey::Endpoint => {
            let value = value.context("Missing value: tinydb config set endpoint <url>")?;
            env.set_endpoint(&value)?;
            println!(
                "{} Endpoint set to {}",
                "✓".green(),
                env.require_loaded()?.endpoint
            );
        }
        ConfigKey::AdminSecret => {
            let secret = match value {
                Some(secret) => secret,
                None => prompt_secret("Admin secret")?,
            };
            env.set_admin_secret(&secret)?;
            println!(
                "{} Admin secret set ({})",
                "✓".green(),
                env.require_loaded()?.masked_admin_secret()
            );
        }
        ConfigKey::DefaultTenant => {
            let tenant = value.context("Missing value: tinydb config set default-tenant <tenant>")?;
            env.set_default_tenant(&tenant)?;
            let config = env.require_loaded()?;
            let tenant = config.default_tenant().unwrap_or_default();
            println!("{} Default tenant set to {}", "✓".green(), tenant);
            if config.tenant(tenant).is_none() {
                println!(
                    "  No keys are stored for '{}' yet; pass --api-key or run 'tinydb keys store {} <alias>'.",
                    tenant, tenant
                );
            }
        }
    }

    Ok(())
}

pub fn unset_command(env: &mut Environment, name: ConfigKey) -> Result<()> {
    info!("Clearing {:?}", name);

    match name {
        ConfigKey::Endpoint => env.clear_endpoint()?,
        ConfigKey::AdminSecret => env.clear_admin_secret()?,
        ConfigKey::DefaultTenant => env.clear_default_tenant()?,
    }
    println!("{} Cleared {}", "✓".green(), setting_name(name));
    Ok(())
}

fn setting_name(name: ConfigKey) -> &'static str {
    match name {
        ConfigKey::Endpoint => "endpoint",
        ConfigKey::AdminSecret => "admin secret",
        ConfigKey::DefaultTenant => "default tenant",
    }
}
