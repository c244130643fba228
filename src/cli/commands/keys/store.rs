use anyhow::Result;
use colored::*;
use log::info;

use crate::config::KeyEntry;
use crate::environment::Environment;
use crate::ui::prompt_secret;

pub struct StoreOptions {
    pub tenant: String,
    pub alias: String,
    pub key: Option<String>,
    pub prefix: Option<String>,
    pub app_id: Option<String>,
    pub description: Option<String>,
    pub default: bool,
}

pub fn store_command(env: &mut Environment, options: StoreOptions) -> Result<()> {
    info!("Storing key '{}' for tenant {}", options.alias, options.tenant);

    let key = match options.key {
        Some(key) => key,
        None => prompt_secret(&format!("API key for {}/{}", options.tenant, options.alias))?,
    };

    let entry = KeyEntry {
        key: key.trim().to_string(),
        prefix: non_empty(options.prefix),
        app_id: non_empty(options.app_id),
        description: non_empty(options.description),
    };

    let replaced = env
        .require_loaded()?
        .tenant(options.tenant.trim())
        .is_some_and(|profile| profile.keys.contains_key(options.alias.trim()));

    env.store_key(&options.tenant, &options.alias, entry, options.default)?;

    let action = if replaced { "replaced" } else { "stored" };
    println!(
        "{} Key '{}' {} for tenant '{}'",
        "✓".green(),
        options.alias.trim(),
        action,
        options.tenant.trim()
    );
    if options.default {
        println!("  Set as default key and default tenant");
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
