use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::environment::Environment;

const NOT_SET: &str = "(not set)";

pub fn show_command(env: &Environment, as_json: bool) -> Result<()> {
    let config = env.require_loaded()?;

    if as_json {
        let view = masked_view(config);
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to format configuration")?
        );
        return Ok(());
    }

    match env.config_path() {
        Some(path) => println!("TinyDB configuration ({})", path.display()),
        None => println!("TinyDB configuration"),
    }
    println!("  Endpoint:       {}", or_not_set(&config.endpoint));
    println!(
        "  Admin secret:   {}",
        or_not_set(&config.masked_admin_secret())
    );
    println!(
        "  Default tenant: {}",
        config.default_tenant().unwrap_or(NOT_SET)
    );

    if config.tenants.is_empty() {
        println!("\nNo tenants configured.");
        println!("Run 'tinydb keys store <tenant> <alias>' or 'tinydb keys verify' to add one.");
        return Ok(());
    }

    println!("\nTenants:");
    for (tenant_id, profile) in &config.tenants {
        let marker = if config.default_tenant() == Some(tenant_id.as_str()) {
            "●".green().to_string()
        } else {
            "○".to_string()
        };
        let default_key = if profile.default_key.is_empty() {
            NOT_SET
        } else {
            profile.default_key.as_str()
        };
        println!(
            "  {} {} ({}) keys: {}, default key: {}",
            marker,
            tenant_id.bold(),
            profile.display_name(tenant_id),
            profile.keys.len(),
            default_key
        );
    }

    Ok(())
}

pub fn path_command(env: &Environment) -> Result<()> {
    let path = env
        .config_path()
        .context("No configuration path resolved for this invocation")?;
    println!("{}", path.display());
    Ok(())
}

fn or_not_set(value: &str) -> &str {
    if value.is_empty() { NOT_SET } else { value }
}

#[derive(Serialize)]
struct KeyView<'a> {
    alias: &'a str,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    default: bool,
}

/// Configuration as JSON with every secret masked
fn masked_view(config: &Config) -> serde_json::Value {
    let tenants: serde_json::Map<String, serde_json::Value> = config
        .tenants
        .iter()
        .map(|(tenant_id, profile)| {
            let keys: Vec<KeyView<'_>> = profile
                .keys
                .iter()
                .map(|(alias, entry)| KeyView {
                    alias,
                    key: entry.display_key(),
                    app_id: entry.app_id.as_deref(),
                    description: entry.description.as_deref(),
                    default: profile.default_key == *alias,
                })
                .collect();
            (
                tenant_id.clone(),
                json!({
                    "name": profile.display_name(tenant_id),
                    "default_key": profile.default_key,
                    "keys": keys,
                }),
            )
        })
        .collect();

    json!({
        "endpoint": config.endpoint,
        "admin_secret": config.masked_admin_secret(),
        "default_tenant": config.default_tenant(),
        "tenants": tenants,
    })
}
