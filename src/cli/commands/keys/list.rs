use anyhow::Result;
use colored::*;

use crate::environment::Environment;
use crate::error::TinyDbError;

pub fn list_command(env: &Environment, tenant_filter: Option<&str>) -> Result<()> {
    let config = env.require_loaded()?;

    if let Some(tenant) = tenant_filter {
        if config.tenant(tenant).is_none() {
            return Err(TinyDbError::TenantNotFound(tenant.to_string()).into());
        }
    }

    if config.tenants.is_empty() {
        println!("No keys stored.");
        println!("Run 'tinydb keys store <tenant> <alias>' or 'tinydb keys verify' to add one.");
        return Ok(());
    }

    for (tenant_id, profile) in config
        .tenants
        .iter()
        .filter(|(id, _)| tenant_filter.is_none_or(|t| t == id.as_str()))
    {
        let current = if config.default_tenant() == Some(tenant_id.as_str()) {
            " (default tenant)".green().to_string()
        } else {
            String::new()
        };
        println!(
            "{} [{}]{}",
            profile.display_name(tenant_id).bold(),
            tenant_id,
            current
        );

        if profile.keys.is_empty() {
            println!("    no keys");
            continue;
        }

        for (alias, entry) in &profile.keys {
            let marker = if profile.default_key == *alias { "●" } else { "○" };
            let mut line = format!("  {} {:<16} {}", marker, alias, entry.display_key());
            if let Some(app_id) = &entry.app_id {
                line.push_str(&format!("  app: {}", app_id));
            }
            if let Some(description) = &entry.description {
                line.push_str(&format!("  {}", description.dimmed()));
            }
            println!("{}", line);
        }
    }

    Ok(())
}
