use anyhow::Result;
use colored::*;
use log::info;

use crate::environment::Environment;
use crate::error::TinyDbError;
use crate::ui::confirm_destructive;

pub fn delete_command(
    env: &mut Environment,
    tenant: &str,
    alias: &str,
    force: bool,
    prune_empty: bool,
) -> Result<()> {
    info!("Deleting key '{}' for tenant {}", alias, tenant);

    let is_default = {
        let config = env.require_loaded()?;
        let profile = config
            .tenant(tenant)
            .ok_or_else(|| TinyDbError::TenantNotFound(tenant.to_string()))?;
        if !profile.keys.contains_key(alias) {
            return Err(TinyDbError::KeyAliasNotFound {
                alias: alias.to_string(),
                tenant: tenant.to_string(),
            }
            .into());
        }
        profile.default_key == alias
    };

    if is_default {
        println!("⚠ Warning: '{}' is the default key for tenant '{}'", alias, tenant);
    }
    if !confirm_destructive(&format!("Delete key '{}' for tenant '{}'?", alias, tenant), force)? {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let removal = env.delete_key(tenant, alias, prune_empty)?;
    println!("{} Key '{}' deleted", "✓".green(), alias);

    if removal.default_cleared {
        println!(
            "Tenant '{}' has no default key now. Run 'tinydb keys use {} <alias>' to pick one.",
            tenant, tenant
        );
    }
    if removal.tenant_removed {
        println!("Tenant '{}' had no keys left and was removed.", tenant);
    }
    if removal.default_tenant_cleared {
        println!("Default tenant cleared.");
    }
    Ok(())
}
