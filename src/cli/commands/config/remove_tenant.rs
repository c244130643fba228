use anyhow::Result;
use colored::*;
use log::info;

use crate::environment::Environment;
use crate::error::TinyDbError;
use crate::ui::confirm_destructive;

pub fn remove_tenant_command(env: &mut Environment, tenant: &str, force: bool) -> Result<()> {
    info!("Removing tenant profile: {}", tenant);

    let key_count = env
        .require_loaded()?
        .tenant(tenant)
        .map(|profile| profile.keys.len())
        .ok_or_else(|| TinyDbError::TenantNotFound(tenant.to_string()))?;

    let prompt = format!(
        "Forget tenant '{}' and its {} stored key(s)?",
        tenant, key_count
    );
    if !confirm_destructive(&prompt, force)? {
        println!("Removal cancelled.");
        return Ok(());
    }

    let default_cleared = env.remove_tenant(tenant)?;
    println!("{} Tenant '{}' removed", "✓".green(), tenant);
    if default_cleared {
        println!("Default tenant cleared. Run 'tinydb config set default-tenant <id>' to choose another.");
    }
    Ok(())
}
