use anyhow::Result;
use colored::*;
use log::info;

use crate::environment::Environment;

pub fn use_command(env: &mut Environment, tenant: &str, alias: &str) -> Result<()> {
    info!("Setting default key for {} to {}", tenant, alias);

    env.set_default_key(tenant, alias)?;
    println!(
        "{} '{}' is now the default key for tenant '{}'",
        "✓".green(),
        alias.trim(),
        tenant
    );
    Ok(())
}
