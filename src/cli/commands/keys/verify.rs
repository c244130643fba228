use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::api::HttpIdentityProvider;
use crate::auth::verify_and_store;
use crate::environment::Environment;
use crate::error::TinyDbError;
use crate::signal::interrupted;
use crate::ui::prompt_secret;

pub async fn verify_command(env: &mut Environment, key: Option<String>) -> Result<()> {
    // Fail on a missing endpoint before prompting for anything.
    let endpoint = env.endpoint()?;
    info!("Verifying API key against {}", endpoint);

    let raw_key = match key {
        Some(key) => key,
        None => prompt_secret("API key")?,
    };

    let provider = HttpIdentityProvider::new()
        .map_err(TinyDbError::from)
        .context("Failed to build HTTP client")?;

    println!("Verifying key with {}...", endpoint);
    let verified = verify_and_store(env, &provider, &raw_key, interrupted()).await?;

    println!(
        "{} Key verified for tenant '{}' and stored as '{}'",
        "✓".green(),
        verified.tenant_id,
        verified.alias
    );
    if let Some(app_id) = &verified.identity.app_id {
        println!("  Application: {}", app_id);
    }
    println!("  Set as default key and default tenant");
    Ok(())
}
