use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use log::info;

use super::CredentialArgs;
use crate::api::{HttpIdentityProvider, IdentityProvider};
use crate::auth::{CredentialRequest, CredentialSource};
use crate::environment::Environment;
use crate::error::TinyDbError;

#[derive(Args)]
pub struct WhoamiCommands {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Print the server response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn whoami_command(env: &Environment, args: WhoamiCommands) -> Result<()> {
    let endpoint = env.endpoint()?;
    let request = CredentialRequest::from(args.credentials);
    let credential = env.resolve_tenant_credential(&request)?;
    info!("Running whoami for tenant {}", credential.tenant_id);

    let provider = HttpIdentityProvider::new().map_err(TinyDbError::from)?;
    let identity = provider
        .fetch_identity(&endpoint, &credential.api_key)
        .await
        .map_err(TinyDbError::from)
        .with_context(|| format!("whoami failed for tenant '{}'", credential.tenant_id))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&identity).context("Failed to format JSON output")?
        );
        return Ok(());
    }

    let source = match &credential.source {
        CredentialSource::Override => "--api-key".to_string(),
        CredentialSource::Stored { alias } => format!("stored key '{}'", alias),
    };
    println!("Endpoint:     {}", endpoint);
    println!("Credential:   {} ({})", source, credential.masked_key());
    println!(
        "Tenant:       {} {}",
        identity.tenant_id.as_deref().unwrap_or("?").bold(),
        identity
            .tenant_name
            .as_deref()
            .map(|name| format!("({})", name))
            .unwrap_or_default()
    );
    if let Some(app_id) = identity.app_id.as_deref().or(credential.app_id.as_deref()) {
        println!(
            "Application:  {} {}",
            app_id,
            identity
                .app_name
                .as_deref()
                .map(|name| format!("({})", name))
                .unwrap_or_default()
        );
    }
    if let Some(scope) = &identity.scope {
        println!("Scope:        {}", scope);
    }

    if identity
        .tenant_id
        .as_deref()
        .is_some_and(|t| t != credential.tenant_id)
    {
        println!(
            "{} Key belongs to tenant '{}', not '{}'",
            "⚠".yellow(),
            identity.tenant_id.as_deref().unwrap_or_default(),
            credential.tenant_id
        );
    }
    Ok(())
}
