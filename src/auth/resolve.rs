//! Turns a credential request into the key to send.
//!
//! Tenant axis: explicit tenant > configured default tenant.
//! Credential axis: raw key override > named alias > tenant default key.
//! Both axes are resolved independently; a raw key still needs a tenant.

use log::debug;

use super::credentials::{CredentialRequest, CredentialSource, ResolvedCredential};
use crate::config::{Config, KeyEntry};
use crate::error::{TinyDbError, TinyDbResult};

/// Looks up the stored key for `tenant_id`, using `key_alias` or else the tenant's default key
pub fn resolve_key<'a>(
    config: &'a Config,
    tenant_id: &str,
    key_alias: &str,
) -> TinyDbResult<&'a KeyEntry> {
    let profile = config
        .tenant(tenant_id)
        .ok_or_else(|| TinyDbError::TenantNotFound(tenant_id.to_string()))?;

    if profile.keys.is_empty() {
        return Err(TinyDbError::NoStoredKeys(tenant_id.to_string()));
    }

    let alias = match key_alias.trim() {
        "" => profile.default_key.trim(),
        explicit => explicit,
    };
    if alias.is_empty() {
        return Err(TinyDbError::NoKeySpecified(tenant_id.to_string()));
    }

    // The default alias may point at a key deleted by hand.
    profile
        .keys
        .get(alias)
        .ok_or_else(|| TinyDbError::KeyAliasNotFound {
            alias: alias.to_string(),
            tenant: tenant_id.to_string(),
        })
}

pub fn resolve_tenant(config: &Config, tenant_override: Option<&str>) -> TinyDbResult<String> {
    tenant_override
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| config.default_tenant())
        .map(str::to_string)
        .ok_or(TinyDbError::TenantRequired)
}

pub fn resolve_tenant_client_credential(
    config: &Config,
    request: &CredentialRequest,
) -> TinyDbResult<ResolvedCredential> {
    let tenant_id = resolve_tenant(config, request.tenant.as_deref())?;

    let (entry, source) = match request.api_key.as_deref() {
        Some(raw) => (KeyEntry::new(raw), CredentialSource::Override),
        None => {
            let alias_arg = request.key_alias.as_deref().map(str::trim).unwrap_or_default();
            let entry = resolve_key(config, &tenant_id, alias_arg)?;
            let alias = match alias_arg {
                "" => config
                    .tenant(&tenant_id)
                    .map(|p| p.default_key.trim().to_string())
                    .unwrap_or_default(),
                explicit => explicit.to_string(),
            };
            (entry.clone(), CredentialSource::Stored { alias })
        }
    };

    if entry.key.trim().is_empty() {
        return Err(TinyDbError::EmptyApiKey(tenant_id));
    }

    // An explicit --app-id always wins; a stored key's app only fills the gap.
    let app_id = request
        .app_id
        .clone()
        .or_else(|| entry.app_id.clone().filter(|a| !a.is_empty()));

    debug!(
        "Resolved credential for tenant {} via {:?} (app scope: {:?})",
        tenant_id, source, app_id
    );

    Ok(ResolvedCredential {
        tenant_id,
        api_key: entry.key,
        app_id,
        source,
    })
}
