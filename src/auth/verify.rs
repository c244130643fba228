//! Trust-on-first-use enrollment of a raw API key.
//!
//! The key is checked against the identity endpoint; on success it is stored
//! under a derived alias and promoted to the tenant's default key.

use log::{debug, info};
use std::future::Future;

use crate::api::{Identity, IdentityProvider};
use crate::config::KeyEntry;
use crate::environment::Environment;
use crate::error::{TinyDbError, TinyDbResult};

pub const FALLBACK_ALIAS: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedKey {
    pub tenant_id: String,
    pub alias: String,
    pub identity: Identity,
}

/// Alias for a verified key: key prefix, else application id, else `"default"`
pub fn derive_alias(identity: &Identity) -> String {
    non_blank(&identity.key_prefix)
        .or_else(|| non_blank(&identity.app_id))
        .unwrap_or(FALLBACK_ALIAS)
        .to_string()
}

/// Stored entry for a verified key; the description falls back from application name to scope
pub fn entry_from_identity(raw_key: &str, identity: &Identity) -> KeyEntry {
    KeyEntry {
        key: raw_key.to_string(),
        prefix: non_blank(&identity.key_prefix).map(str::to_string),
        app_id: non_blank(&identity.app_id).map(str::to_string),
        description: non_blank(&identity.app_name)
            .or_else(|| non_blank(&identity.scope))
            .map(str::to_string),
    }
}

/// Verifies `raw_key` with the server and stores it as the tenant's default key.
///
/// If `cancel` completes before the server answers, nothing is written.
pub async fn verify_and_store<C>(
    env: &mut Environment,
    provider: &dyn IdentityProvider,
    raw_key: &str,
    cancel: C,
) -> TinyDbResult<VerifiedKey>
where
    C: Future<Output = ()>,
{
    let endpoint = env.endpoint()?;
    let raw_key = raw_key.trim();
    if raw_key.is_empty() {
        return Err(TinyDbError::InvalidInput("API key must not be empty".to_string()));
    }

    debug!("Verifying API key against {}", endpoint);
    let identity = tokio::select! {
        result = provider.fetch_identity(&endpoint, raw_key) => {
            result.map_err(TinyDbError::from)?
        }
        () = cancel => return Err(TinyDbError::Cancelled),
    };

    let tenant_id = non_blank(&identity.tenant_id)
        .ok_or(TinyDbError::MissingTenantId)?
        .to_string();
    let alias = derive_alias(&identity);
    let entry = entry_from_identity(raw_key, &identity);
    let tenant_name = non_blank(&identity.tenant_name).map(str::to_string);

    env.update(|config| {
        config.upsert_key(&tenant_id, &alias, entry, true)?;
        if let Some(profile) = config.tenants.get_mut(&tenant_id) {
            if profile.name.is_none() {
                profile.name = tenant_name;
            }
        }
        Ok(())
    })?;

    info!("Stored verified key for tenant {} as '{}'", tenant_id, alias);
    Ok(VerifiedKey {
        tenant_id,
        alias,
        identity,
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
