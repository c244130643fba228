use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{TinyDbError, TinyDbResult};

pub mod paths;

pub use paths::default_path;

const MASK_CHAR: char = '*';

/// A stored API key for a tenant
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeyEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Non-secret label for listings: the server-assigned prefix if known, else the masked key
    pub fn display_key(&self) -> String {
        match self.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{}…", prefix),
            None => mask_secret(&self.key),
        }
    }
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("key", &mask_secret(&self.key))
            .field("prefix", &self.prefix)
            .field("app_id", &self.app_id)
            .field("description", &self.description)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TenantProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_key: String,
    #[serde(default)]
    pub keys: BTreeMap<String, KeyEntry>,
}

impl TenantProfile {
    /// Human label, falling back to the tenant id
    pub fn display_name<'a>(&'a self, tenant_id: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(tenant_id)
    }

    /// True when the profile carries nothing worth keeping
    pub fn is_empty_shell(&self) -> bool {
        self.keys.is_empty() && self.default_key.is_empty() && self.name.is_none()
    }
}

/// Outcome of removing a stored key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyRemoval {
    pub default_cleared: bool,
    pub tenant_removed: bool,
    pub default_tenant_cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub admin_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tenant: Option<String>,
    pub tenants: BTreeMap<String, TenantProfile>,
}

impl Config {
    pub fn load(path: &Path) -> TinyDbResult<Self> {
        debug!("Loading config from: {:?}", path);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Config file doesn't exist, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(TinyDbError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| TinyDbError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config with {} tenants", config.tenants.len());
        Ok(config)
    }

    /// Writes the configuration with owner-only permissions, replacing the file in one rename
    pub fn save(&self, path: &Path) -> TinyDbResult<()> {
        debug!("Saving config to: {:?}", path);

        let content = toml::to_string_pretty(self)?;
        let write_err = |source: std::io::Error| TinyDbError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = temp_path_for(path);
        let result = write_private(&temp_path, content.as_bytes())
            .and_then(|()| fs::rename(&temp_path, path));
        if let Err(source) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(source));
        }

        info!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn tenant(&self, tenant_id: &str) -> Option<&TenantProfile> {
        self.tenants.get(tenant_id)
    }

    pub fn default_tenant(&self) -> Option<&str> {
        self.default_tenant.as_deref().filter(|t| !t.is_empty())
    }

    pub fn masked_admin_secret(&self) -> String {
        mask_secret(&self.admin_secret)
    }

    /// Inserts or replaces `alias` under `tenant_id`, creating the tenant profile if needed.
    /// With `set_default` the alias becomes the tenant's default key and the tenant becomes the default tenant.
    pub fn upsert_key(
        &mut self,
        tenant_id: &str,
        alias: &str,
        entry: KeyEntry,
        set_default: bool,
    ) -> TinyDbResult<()> {
        let tenant_id = require_identifier("tenant id", tenant_id)?;
        let alias = require_identifier("key alias", alias)?;
        if entry.key.trim().is_empty() {
            return Err(TinyDbError::EmptyApiKey(tenant_id.to_string()));
        }

        let profile = self.tenants.entry(tenant_id.to_string()).or_default();
        profile.keys.insert(alias.to_string(), entry);
        if set_default {
            profile.default_key = alias.to_string();
            self.default_tenant = Some(tenant_id.to_string());
        }
        Ok(())
    }

    pub fn set_default_key(&mut self, tenant_id: &str, alias: &str) -> TinyDbResult<()> {
        let tenant_id = require_identifier("tenant id", tenant_id)?;
        let alias = require_identifier("key alias", alias)?;
        let profile = self
            .tenants
            .get_mut(tenant_id)
            .ok_or_else(|| TinyDbError::TenantNotFound(tenant_id.to_string()))?;
        if !profile.keys.contains_key(alias) {
            return Err(TinyDbError::KeyAliasNotFound {
                alias: alias.to_string(),
                tenant: tenant_id.to_string(),
            });
        }
        profile.default_key = alias.to_string();
        Ok(())
    }

    /// Removes a stored key and clears any default that pointed at it.
    /// With `prune_empty` a tenant left with no keys, name or default is removed as well.
    pub fn remove_key(
        &mut self,
        tenant_id: &str,
        alias: &str,
        prune_empty: bool,
    ) -> TinyDbResult<KeyRemoval> {
        let tenant_id = require_identifier("tenant id", tenant_id)?;
        let alias = require_identifier("key alias", alias)?;
        let profile = self
            .tenants
            .get_mut(tenant_id)
            .ok_or_else(|| TinyDbError::TenantNotFound(tenant_id.to_string()))?;
        if profile.keys.remove(alias).is_none() {
            return Err(TinyDbError::KeyAliasNotFound {
                alias: alias.to_string(),
                tenant: tenant_id.to_string(),
            });
        }

        let mut removal = KeyRemoval::default();
        if profile.default_key == alias {
            profile.default_key.clear();
            removal.default_cleared = true;
        }

        if prune_empty && profile.is_empty_shell() {
            removal.default_tenant_cleared = self.drop_tenant(tenant_id);
            removal.tenant_removed = true;
        }
        Ok(removal)
    }

    /// Removes a tenant profile; returns whether `default_tenant` was cleared
    pub fn remove_tenant(&mut self, tenant_id: &str) -> TinyDbResult<bool> {
        let tenant_id = require_identifier("tenant id", tenant_id)?;
        if !self.tenants.contains_key(tenant_id) {
            return Err(TinyDbError::TenantNotFound(tenant_id.to_string()));
        }
        Ok(self.drop_tenant(tenant_id))
    }

    fn drop_tenant(&mut self, tenant_id: &str) -> bool {
        self.tenants.remove(tenant_id);
        if self.default_tenant.as_deref() == Some(tenant_id) {
            self.default_tenant = None;
            return true;
        }
        false
    }
}

/// Masks all but the first and last three characters; six characters or fewer are fully masked
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        return MASK_CHAR.to_string().repeat(chars.len());
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!(
        "{}{}{}",
        head,
        MASK_CHAR.to_string().repeat(chars.len() - 6),
        tail
    )
}

pub(crate) fn require_identifier<'a>(what: &str, value: &'a str) -> TinyDbResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TinyDbError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(value)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config.toml".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.create(true).write(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
