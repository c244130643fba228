//! Per-invocation session: the loaded configuration, where it lives, and the
//! overrides passed on the command line for this run only.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::auth::{self, CredentialRequest, ResolvedCredential};
use crate::config::{self, Config, KeyEntry, KeyRemoval, require_identifier};
use crate::error::{TinyDbError, TinyDbResult};

/// Values that apply to this invocation and are never persisted
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub admin_secret: Option<String>,
}

#[derive(Debug, Default)]
pub struct Environment {
    config_path: Option<PathBuf>,
    config: Option<Config>,
    overrides: Overrides,
}

impl Environment {
    /// An environment with nothing loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration from `path`, or from the default location
    pub fn load(path: Option<PathBuf>) -> TinyDbResult<Self> {
        let path = match path {
            Some(path) => path,
            None => config::default_path()?,
        };
        let config = Config::load(&path)?;
        Ok(Self::from_config(config, Some(path)))
    }

    pub fn from_config(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            config: Some(config),
            overrides: Overrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = Overrides {
            endpoint: overrides.endpoint.filter(|e| !e.trim().is_empty()),
            admin_secret: overrides.admin_secret.filter(|s| !s.trim().is_empty()),
        };
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn require_loaded(&self) -> TinyDbResult<&Config> {
        self.config
            .as_ref()
            .ok_or(TinyDbError::EnvironmentNotInitialized)
    }

    /// Endpoint for this invocation: override, then configured value
    pub fn endpoint(&self) -> TinyDbResult<String> {
        if let Some(endpoint) = &self.overrides.endpoint {
            return Ok(endpoint.trim().trim_end_matches('/').to_string());
        }
        let config = self.require_loaded()?;
        match config.endpoint.trim() {
            "" => Err(TinyDbError::EndpointNotConfigured),
            endpoint => Ok(endpoint.trim_end_matches('/').to_string()),
        }
    }

    /// Admin secret for this invocation: override, then configured value
    pub fn admin_secret(&self) -> TinyDbResult<String> {
        if let Some(secret) = &self.overrides.admin_secret {
            return Ok(secret.clone());
        }
        let config = self.require_loaded()?;
        if config.admin_secret.is_empty() {
            return Err(TinyDbError::AdminSecretNotConfigured);
        }
        Ok(config.admin_secret.clone())
    }

    pub fn resolve_tenant_credential(
        &self,
        request: &CredentialRequest,
    ) -> TinyDbResult<ResolvedCredential> {
        auth::resolve_tenant_client_credential(self.require_loaded()?, request)
    }

    /// Writes the current configuration to `config_path`, falling back to the default path
    pub fn save(&mut self) -> TinyDbResult<()> {
        let config = self.require_loaded()?.clone();
        self.persist(&config)
    }

    fn persist(&mut self, config: &Config) -> TinyDbResult<()> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => config::default_path()?,
        };
        config.save(&path)?;
        self.config_path = Some(path);
        Ok(())
    }

    /// Applies `mutate` to a copy of the configuration and saves it.
    /// The in-memory configuration only changes once the write succeeded.
    pub fn update<T>(
        &mut self,
        mutate: impl FnOnce(&mut Config) -> TinyDbResult<T>,
    ) -> TinyDbResult<T> {
        let mut candidate = self.require_loaded()?.clone();
        let outcome = mutate(&mut candidate)?;
        self.persist(&candidate)?;
        self.config = Some(candidate);
        Ok(outcome)
    }

    pub fn set_endpoint(&mut self, endpoint: &str) -> TinyDbResult<()> {
        let endpoint = validate_endpoint(endpoint)?;
        info!("Setting endpoint to {}", endpoint);
        self.update(|config| {
            config.endpoint = endpoint;
            Ok(())
        })
    }

    pub fn set_admin_secret(&mut self, secret: &str) -> TinyDbResult<()> {
        let secret = require_identifier("admin secret", secret)?.to_string();
        info!("Setting admin secret");
        self.update(|config| {
            config.admin_secret = secret;
            Ok(())
        })
    }

    pub fn set_default_tenant(&mut self, tenant_id: &str) -> TinyDbResult<()> {
        let tenant_id = require_identifier("tenant id", tenant_id)?.to_string();
        info!("Setting default tenant to {}", tenant_id);
        self.update(|config| {
            config.default_tenant = Some(tenant_id);
            Ok(())
        })
    }

    pub fn clear_endpoint(&mut self) -> TinyDbResult<()> {
        self.update(|config| {
            config.endpoint.clear();
            Ok(())
        })
    }

    pub fn clear_admin_secret(&mut self) -> TinyDbResult<()> {
        self.update(|config| {
            config.admin_secret.clear();
            Ok(())
        })
    }

    pub fn clear_default_tenant(&mut self) -> TinyDbResult<()> {
        self.update(|config| {
            config.default_tenant = None;
            Ok(())
        })
    }

    pub fn store_key(
        &mut self,
        tenant_id: &str,
        alias: &str,
        entry: KeyEntry,
        set_default: bool,
    ) -> TinyDbResult<()> {
        debug!(
            "Storing key '{}' for tenant {} (default: {})",
            alias, tenant_id, set_default
        );
        self.update(|config| config.upsert_key(tenant_id, alias, entry, set_default))
    }

    pub fn set_default_key(&mut self, tenant_id: &str, alias: &str) -> TinyDbResult<()> {
        self.update(|config| config.set_default_key(tenant_id, alias))
    }

    pub fn delete_key(
        &mut self,
        tenant_id: &str,
        alias: &str,
        prune_empty: bool,
    ) -> TinyDbResult<KeyRemoval> {
        debug!("Deleting key '{}' for tenant {}", alias, tenant_id);
        self.update(|config| config.remove_key(tenant_id, alias, prune_empty))
    }

    /// Returns whether the removed tenant was the default tenant
    pub fn remove_tenant(&mut self, tenant_id: &str) -> TinyDbResult<bool> {
        self.update(|config| config.remove_tenant(tenant_id))
    }
}

fn validate_endpoint(endpoint: &str) -> TinyDbResult<String> {
    let endpoint = endpoint.trim();
    let url = reqwest::Url::parse(endpoint)
        .map_err(|e| TinyDbError::InvalidInput(format!("invalid endpoint '{}': {}", endpoint, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TinyDbError::InvalidInput(format!(
            "endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}
