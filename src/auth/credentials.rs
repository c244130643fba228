use crate::config::mask_secret;

/// What the caller asked for: every field is optional and blank values count as absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRequest {
    pub tenant: Option<String>,
    pub key_alias: Option<String>,
    pub api_key: Option<String>,
    pub app_id: Option<String>,
}

impl CredentialRequest {
    pub fn from_command_line(
        tenant: Option<String>,
        key_alias: Option<String>,
        api_key: Option<String>,
        app_id: Option<String>,
    ) -> Self {
        Self {
            tenant: normalize(tenant),
            key_alias: normalize(key_alias),
            api_key: normalize(api_key),
            app_id: normalize(app_id),
        }
    }

    pub fn for_tenant(tenant: impl Into<String>) -> Self {
        Self::from_command_line(Some(tenant.into()), None, None, None)
    }

    pub fn with_key_alias(mut self, alias: impl Into<String>) -> Self {
        self.key_alias = normalize(Some(alias.into()));
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = normalize(Some(api_key.into()));
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = normalize(Some(app_id.into()));
        self
    }
}

/// Where the resolved key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Raw key passed for this invocation
    Override,
    /// Stored key under this alias
    Stored { alias: String },
}

/// A credential ready to authenticate tenant-scoped requests
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub tenant_id: String,
    pub api_key: String,
    pub app_id: Option<String>,
    pub source: CredentialSource,
}

impl ResolvedCredential {
    pub fn masked_key(&self) -> String {
        mask_secret(&self.api_key)
    }

    pub fn alias(&self) -> Option<&str> {
        match &self.source {
            CredentialSource::Stored { alias } => Some(alias),
            CredentialSource::Override => None,
        }
    }
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("tenant_id", &self.tenant_id)
            .field("api_key", &self.masked_key())
            .field("app_id", &self.app_id)
            .field("source", &self.source)
            .finish()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
