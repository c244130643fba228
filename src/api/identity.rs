//! Identity introspection: asks the server who a raw API key belongs to

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::client::{build_http_client, join_url, read_json};
use super::constants::{WHOAMI_PATH, headers};
use crate::error::ApiError;

/// The server's view of an API key. Only `tenant_id` is required to be meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, alias = "tenantId")]
    pub tenant_id: Option<String>,
    #[serde(default, alias = "tenantName")]
    pub tenant_name: Option<String>,
    #[serde(default, alias = "appId")]
    pub app_id: Option<String>,
    #[serde(default, alias = "appName")]
    pub app_name: Option<String>,
    #[serde(default, alias = "keyPrefix")]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn fetch_identity(&self, endpoint: &str, api_key: &str) -> Result<Identity, ApiError>;
}

pub struct HttpIdentityProvider {
    http_client: reqwest::Client,
}

impl HttpIdentityProvider {
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_http_client(build_http_client()?))
    }

    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn fetch_identity(&self, endpoint: &str, api_key: &str) -> Result<Identity, ApiError> {
        let url = join_url(endpoint, WHOAMI_PATH);
        debug!("Requesting identity from {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(headers::API_KEY, api_key)
            .send()
            .await?;

        let body = read_json(response).await?;
        if body.is_null() {
            return Ok(Identity::default());
        }
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
