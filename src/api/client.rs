use log::debug;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;

use super::constants::{self, headers};
use crate::auth::ResolvedCredential;
use crate::error::ApiError;

const MAX_ERROR_MESSAGE_LEN: usize = 200;

/// How a request authenticates
#[derive(Debug, Clone)]
pub enum Authorization {
    /// Administrative secret
    Admin(String),
    /// Tenant API key plus optional application scope
    Tenant(ResolvedCredential),
}

/// Authenticated client for one TinyDB endpoint
pub struct TinyDbClient {
    base_url: String,
    http_client: reqwest::Client,
    authorization: Authorization,
}

impl TinyDbClient {
    pub fn new(endpoint: &str, authorization: Authorization) -> Result<Self, ApiError> {
        Ok(Self::with_http_client(
            endpoint,
            authorization,
            build_http_client()?,
        ))
    }

    pub fn with_http_client(
        endpoint: &str,
        authorization: Authorization,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            http_client,
            authorization,
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.authorization {
            Authorization::Admin(secret) => request.header(headers::ADMIN_SECRET, secret),
            Authorization::Tenant(credential) => {
                let request = request.header(headers::API_KEY, &credential.api_key);
                match &credential.app_id {
                    Some(app_id) => request.header(headers::APP_ID, app_id),
                    None => request,
                }
            }
        }
    }

    /// Sends an authenticated request and returns the decoded JSON body (`null` when empty)
    pub async fn execute_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.authorize(self.http_client.request(method, &url));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        read_json(response).await
    }
}

/// HTTP client shared by every request of one invocation
pub fn build_http_client() -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .timeout(constants::REQUEST_TIMEOUT)
        .connect_timeout(constants::CONNECT_TIMEOUT)
        .user_agent(constants::user_agent())
        .build()?;
    Ok(client)
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub(crate) async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    debug!("Response status: {}", status);

    let text = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&text),
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pulls a readable message out of an error body
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error", "detail"] {
            if let Some(message) = obj.get(field).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_MESSAGE_LEN).collect()
}
