//! Error kinds surfaced by credential resolution, verification and persistence

use std::path::PathBuf;
use thiserror::Error;

pub type TinyDbResult<T> = Result<T, TinyDbError>;

/// Failure talking to the remote service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum TinyDbError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine a configuration directory. Pass --config <path> instead.")]
    NoConfigDirectory,

    #[error("Configuration has not been loaded for this invocation")]
    EnvironmentNotInitialized,

    #[error(
        "No tenant specified. Pass --tenant <id> or run 'tinydb config set default-tenant <id>'."
    )]
    TenantRequired,

    #[error("Tenant '{0}' is not configured locally. Store a key first with 'tinydb keys store {0} <alias>' or pass --api-key.")]
    TenantNotFound(String),

    #[error("Tenant '{0}' has no stored API keys. Store a key first with 'tinydb keys store {0} <alias>' or pass --api-key.")]
    NoStoredKeys(String),

    #[error("No API key selected for tenant '{0}'. Pass --key <alias> or run 'tinydb keys use {0} <alias>'.")]
    NoKeySpecified(String),

    #[error("Key alias '{alias}' not found for tenant '{tenant}'. Run 'tinydb keys list --tenant {tenant}' to see stored aliases.")]
    KeyAliasNotFound { alias: String, tenant: String },

    #[error("The API key resolved for tenant '{0}' is empty. Store the key again or pass --api-key.")]
    EmptyApiKey(String),

    #[error("Endpoint not configured. Run 'tinydb config set endpoint <url>' or pass --endpoint.")]
    EndpointNotConfigured,

    #[error("Admin secret not configured. Run 'tinydb config set admin-secret' or pass --admin-secret.")]
    AdminSecretNotConfigured,

    #[error("API key verification failed: {0}")]
    KeyVerification(#[source] ApiError),

    #[error("Verification response did not include a tenant id")]
    MissingTenantId,

    #[error("The server returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Interrupted before the operation completed")]
    Cancelled,
}

impl TinyDbError {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::EndpointNotConfigured
            | Self::AdminSecretNotConfigured
            | Self::TenantRequired => 2,
            Self::TenantNotFound(_)
            | Self::NoStoredKeys(_)
            | Self::NoKeySpecified(_)
            | Self::KeyAliasNotFound { .. }
            | Self::EmptyApiKey(_) => 3,
            Self::KeyVerification(_) => 4,
            Self::MissingTenantId | Self::MalformedResponse(_) => 5,
            Self::ConfigWrite { .. } | Self::ConfigSerialize(_) | Self::NoConfigDirectory => 6,
            Self::ConfigRead { .. } | Self::ConfigParse { .. } => 7,
            Self::InvalidInput(_) => 64,
            Self::Cancelled => 130,
            Self::EnvironmentNotInitialized => 1,
        }
    }
}

impl From<ApiError> for TinyDbError {
    /// A body that cannot be decoded is a server fault, not a rejected key
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Decode(message) => Self::MalformedResponse(message),
            other => Self::KeyVerification(other),
        }
    }
}

/// Exit code for an error raised anywhere in a command
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TinyDbError>())
        .map(TinyDbError::exit_code)
        .unwrap_or(1)
}
