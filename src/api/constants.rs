//! Wire-level constants for the TinyDB HTTP API

use std::time::Duration;

/// Client-side timeout for every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection establishment timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity introspection path, relative to the endpoint
pub const WHOAMI_PATH: &str = "/v1/auth/whoami";

pub fn user_agent() -> String {
    format!("tinydb-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Request headers understood by the TinyDB API
pub mod headers {
    /// Tenant API key
    pub const API_KEY: &str = "X-API-Key";

    /// Application scope for a tenant key
    pub const APP_ID: &str = "X-App-ID";

    /// Administrative secret
    pub const ADMIN_SECRET: &str = "X-Admin-Secret";
}
