use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;
use reqwest::Method;

use super::CredentialArgs;
use crate::api::{Authorization, TinyDbClient};
use crate::auth::CredentialRequest;
use crate::environment::Environment;

#[derive(Args)]
pub struct RequestCommands {
    /// API path (e.g., "/v1/collections")
    pub path: String,

    /// HTTP method
    #[arg(long, default_value = "get")]
    pub method: HttpMethod,

    /// Request body (JSON string)
    #[arg(long)]
    pub data: Option<String>,

    /// Authenticate with the admin secret instead of a tenant key
    #[arg(long)]
    pub admin: bool,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

pub async fn request_command(env: &Environment, args: RequestCommands) -> Result<()> {
    let endpoint = env.endpoint()?;

    let authorization = if args.admin {
        Authorization::Admin(env.admin_secret()?)
    } else {
        let request = CredentialRequest::from(args.credentials);
        Authorization::Tenant(env.resolve_tenant_credential(&request)?)
    };

    let body = match args.data.as_deref() {
        Some(data) => Some(
            serde_json::from_str::<serde_json::Value>(data)
                .context("--data is not valid JSON")?,
        ),
        None => None,
    };
    if body.is_some() && matches!(args.method, HttpMethod::Get | HttpMethod::Delete) {
        anyhow::bail!("--data is only valid with POST, PUT or PATCH");
    }

    info!("{:?} {}", args.method, args.path);
    let client = TinyDbClient::new(&endpoint, authorization)?;
    let result = client
        .execute_raw(args.method.into(), &args.path, body.as_ref())
        .await
        .with_context(|| format!("{:?} {} failed", args.method, args.path))?;

    let output = if args.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .context("Failed to format JSON output")?;
    println!("{}", output);
    Ok(())
}
