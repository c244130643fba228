use clap::Args;

use crate::auth::CredentialRequest;

/// Flags selecting the tenant credential for a command
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Tenant id (defaults to the configured default tenant)
    #[arg(long, env = "TINYDB_TENANT")]
    pub tenant: Option<String>,

    /// Alias of a stored key (defaults to the tenant's default key)
    #[arg(long = "key")]
    pub key_alias: Option<String>,

    /// Raw API key; takes priority over any stored key
    #[arg(long, env = "TINYDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Application scope (defaults to the stored key's application)
    #[arg(long)]
    pub app_id: Option<String>,
}

impl From<CredentialArgs> for CredentialRequest {
    fn from(args: CredentialArgs) -> Self {
        CredentialRequest::from_command_line(args.tenant, args.key_alias, args.api_key, args.app_id)
    }
}
