//! Credential resolution and key verification

pub mod credentials;
pub mod resolve;
pub mod verify;

pub use credentials::{CredentialRequest, CredentialSource, ResolvedCredential};
pub use resolve::{resolve_key, resolve_tenant, resolve_tenant_client_credential};
pub use verify::{VerifiedKey, derive_alias, verify_and_store};
