use super::{fresh_environment, reload};
use tinydb_cli::auth::{CredentialRequest, CredentialSource};
use tinydb_cli::config::KeyEntry;
use tinydb_cli::environment::Environment;
use tinydb_cli::error::TinyDbError;

#[test]
fn test_endpoint_required_until_configured() {
    let (_dir, path, mut env) = fresh_environment();

    assert!(matches!(
        env.endpoint(),
        Err(TinyDbError::EndpointNotConfigured)
    ));

    env.set_endpoint("https://example.test").unwrap();

    assert_eq!(env.endpoint().unwrap(), "https://example.test");
    let reopened = Environment::load(Some(path)).unwrap();
    assert_eq!(reopened.endpoint().unwrap(), "https://example.test");
}

#[test]
fn test_store_default_key_then_resolve_without_flags() {
    let (_dir, path, mut env) = fresh_environment();

    env.store_key("tenant_1", "primary", KeyEntry::new("SECRET"), true)
        .unwrap();
    let credential = env
        .resolve_tenant_credential(&CredentialRequest::default())
        .unwrap();

    assert_eq!(credential.tenant_id, "tenant_1");
    assert_eq!(credential.api_key, "SECRET");
    assert_eq!(
        credential.source,
        CredentialSource::Stored {
            alias: "primary".to_string()
        }
    );

    // Same answer from a later invocation.
    let reopened = Environment::load(Some(path.clone())).unwrap();
    let again = reopened
        .resolve_tenant_credential(&CredentialRequest::default())
        .unwrap();
    assert_eq!(again, credential);
    assert_eq!(reload(&path).default_tenant.as_deref(), Some("tenant_1"));
}

#[test]
fn test_default_tenant_without_keys_needs_raw_key() {
    let (_dir, _path, mut env) = fresh_environment();
    env.set_default_tenant("remote").unwrap();

    assert!(matches!(
        env.resolve_tenant_credential(&CredentialRequest::default()),
        Err(TinyDbError::TenantNotFound(t)) if t == "remote"
    ));

    let credential = env
        .resolve_tenant_credential(&CredentialRequest::default().with_api_key("raw-key"))
        .unwrap();
    assert_eq!(credential.tenant_id, "remote");
    assert_eq!(credential.api_key, "raw-key");
}

#[test]
fn test_deleted_default_alias_requires_explicit_key() {
    let (_dir, _path, mut env) = fresh_environment();
    env.store_key("tenant_1", "primary", KeyEntry::new("SECRET"), true)
        .unwrap();
    env.store_key("tenant_1", "backup", KeyEntry::new("BACKUP"), false)
        .unwrap();
    env.delete_key("tenant_1", "primary", true).unwrap();

    assert!(matches!(
        env.resolve_tenant_credential(&CredentialRequest::default()),
        Err(TinyDbError::NoKeySpecified(_))
    ));
    let credential = env
        .resolve_tenant_credential(&CredentialRequest::default().with_key_alias("backup"))
        .unwrap();
    assert_eq!(credential.api_key, "BACKUP");
}
