use super::config_with_two_keys;
use tinydb_cli::auth::{
    CredentialRequest, CredentialSource, resolve_key, resolve_tenant_client_credential,
};
use tinydb_cli::config::{Config, KeyEntry, TenantProfile};
use tinydb_cli::error::TinyDbError;

#[test]
fn test_default_key_used_without_alias() {
    let config = config_with_two_keys();
    assert_eq!(resolve_key(&config, "t1", "").unwrap().key, "secret-a");
}

#[test]
fn test_alias_overrides_default_key() {
    let config = config_with_two_keys();
    assert_eq!(resolve_key(&config, "t1", "b").unwrap().key, "secret-b");
}

#[test]
fn test_raw_override_beats_alias_and_default() {
    let config = config_with_two_keys();

    for alias in [None, Some("a"), Some("b"), Some("missing")] {
        let mut request = CredentialRequest::for_tenant("t1").with_api_key("raw-override");
        if let Some(alias) = alias {
            request = request.with_key_alias(alias);
        }
        let credential = resolve_tenant_client_credential(&config, &request).unwrap();
        assert_eq!(credential.api_key, "raw-override");
        assert_eq!(credential.source, CredentialSource::Override);
    }
}

#[test]
fn test_unknown_tenant_is_tenant_not_found() {
    let config = config_with_two_keys();
    assert!(matches!(
        resolve_key(&config, "nope", "a"),
        Err(TinyDbError::TenantNotFound(t)) if t == "nope"
    ));
}

#[test]
fn test_no_alias_and_no_default_is_no_key_specified() {
    let mut config = config_with_two_keys();
    config.tenants.get_mut("t1").unwrap().default_key.clear();

    assert!(matches!(
        resolve_key(&config, "t1", ""),
        Err(TinyDbError::NoKeySpecified(t)) if t == "t1"
    ));
}

#[test]
fn test_tenant_without_keys_is_no_stored_keys() {
    let mut config = Config::default();
    config
        .tenants
        .insert("t2".to_string(), TenantProfile::default());

    assert!(matches!(
        resolve_key(&config, "t2", "a"),
        Err(TinyDbError::NoStoredKeys(t)) if t == "t2"
    ));
}

#[test]
fn test_unknown_alias_names_alias_and_tenant() {
    let config = config_with_two_keys();
    let err = resolve_key(&config, "t1", "zzz").unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, TinyDbError::KeyAliasNotFound { .. }));
    assert!(message.contains("zzz"));
    assert!(message.contains("t1"));
}

#[test]
fn test_tenant_required_without_flag_or_default() {
    let config = config_with_two_keys();
    let request = CredentialRequest::default().with_api_key("raw");

    assert!(matches!(
        resolve_tenant_client_credential(&config, &request),
        Err(TinyDbError::TenantRequired)
    ));
}

#[test]
fn test_default_tenant_used_when_flag_missing() {
    let mut config = config_with_two_keys();
    config.default_tenant = Some("t1".to_string());

    let credential =
        resolve_tenant_client_credential(&config, &CredentialRequest::default()).unwrap();

    assert_eq!(credential.tenant_id, "t1");
    assert_eq!(credential.api_key, "secret-a");
    assert_eq!(credential.alias(), Some("a"));
}

#[test]
fn test_explicit_tenant_beats_default_tenant() {
    let mut config = config_with_two_keys();
    config.default_tenant = Some("t1".to_string());
    config
        .upsert_key("t9", "main", KeyEntry::new("secret-t9"), false)
        .unwrap();

    let request = CredentialRequest::for_tenant("t9").with_key_alias("main");
    let credential = resolve_tenant_client_credential(&config, &request).unwrap();

    assert_eq!(credential.tenant_id, "t9");
    assert_eq!(credential.api_key, "secret-t9");
}

#[test]
fn test_raw_override_works_for_tenant_without_local_config() {
    let config = Config::default();
    let request = CredentialRequest::for_tenant("remote-only").with_api_key("raw-key");

    let credential = resolve_tenant_client_credential(&config, &request).unwrap();

    assert_eq!(credential.tenant_id, "remote-only");
    assert_eq!(credential.api_key, "raw-key");
    assert_eq!(credential.app_id, None);
}

#[test]
fn test_stored_app_scope_is_inferred() {
    let config = config_with_two_keys();
    let request = CredentialRequest::for_tenant("t1");

    let credential = resolve_tenant_client_credential(&config, &request).unwrap();

    assert_eq!(credential.app_id.as_deref(), Some("app-a"));
}

#[test]
fn test_explicit_app_scope_wins_over_stored() {
    let config = config_with_two_keys();
    let request = CredentialRequest::for_tenant("t1").with_app_id("app-explicit");

    let credential = resolve_tenant_client_credential(&config, &request).unwrap();

    assert_eq!(credential.app_id.as_deref(), Some("app-explicit"));
}

#[test]
fn test_blank_stored_key_is_empty_api_key() {
    let mut config = config_with_two_keys();
    config
        .tenants
        .get_mut("t1")
        .unwrap()
        .keys
        .insert("blank".to_string(), KeyEntry::new(""));

    let request = CredentialRequest::for_tenant("t1").with_key_alias("blank");
    assert!(matches!(
        resolve_tenant_client_credential(&config, &request),
        Err(TinyDbError::EmptyApiKey(t)) if t == "t1"
    ));
}

#[test]
fn test_blank_raw_override_falls_back_to_stored_key() {
    let config = config_with_two_keys();
    let request = CredentialRequest::from_command_line(
        Some("t1".to_string()),
        None,
        Some("   ".to_string()),
        None,
    );

    let credential = resolve_tenant_client_credential(&config, &request).unwrap();

    assert_eq!(credential.api_key, "secret-a");
}
