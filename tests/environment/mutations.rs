use super::{fresh_environment, reload};
use tinydb_cli::config::{Config, KeyEntry};
use tinydb_cli::environment::{Environment, Overrides};
use tinydb_cli::error::TinyDbError;

#[test]
fn test_load_missing_file_gives_empty_loaded_environment() {
    let (_dir, path, env) = fresh_environment();

    assert_eq!(env.config_path(), Some(path.as_path()));
    assert_eq!(env.require_loaded().unwrap(), &Config::default());
}

#[test]
fn test_unloaded_environment_refuses_mutation() {
    let mut env = Environment::new();

    assert!(matches!(
        env.set_default_tenant("t1"),
        Err(TinyDbError::EnvironmentNotInitialized)
    ));
    assert!(matches!(env.save(), Err(TinyDbError::EnvironmentNotInitialized)));
}

#[test]
fn test_save_writes_to_config_path() {
    let (_dir, path, mut env) = fresh_environment();

    env.save().unwrap();

    assert!(path.exists());
    assert_eq!(reload(&path), Config::default());
}

#[test]
fn test_set_endpoint_under_override_persists_new_value() {
    let (_dir, path, env) = fresh_environment();
    let mut env = env.with_overrides(Overrides {
        endpoint: Some("https://override.test".to_string()),
        admin_secret: None,
    });

    env.set_endpoint("https://saved.test/").unwrap();

    assert_eq!(env.require_loaded().unwrap().endpoint, "https://saved.test");
    assert_eq!(env.endpoint().unwrap(), "https://override.test");
    assert_eq!(reload(&path).endpoint, "https://saved.test");
}

#[test]
fn test_store_key_persists() {
    let (_dir, path, mut env) = fresh_environment();

    env.store_key("t1", "primary", KeyEntry::new("secret-1"), false)
        .unwrap();

    let on_disk = reload(&path);
    assert_eq!(on_disk.tenants["t1"].keys["primary"].key, "secret-1");
    assert_eq!(on_disk.tenants["t1"].default_key, "");
    assert_eq!(on_disk.default_tenant, None);
}

#[test]
fn test_store_key_rejects_blank_identifiers() {
    let (_dir, path, mut env) = fresh_environment();

    assert!(matches!(
        env.store_key(" ", "primary", KeyEntry::new("secret"), false),
        Err(TinyDbError::InvalidInput(_))
    ));
    assert!(matches!(
        env.store_key("t1", "", KeyEntry::new("secret"), false),
        Err(TinyDbError::InvalidInput(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_deleting_default_alias_clears_default() {
    let (_dir, path, mut env) = fresh_environment();
    env.store_key("t1", "p", KeyEntry::new("entry-1"), true).unwrap();
    env.store_key("t1", "q", KeyEntry::new("entry-2"), false).unwrap();

    let removal = env.delete_key("t1", "p", true).unwrap();

    assert!(removal.default_cleared);
    assert!(!removal.tenant_removed);
    let profile = env.require_loaded().unwrap().tenant("t1").unwrap().clone();
    assert_eq!(profile.default_key, "");
    assert!(profile.keys.contains_key("q"));
    assert_eq!(reload(&path).tenants["t1"], profile);
}

#[test]
fn test_deleting_other_alias_keeps_default() {
    let (_dir, _path, mut env) = fresh_environment();
    env.store_key("t1", "p", KeyEntry::new("entry-1"), true).unwrap();
    env.store_key("t1", "q", KeyEntry::new("entry-2"), false).unwrap();

    let removal = env.delete_key("t1", "q", true).unwrap();

    assert!(!removal.default_cleared);
    assert_eq!(env.require_loaded().unwrap().tenants["t1"].default_key, "p");
}

#[test]
fn test_deleting_last_key_prunes_tenant_and_default_tenant() {
    let (_dir, path, mut env) = fresh_environment();
    env.store_key("t1", "only", KeyEntry::new("entry-1"), true).unwrap();

    let removal = env.delete_key("t1", "only", true).unwrap();

    assert!(removal.tenant_removed);
    assert!(removal.default_tenant_cleared);
    let on_disk = reload(&path);
    assert!(on_disk.tenants.is_empty());
    assert_eq!(on_disk.default_tenant, None);
}

#[test]
fn test_named_tenant_survives_losing_its_last_key() {
    let (_dir, _path, mut env) = fresh_environment();
    env.store_key("t1", "only", KeyEntry::new("entry-1"), true).unwrap();
    env.update(|config| {
        config.tenants.get_mut("t1").unwrap().name = Some("Acme".to_string());
        Ok(())
    })
    .unwrap();

    let removal = env.delete_key("t1", "only", true).unwrap();

    assert!(!removal.tenant_removed);
    let config = env.require_loaded().unwrap();
    assert!(config.tenant("t1").is_some());
    assert_eq!(config.default_tenant(), Some("t1"));
}

#[test]
fn test_delete_unknown_alias_is_error() {
    let (_dir, _path, mut env) = fresh_environment();
    env.store_key("t1", "p", KeyEntry::new("entry-1"), false).unwrap();

    assert!(matches!(
        env.delete_key("t1", "nope", true),
        Err(TinyDbError::KeyAliasNotFound { .. })
    ));
    assert!(matches!(
        env.delete_key("t9", "p", true),
        Err(TinyDbError::TenantNotFound(_))
    ));
}

#[test]
fn test_set_default_key_requires_existing_alias() {
    let (_dir, _path, mut env) = fresh_environment();
    env.store_key("t1", "p", KeyEntry::new("entry-1"), false).unwrap();

    assert!(matches!(
        env.set_default_key("t1", "missing"),
        Err(TinyDbError::KeyAliasNotFound { .. })
    ));
    env.set_default_key("t1", "p").unwrap();
    assert_eq!(env.require_loaded().unwrap().tenants["t1"].default_key, "p");
}

#[test]
fn test_remove_tenant_clears_default_tenant() {
    let (_dir, path, mut env) = fresh_environment();
    env.store_key("t1", "p", KeyEntry::new("entry-1"), true).unwrap();
    env.store_key("t2", "p", KeyEntry::new("entry-2"), false).unwrap();

    assert!(env.remove_tenant("t1").unwrap());
    assert!(!env.remove_tenant("t2").unwrap());

    let on_disk = reload(&path);
    assert!(on_disk.tenants.is_empty());
    assert_eq!(on_disk.default_tenant, None);
}

#[test]
fn test_failed_save_leaves_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let mut env = Environment::from_config(Config::default(), Some(blocker.join("config.toml")));

    let err = env
        .store_key("t1", "p", KeyEntry::new("entry-1"), true)
        .unwrap_err();

    assert!(matches!(err, TinyDbError::ConfigWrite { .. }));
    let config = env.require_loaded().unwrap();
    assert!(config.tenants.is_empty());
    assert_eq!(config.default_tenant, None);
}

#[test]
fn test_set_endpoint_validates_and_normalizes() {
    let (_dir, path, mut env) = fresh_environment();

    assert!(matches!(
        env.set_endpoint("not a url"),
        Err(TinyDbError::InvalidInput(_))
    ));
    env.set_endpoint("https://db.example.test/").unwrap();

    assert_eq!(reload(&path).endpoint, "https://db.example.test");
}

#[test]
fn test_clear_values() {
    let (_dir, path, mut env) = fresh_environment();
    env.set_endpoint("https://db.example.test").unwrap();
    env.set_admin_secret("admin-secret").unwrap();
    env.set_default_tenant("t1").unwrap();

    env.clear_endpoint().unwrap();
    env.clear_admin_secret().unwrap();
    env.clear_default_tenant().unwrap();

    assert_eq!(reload(&path), Config::default());
}

#[test]
fn test_overrides_are_never_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut env = Environment::load(Some(path.clone()))
        .unwrap()
        .with_overrides(Overrides {
            endpoint: Some("https://override.test".to_string()),
            admin_secret: Some("override-secret".to_string()),
        });

    env.set_default_tenant("t1").unwrap();

    assert_eq!(env.endpoint().unwrap(), "https://override.test");
    let on_disk = reload(&path);
    assert_eq!(on_disk.endpoint, "");
    assert_eq!(on_disk.admin_secret, "");
    assert_eq!(on_disk.default_tenant.as_deref(), Some("t1"));
}
