//! Integration tests for AppContext construction from configuration

use bizkit_api::AppContext;
use bizkit_domain::{AuthMode, BizkitError, Config, StorageBackend};
use tempfile::TempDir;

fn sqlite_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Sqlite;
    config.storage.sqlite.path = dir.path().join("bizkit.db").to_string_lossy().into_owned();
    config.auth.mode = AuthMode::Fixed;
    config
}

#[tokio::test(flavor = "multi_thread")]
async fn context_builds_sqlite_backend() {
    let dir = TempDir::new().unwrap();

    let ctx = AppContext::new(sqlite_config(&dir)).await.expect("context builds");

    assert_eq!(ctx.profiles.store().backend_name(), "sqlite");
    ctx.profiles.store().health_check().await.unwrap();
    assert!(dir.path().join("bizkit.db").exists());
}

#[tokio::test]
async fn context_rejects_jwt_mode_without_secret() {
    let dir = TempDir::new().unwrap();
    let mut config = sqlite_config(&dir);
    config.auth.mode = AuthMode::Jwt;
    config.auth.jwt_secret = None;

    let err = AppContext::new(config).await.err().expect("context must fail");
    assert!(matches!(err, BizkitError::Config(_)));
}

#[tokio::test]
async fn context_uses_configured_file_directory() {
    let dir = TempDir::new().unwrap();
    let mut config = sqlite_config(&dir);
    config.storage.backend = StorageBackend::File;
    config.storage.file.directory = dir.path().join("profiles");

    let ctx = AppContext::new(config).await.expect("context builds");

    assert_eq!(ctx.profiles.store().backend_name(), "file");
    assert!(dir.path().join("profiles").is_dir());
}
