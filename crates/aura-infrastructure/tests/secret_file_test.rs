use aura_core::secret::SecretService;
use aura_infrastructure::SecretServiceImpl;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[tokio::test]
async fn test_reads_key_from_secret_file() {
    let temp_dir = TempDir::new().unwrap();
    let secret_path = temp_dir.path().join("secret.json");
    std::fs::write(
        &secret_path,
        r#"{"gemini": {"api_key": "file-key", "model_name": "gemini-2.5-flash"}}"#,
    )
    .unwrap();

    let service = SecretServiceImpl::new(Some(&secret_path)).with_env(no_env);
    let gemini = service.load_secrets().await.unwrap().gemini.unwrap();

    assert_eq!(gemini.api_key, "file-key");
    assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.5-flash"));
}

#[tokio::test]
async fn test_environment_overrides_secret_file() {
    let temp_dir = TempDir::new().unwrap();
    let secret_path = temp_dir.path().join("secret.json");
    std::fs::write(&secret_path, r#"{"gemini": {"api_key": "file-key"}}"#).unwrap();

    let service = SecretServiceImpl::new(Some(&secret_path)).with_env(|key| {
        (key == "GEMINI_API_KEY").then(|| "env-key".to_string())
    });
    let gemini = service.load_secrets().await.unwrap().gemini.unwrap();

    assert_eq!(gemini.api_key, "env-key");
}

#[tokio::test]
async fn test_malformed_secret_file_is_an_error_without_contents() {
    let temp_dir = TempDir::new().unwrap();
    let secret_path = temp_dir.path().join("secret.json");
    std::fs::write(&secret_path, r#"{"gemini": {"api_key": "sk-leaky""#).unwrap();

    let service = SecretServiceImpl::new(Some(&secret_path)).with_env(no_env);
    let err = service.load_secrets().await.unwrap_err();

    assert!(err.contains("Failed to parse"));
    assert!(!err.contains("sk-leaky"));
}

#[tokio::test]
async fn test_result_is_cached() {
    let temp_dir = TempDir::new().unwrap();
    let secret_path = temp_dir.path().join("secret.json");
    std::fs::write(&secret_path, r#"{"gemini": {"api_key": "first"}}"#).unwrap();

    let service = SecretServiceImpl::new(Some(&secret_path)).with_env(no_env);
    let first = service.load_secrets().await.unwrap();
    std::fs::write(&secret_path, r#"{"gemini": {"api_key": "second"}}"#).unwrap();
    let second = service.load_secrets().await.unwrap();

    assert_eq!(first.gemini.unwrap().api_key, "first");
    assert_eq!(second.gemini.unwrap().api_key, "first");
}
