use super::*;

#[test]
fn test_get_existing_var() {
    std::env::set_var("SAMPLEDASH_TEST_ENDPOINT_VAR", "http://localhost:5000");
    assert_eq!(
        EnvVar::get("SAMPLEDASH_TEST_ENDPOINT_VAR"),
        Some("http://localhost:5000".to_string())
    );
    std::env::remove_var("SAMPLEDASH_TEST_ENDPOINT_VAR");
}

#[test]
fn test_get_empty_var() {
    std::env::set_var("SAMPLEDASH_TEST_EMPTY_VAR", "");
    assert_eq!(EnvVar::get("SAMPLEDASH_TEST_EMPTY_VAR"), None);
    std::env::remove_var("SAMPLEDASH_TEST_EMPTY_VAR");
}

#[test]
fn test_get_nonexistent_var() {
    assert_eq!(EnvVar::get("SAMPLEDASH_NONEXISTENT_VAR_12345"), None);
}

#[test]
fn test_known_keys_are_prefixed() {
    for key in [EnvVar::ENDPOINT, EnvVar::TIMEOUT, EnvVar::SAMPLES] {
        assert!(key.starts_with("SAMPLEDASH_"));
    }
}
