//! Startup must refuse to serve without a license token.

use license_relay::config::parse_config;
use license_relay::lifecycle::startup::{self, StartupError};
use license_relay::security::SecretError;

#[test]
fn test_missing_token_fails_before_bind() {
    std::env::remove_var("LICENSE_RELAY_TEST_NO_TOKEN");
    let config = parse_config(
        r#"
        [listener]
        bind_address = "127.0.0.1:0"

        [gate]
        allowed_origins = ["https://a.example"]

        [secret]
        env_var = "LICENSE_RELAY_TEST_NO_TOKEN"
        "#,
    )
    .unwrap();

    let err = startup::build_gate(&config).unwrap_err();
    assert!(matches!(err, StartupError::Secret(SecretError::Missing { .. })));
    assert!(err.to_string().contains("LICENSE_RELAY_TEST_NO_TOKEN"));
}

#[test]
fn test_unreadable_token_file_fails() {
    let config = parse_config(
        r#"
        [gate]
        allowed_origins = ["https://a.example"]

        [secret]
        file = "/nonexistent/license_token"
        "#,
    )
    .unwrap();

    let err = startup::build_gate(&config).unwrap_err();
    assert!(matches!(
        err,
        StartupError::Secret(SecretError::Unreadable { .. })
    ));
}

#[test]
fn test_error_message_never_contains_token() {
    let var = "LICENSE_RELAY_TEST_TOKEN_PRESENT";
    std::env::set_var(var, "very-secret-value");
    let mut config = parse_config("[gate]\nallowed_origins = [\"https://a.example\"]\n").unwrap();
    config.secret.env_var = var.into();

    let gate = startup::build_gate(&config).unwrap();
    assert!(!format!("{:?}", gate).contains("very-secret-value"));
}
