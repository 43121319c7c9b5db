//! Host Bootstrap Integration Tests
//!
//! A host loads its configuration, installs logging at the configured
//! level and gets a ready client in one call.

use std::io::Write;
use vaultkms_config::KmsConfig;
use vaultkms_keys::{bootstrap_kms_client, KmsClient, KmsError, LOG_COMPONENT};

#[test]
fn test_bootstrap_installs_logging_and_client() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, r#"key_list = "k1:AAAAAAAAAAAAAAAAAAAAAA==""#)?;
    writeln!(file, r#"log_level = "debug""#)?;

    let config = KmsConfig::load(Some(file.path()))?;
    assert_eq!(config.log_level(), "debug");

    let client = bootstrap_kms_client(&config)?;
    let wrapped = client.wrap_key(&[3u8; 16], "k1")?;
    assert_eq!(client.unwrap_key(&wrapped, "k1")?, vec![3u8; 16]);

    // Subscriber is now in place; a second host component keeps it
    assert!(!vaultkms_logging::init_logging(LOG_COMPONENT, config.log_level()));
    Ok(())
}

#[test]
fn test_bootstrap_without_keys_fails() {
    let err = bootstrap_kms_client(&KmsConfig::default()).unwrap_err();
    assert_eq!(err.downcast_ref::<KmsError>(), Some(&KmsError::NoKeysConfigured));
}
