//! Key Rotation Integration Tests
//!
//! Stage a new master key list, keep reading old data, promote, and
//! check which wrapped keys remain readable at each step.

use std::io::Write;
use vaultkms_config::KmsConfig;
use vaultkms_keys::{
    begin_rotation_from_config, init_kms_client, ErrorKind, KmsClient, LocalKmsClient,
    RotationPhase,
};

const OLD_KEYS: [&str; 2] = [
    "k1:AAAAAAAAAAAAAAAAAAAAAA==",
    "k2:AQEBAQEBAQEBAQEBAQEBAQ==",
];

const NEW_KEYS: [&str; 2] = [
    "k1:AgICAgICAgICAgICAgICAg==",
    "k3:AwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwM=",
];

fn client_with(keys: &[&str]) -> LocalKmsClient {
    vaultkms_logging::init_test_logging();
    let client = LocalKmsClient::standalone();
    let keys: Vec<String> = keys.iter().map(|s| s.to_string()).collect();
    client.initialize(&keys).unwrap();
    client
}

#[test]
fn test_rotation_isolation() {
    let client = client_with(&OLD_KEYS);
    let before = client.wrap_key(&[1u8; 16], "k1").unwrap();

    client.begin_rotation(&NEW_KEYS).unwrap();
    let during = client.wrap_key(&[2u8; 16], "k1").unwrap();

    // Pre-rotation data still unwraps with the active keys
    assert_eq!(client.unwrap_key(&before, "k1").unwrap(), vec![1u8; 16]);

    // Data wrapped with the staged keys is not readable yet
    let err = client.unwrap_key(&during, "k1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyAccessDenied);
}

#[test]
fn test_rotation_promotion() {
    let client = client_with(&OLD_KEYS);
    client.begin_rotation(&NEW_KEYS).unwrap();
    let during = client.wrap_key(&[2u8; 16], "k1").unwrap();

    client.finish_rotation();

    assert_eq!(client.unwrap_key(&during, "k1").unwrap(), vec![2u8; 16]);
    let status = client.rotation_status().unwrap();
    assert_eq!(status.phase, RotationPhase::Stable);
    assert_eq!(status.active_keys, vec!["k1", "k3"]);
}

#[test]
fn test_promotion_discards_old_secrets() {
    let client = client_with(&OLD_KEYS);
    let before_k1 = client.wrap_key(&[1u8; 16], "k1").unwrap();
    let before_k2 = client.wrap_key(&[1u8; 16], "k2").unwrap();

    client.begin_rotation(&NEW_KEYS).unwrap();
    client.finish_rotation();

    // Same name, different secret
    let err = client.unwrap_key(&before_k1, "k1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyAccessDenied);

    // Name gone entirely
    let err = client.unwrap_key(&before_k2, "k2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_staged_only_key_names() {
    let client = client_with(&OLD_KEYS);
    client.begin_rotation(&NEW_KEYS).unwrap();

    // k3 exists only in the staged set, k2 only in the active set
    let wrapped = client.wrap_key(&[3u8; 32], "k3").unwrap();
    assert_eq!(client.unwrap_key(&wrapped, "k3").unwrap_err().kind(), ErrorKind::KeyNotFound);
    assert_eq!(client.wrap_key(&[3u8; 32], "k2").unwrap_err().kind(), ErrorKind::KeyNotFound);

    client.finish_rotation();
    assert_eq!(client.unwrap_key(&wrapped, "k3").unwrap(), vec![3u8; 32]);
}

#[test]
fn test_finish_without_begin_is_noop() {
    let client = client_with(&OLD_KEYS);
    let wrapped = client.wrap_key(&[4u8; 16], "k2").unwrap();
    let before = client.rotation_status().unwrap();

    client.finish_rotation();
    client.finish_rotation();

    let after = client.rotation_status().unwrap();
    assert_eq!(before.active_fingerprint, after.active_fingerprint);
    assert_eq!(client.unwrap_key(&wrapped, "k2").unwrap(), vec![4u8; 16]);
}

#[test]
fn test_malformed_rotation_list_leaves_state() {
    let client = client_with(&OLD_KEYS);
    let before = client.rotation_status().unwrap();

    let err = client.begin_rotation(&["k1:AgICAgICAgICAgICAgICAg==", "k4"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedKeyEntry);

    let err = client.begin_rotation(&["k1:@@@@"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKeyEncoding);

    let empty: [&str; 0] = [];
    assert_eq!(client.begin_rotation(&empty).unwrap_err().kind(), ErrorKind::NoKeysConfigured);

    let after = client.rotation_status().unwrap();
    assert_eq!(after.phase, RotationPhase::Stable);
    assert_eq!(after.staged_fingerprint, before.staged_fingerprint);
}

#[test]
fn test_rotation_from_config_file() -> anyhow::Result<()> {
    vaultkms_logging::init_test_logging();

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "key_list = {:?}", OLD_KEYS.join(","))?;
    writeln!(file, "new_key_list = {:?}", NEW_KEYS.join(","))?;

    let config = KmsConfig::load(Some(file.path()))?;
    let client = init_kms_client(&config)?;
    let before = client.wrap_key(&[5u8; 16], "k1")?;

    begin_rotation_from_config(&client, &config)?;
    assert!(client.rotation_status()?.is_rotating());
    let during = client.wrap_key(&[6u8; 16], "k1")?;
    assert_eq!(client.unwrap_key(&before, "k1")?, vec![5u8; 16]);

    client.finish_rotation();
    assert_eq!(client.unwrap_key(&during, "k1")?, vec![6u8; 16]);
    Ok(())
}
