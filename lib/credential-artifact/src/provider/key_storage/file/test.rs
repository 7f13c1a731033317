use std::path::Path;

use assert2::let_assert;
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::{EncodePrivateKey, LineEnding};
use rand::rngs::OsRng;
use secrecy::SecretString;
use serde_json::json;

use super::FileKeyStore;
use crate::config::core_config::KeyStoreConfig;
use crate::provider::key_storage::KeyStore;
use crate::provider::key_storage::error::KeyStorageError;

const KEYSTORE_FILE: &str = "oidckeystore.json";

fn write_keystore(dir: &Path, alias: &str, password: &str) -> p256::SecretKey {
    let secret_key = p256::SecretKey::random(&mut OsRng);
    let pem = secret_key
        .to_pkcs8_encrypted_pem(&mut OsRng, password, LineEnding::LF)
        .unwrap();

    let content = json!({ alias: pem.as_str() });
    std::fs::write(dir.join(KEYSTORE_FILE), content.to_string()).unwrap();

    secret_key
}

fn location(dir: &Path, password: &str) -> KeyStoreConfig {
    KeyStoreConfig {
        path: dir.to_path_buf(),
        file_name: KEYSTORE_FILE.to_string(),
        password: SecretString::from(password.to_string()),
    }
}

#[test]
fn test_load_signing_key_and_sign() {
    let dir = tempfile::tempdir().unwrap();
    let secret_key = write_keystore(dir.path(), "wallet-client", "changeit");

    let key = FileKeyStore::new()
        .load_signing_key(&location(dir.path(), "changeit"), "wallet-client")
        .unwrap();

    assert_eq!(key.algorithm(), "ES256");

    let signature = key.sign("header.payload").unwrap();
    assert_eq!(signature.len(), 64);

    let verifying_key = VerifyingKey::from(&secret_key.public_key());
    let signature = Signature::from_slice(&signature).unwrap();
    verifying_key
        .verify("header.payload".as_bytes(), &signature)
        .unwrap();

    let jwk = key.public_key_jwk().unwrap();
    assert_eq!(jwk.kty, "EC");
    assert_eq!(jwk.crv, "P-256");
    assert!(jwk.y.is_some());
}

#[test]
fn test_wrong_password_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_keystore(dir.path(), "wallet-client", "changeit");

    let result =
        FileKeyStore::new().load_signing_key(&location(dir.path(), "wrong"), "wallet-client");

    let_assert!(Err(KeyStorageError::CouldNotDecrypt { alias, .. }) = result);
    assert_eq!(alias, "wallet-client");
}

#[test]
fn test_unknown_alias_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_keystore(dir.path(), "wallet-client", "changeit");

    let result = FileKeyStore::new().load_signing_key(&location(dir.path(), "changeit"), "other");

    let_assert!(Err(KeyStorageError::AliasNotFound(alias)) = result);
    assert_eq!(alias, "other");
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    let result =
        FileKeyStore::new().load_signing_key(&location(dir.path(), "changeit"), "wallet-client");

    assert!(matches!(result, Err(KeyStorageError::Unreadable { .. })));
}
