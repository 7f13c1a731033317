//! Enumerates errors related to key store access and signing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyStorageError {
    #[error("Key store `{path}` not readable: `{reason}`")]
    Unreadable { path: String, reason: String },
    #[error("Key store parsing error: `{0}`")]
    Parsing(String),
    #[error("Alias `{0}` not found in key store")]
    AliasNotFound(String),
    #[error("Could not decrypt key `{alias}`: `{reason}`")]
    CouldNotDecrypt { alias: String, reason: String },
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract public key: `{0}`")]
    CouldNotExtractPublicKey(String),
}
