use self::error::{KeyStorageError, SignerError};
use crate::config::core_config::KeyStoreConfig;
use crate::proto::jwt::model::PublicKeyJwk;

pub mod error;
pub mod es256;
pub mod file;

/// Read-only access to the holder's key material.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyStore: Send + Sync {
    /// Looks up `alias` in the store described by `location`, unlocking it with
    /// the store password.
    fn load_signing_key(
        &self,
        location: &KeyStoreConfig,
        alias: &str,
    ) -> Result<Box<dyn SigningKeyMaterial>, KeyStorageError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SigningKeyMaterial: Send + Sync {
    /// JOSE algorithm identifier.
    fn algorithm(&self) -> String;
    fn public_key_jwk(&self) -> Result<PublicKeyJwk, SignerError>;
    fn sign(&self, message: &str) -> Result<Vec<u8>, SignerError>;
}
