//! Compact JWS serialization for self-signed proof tokens.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use self::mapper::{b64url_to_bin, bin_to_b64url_string};
use self::model::{JWTHeader, JWTPayload, PublicKeyJwk};
use crate::provider::key_storage::error::SignerError;

pub mod mapper;
pub mod model;


/// Receives the signing input (`header.payload`) and returns the raw signature.
pub type AuthenticationFn<'a> = Box<dyn FnOnce(&str) -> Result<Vec<u8>, SignerError> + 'a>;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(#[from] SignerError),
    #[error("Could not extract payload: `{0}`")]
    CouldNotExtractPayload(String),
}

#[derive(Debug)]
pub struct Jwt<Payload> {
    pub(crate) header: JWTHeader,
    pub(crate) payload: JWTPayload<Payload>,
}

impl<Payload: Serialize + DeserializeOwned + Debug> Jwt<Payload> {
    pub fn new(
        token_type: String,
        algorithm: String,
        jwk: Option<PublicKeyJwk>,
        payload: JWTPayload<Payload>,
    ) -> Self {
        Self {
            header: JWTHeader {
                alg: algorithm,
                typ: Some(token_type),
                jwk,
            },
            payload,
        }
    }

    pub fn tokenize(&self, sign: AuthenticationFn<'_>) -> Result<String, JwtError> {
        let signing_input = [encode_segment(&self.header)?, encode_segment(&self.payload)?].join(".");
        let signature = bin_to_b64url_string(&sign(&signing_input)?)?;

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Reads the claims of a token without checking its signature.
    pub fn decode_payload_unverified(token: &str) -> Result<JWTPayload<Payload>, JwtError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            return Err(JwtError::CouldNotExtractPayload(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        serde_json::from_slice(&b64url_to_bin(payload)?)
            .map_err(|e| JwtError::CouldNotExtractPayload(e.to_string()))
    }
}

fn encode_segment(value: &impl Serialize) -> Result<String, JwtError> {
    let json = serde_json::to_vec(value).map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;
    bin_to_b64url_string(&json)
}
