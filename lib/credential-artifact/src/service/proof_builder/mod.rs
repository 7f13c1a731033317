use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::config::core_config::KeyStoreConfig;
use crate::model::credential_schema::CredentialTypeDescriptor;
use crate::model::issuer::IssuerProfile;
use crate::proto::jwt::model::JWTPayload;
use crate::proto::jwt::{Jwt, JwtError};
use crate::provider::issuance::model::{
    ProofRequest, ProofRequestCredentialDefinition, ProofRequestProof,
};
use crate::provider::key_storage::KeyStore;
use crate::provider::key_storage::error::KeyStorageError;

#[cfg(test)]
mod test;

pub const CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";
pub const PROOF_JWT_TYPE: &str = "openid4vci-proof+jwt";
const PROOF_VALIDITY: Duration = Duration::hours(24);

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("Key material error: `{0}`")]
    KeyMaterial(#[from] KeyStorageError),
    #[error("Issuer supports no proof type")]
    MissingProofType,
    #[error("JWT error: `{0}`")]
    Jwt(#[from] JwtError),
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProofClaims {
    pub nonce: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccessTokenClaims {
    c_nonce: Option<String>,
}

/// Always the first listed proof type.
pub fn select_proof_type(proof_types_supported: &[String]) -> Option<&str> {
    proof_types_supported.first().map(String::as_str)
}

/// Issues the proof-of-possession request for one credential endpoint call.
#[derive(Clone)]
pub struct ProofBuilder {
    key_store: Arc<dyn KeyStore>,
    key_store_config: KeyStoreConfig,
}

impl ProofBuilder {
    pub fn new(key_store: Arc<dyn KeyStore>, key_store_config: KeyStoreConfig) -> Self {
        Self {
            key_store,
            key_store_config,
        }
    }

    pub fn build(
        &self,
        issuer: &IssuerProfile,
        credential_type: &CredentialTypeDescriptor,
        access_token: &str,
    ) -> Result<ProofRequest, ProofError> {
        let key = self
            .key_store
            .load_signing_key(&self.key_store_config, &issuer.client_alias)?;

        let proof_type = select_proof_type(&credential_type.proof_types_supported)
            .ok_or(ProofError::MissingProofType)?;

        let now = OffsetDateTime::now_utc();
        let payload = JWTPayload {
            issued_at: Some(now),
            expires_at: Some(now + PROOF_VALIDITY),
            issuer: Some(issuer.client_id.to_owned()),
            audience: Some(vec![issuer.credential_audience.to_owned()]),
            custom: ProofClaims {
                nonce: access_token_nonce(access_token),
            },
        };

        let jwk = key.public_key_jwk().map_err(JwtError::from)?;
        let jwt = Jwt::new(PROOF_JWT_TYPE.to_owned(), key.algorithm(), Some(jwk), payload)
            .tokenize(Box::new(|input: &str| key.sign(input)))?;

        tracing::debug!(
            %proof_type,
            client_id = %issuer.client_id,
            audience = %issuer.credential_audience,
            "Built proof of possession"
        );

        Ok(ProofRequest {
            format: credential_type.format.to_owned(),
            proof: ProofRequestProof {
                proof_type: proof_type.to_owned(),
                jwt,
            },
            credential_definition: ProofRequestCredentialDefinition {
                r#type: credential_type.credential_definition.r#type.to_owned(),
                context: vec![CREDENTIALS_CONTEXT.to_owned()],
            },
        })
    }
}

/// Opaque tokens simply carry no nonce.
fn access_token_nonce(access_token: &str) -> Option<String> {
    Jwt::<AccessTokenClaims>::decode_payload_unverified(access_token)
        .ok()
        .and_then(|payload| payload.custom.c_nonce)
}
