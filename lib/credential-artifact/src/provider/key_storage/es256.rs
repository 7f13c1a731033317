//! https://datatracker.ietf.org/doc/html/rfc7518#section-3.4

use ct_codecs::{Base64UrlSafeNoPadding, Encoder};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;

use super::SigningKeyMaterial;
use super::error::SignerError;
use crate::proto::jwt::model::PublicKeyJwk;

pub struct Es256KeyMaterial {
    signing_key: SigningKey,
}

impl Es256KeyMaterial {
    pub fn new(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }
}

impl SigningKeyMaterial for Es256KeyMaterial {
    fn algorithm(&self) -> String {
        "ES256".to_string()
    }

    fn public_key_jwk(&self) -> Result<PublicKeyJwk, SignerError> {
        let public_key = p256::PublicKey::from(self.signing_key.verifying_key());
        let encoded_point = public_key.to_encoded_point(false);

        let x = encoded_point
            .x()
            .ok_or(SignerError::CouldNotExtractPublicKey("X is missing".to_string()))?;
        let y = encoded_point
            .y()
            .ok_or(SignerError::CouldNotExtractPublicKey("Y is missing".to_string()))?;

        Ok(PublicKeyJwk {
            kty: "EC".to_string(),
            crv: "P-256".to_string(),
            x: Base64UrlSafeNoPadding::encode_to_string(x)
                .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?,
            y: Some(
                Base64UrlSafeNoPadding::encode_to_string(y)
                    .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?,
            ),
        })
    }

    fn sign(&self, message: &str) -> Result<Vec<u8>, SignerError> {
        let signature: Signature = self
            .signing_key
            .try_sign(message.as_bytes())
            .map_err(|e| SignerError::CouldNotSign(e.to_string()))?;

        Ok(signature.to_bytes().to_vec())
    }
}
