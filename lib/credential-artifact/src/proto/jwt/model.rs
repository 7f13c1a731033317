use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, TimestampSeconds, serde_as, skip_serializing_none};
use time::OffsetDateTime;

/// JOSE header, RFC 7515 section 4.1.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JWTHeader {
    pub alg: String,
    pub typ: Option<String>,
    /// Holder public key the proof is bound to.
    pub jwk: Option<PublicKeyJwk>,
}

/// Registered claims used by proof tokens, plus the caller's own claims.
#[skip_serializing_none]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JWTPayload<CustomPayload> {
    #[serde(rename = "iat", default)]
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub issued_at: Option<OffsetDateTime>,

    #[serde(rename = "exp", default)]
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub expires_at: Option<OffsetDateTime>,

    #[serde(rename = "iss", default)]
    pub issuer: Option<String>,

    #[serde(rename = "aud", default)]
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub audience: Option<Vec<String>>,

    #[serde(flatten)]
    pub custom: CustomPayload,
}

/// EC public key in JWK form, <https://www.rfc-editor.org/rfc/rfc7517>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyJwk {
    pub kty: String,
    pub crv: String,
    pub x: String,
    pub y: Option<String>,
}
