use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Envelope returned by the issuer's credential endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CredentialResponse {
    pub format: Option<String>,
    pub credential: VerifiableCredential,
}

/// Issued credential. Serialized as a whole into the optical code, so field
/// order here is the canonical order of the encoded payload.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    pub issuer: Option<String>,
    pub id: Option<String>,
    pub issuance_date: Option<String>,
    pub expiration_date: Option<String>,
    pub proof: Option<CredentialProof>,
    #[serde(default)]
    pub credential_subject: IndexMap<String, Value>,
    #[serde(rename = "type", default)]
    pub r#type: Vec<String>,
    #[serde(rename = "@context", default)]
    pub context: Vec<Value>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProof {
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub created: Option<String>,
    pub proof_purpose: Option<String>,
    pub verification_method: Option<String>,
    pub jws: Option<String>,
}
