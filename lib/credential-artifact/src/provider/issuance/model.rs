use serde::{Deserialize, Serialize};

/// Body of the credential endpoint request.
///
/// Built per issuance attempt, the embedded proof is bound to a single access
/// token and audience.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofRequest {
    pub format: String,
    pub proof: ProofRequestProof,
    pub credential_definition: ProofRequestCredentialDefinition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofRequestProof {
    pub proof_type: String,
    pub jwt: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofRequestCredentialDefinition {
    #[serde(rename = "type")]
    pub r#type: Vec<String>,
    #[serde(rename = "@context")]
    pub context: Vec<String>,
}
