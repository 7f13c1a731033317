use serde::Serialize;

use crate::model::credential_schema::CredentialTypeDescriptor;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerSupportedCredentialsResponseDTO {
    pub authorization_endpoint: Option<String>,
    pub supported_credentials: Vec<CredentialTypeDescriptor>,
}
