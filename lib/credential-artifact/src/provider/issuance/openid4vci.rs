use std::sync::Arc;

use super::model::ProofRequest;
use super::{IssuanceError, IssuerExchange};
use crate::model::credential::CredentialResponse;
use crate::model::credential_schema::CredentialIssuerWellKnown;
use crate::provider::http_client::HttpClient;

/// OpenID4VCI credential endpoint client, no retries.
pub struct OpenID4VCIExchange {
    client: Arc<dyn HttpClient>,
}

impl OpenID4VCIExchange {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IssuerExchange for OpenID4VCIExchange {
    async fn request_credential(
        &self,
        credential_endpoint: &str,
        request: &ProofRequest,
        access_token: &str,
    ) -> Result<CredentialResponse, IssuanceError> {
        tracing::debug!(
            format = %request.format,
            proof_type = %request.proof.proof_type,
            "Requesting credential"
        );

        let response = self
            .client
            .post(credential_endpoint)
            .bearer_auth(access_token)
            .json(request)?
            .send()
            .await?
            .error_for_status()?;

        if response.body.is_empty() {
            return Err(IssuanceError::EmptyResponse(
                "credential endpoint returned an empty body".to_string(),
            ));
        }

        response
            .json::<Option<CredentialResponse>>()?
            .ok_or(IssuanceError::EmptyResponse(
                "credential endpoint returned null".to_string(),
            ))
    }

    async fn fetch_well_known(
        &self,
        well_known_endpoint: &str,
    ) -> Result<CredentialIssuerWellKnown, IssuanceError> {
        let response = self
            .client
            .get(well_known_endpoint)
            .send()
            .await?
            .error_for_status()?;

        if response.body.is_empty() {
            return Err(IssuanceError::EmptyResponse(
                "well-known endpoint returned an empty body".to_string(),
            ));
        }

        response
            .json::<Option<CredentialIssuerWellKnown>>()?
            .ok_or(IssuanceError::EmptyResponse(
                "well-known endpoint returned null".to_string(),
            ))
    }
}
