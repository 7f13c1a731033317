use thiserror::Error;

use self::model::ProofRequest;
use crate::model::credential::CredentialResponse;
use crate::model::credential_schema::CredentialIssuerWellKnown;
use crate::provider::http_client;

pub mod model;
pub mod openid4vci;


#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("Transport error: `{0}`")]
    Transport(#[from] http_client::Error),
    #[error("Issuer returned no usable response: `{0}`")]
    EmptyResponse(String),
}

/// Outbound calls towards a credential issuer.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait IssuerExchange: Send + Sync {
    async fn request_credential(
        &self,
        credential_endpoint: &str,
        request: &ProofRequest,
        access_token: &str,
    ) -> Result<CredentialResponse, IssuanceError>;

    async fn fetch_well_known(
        &self,
        well_known_endpoint: &str,
    ) -> Result<CredentialIssuerWellKnown, IssuanceError>;
}
