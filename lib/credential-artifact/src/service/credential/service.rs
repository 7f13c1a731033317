use super::CredentialArtifactService;
use super::mapper::artifact_content;
use crate::model::credential_schema::CredentialTypeDescriptor;
use crate::model::issuer::IssuerProfile;
use crate::service::error::ServiceError;
use crate::service::optical_code::{CodeOutcome, encode_credential};

impl CredentialArtifactService {
    /// Requests the credential from `credential_endpoint` and renders it into
    /// a PDF carrying the selected fields and a QR code of the full credential.
    ///
    /// A code that cannot be generated leaves the QR slot empty, it does not
    /// fail the call.
    pub async fn generate_pdf_for_verifiable_credential(
        &self,
        access_token: &str,
        issuer: &IssuerProfile,
        credential_type: &CredentialTypeDescriptor,
        credential_endpoint: &str,
    ) -> Result<Vec<u8>, ServiceError> {
        let proof_request = self
            .proof_builder
            .build(issuer, credential_type, access_token)?;

        let response = self
            .issuer_exchange
            .request_credential(credential_endpoint, &proof_request, access_token)
            .await?;
        let credential = response.credential;

        let code = encode_credential(&credential);
        if let CodeOutcome::Degraded(fault) = &code {
            tracing::warn!(%fault, issuer = %issuer.credential_issuer, "Rendering without QR code");
        }

        let content = artifact_content(issuer, credential_type, &credential);
        Ok(self.document_composer.compose(&content, &code)?)
    }
}
