use super::IssuerService;
use super::dto::IssuerSupportedCredentialsResponseDTO;
use crate::model::issuer::{IssuerList, IssuerProfile};
use crate::service::error::ServiceError;

fn non_empty(search: Option<&str>) -> Option<&str> {
    search.filter(|search| !search.is_empty())
}

impl IssuerService {
    /// Enabled issuers, optionally narrowed to the ones whose display title
    /// contains `search` (case-insensitive).
    pub fn get_all_issuers(&self, search: Option<&str>) -> Result<IssuerList, ServiceError> {
        let mut issuers = self.issuer_config_source.load()?;
        issuers.issuers.retain(|issuer| issuer.enabled);

        if let Some(search) = non_empty(search) {
            issuers
                .issuers
                .retain(|issuer| issuer.title_contains(search));
        }

        Ok(issuers)
    }

    pub fn get_all_issuers_with_all_fields(&self) -> Result<IssuerList, ServiceError> {
        Ok(self.issuer_config_source.load()?)
    }

    pub fn get_issuer_config(&self, issuer_id: &str) -> Result<IssuerProfile, ServiceError> {
        self.issuer_config_source
            .load()?
            .issuers
            .into_iter()
            .find(|issuer| issuer.credential_issuer == issuer_id)
            .ok_or_else(|| ServiceError::UnknownIssuer(issuer_id.to_owned()))
    }

    /// Credential types advertised on the issuer's well-known endpoint.
    ///
    /// An unknown issuer yields an empty response rather than an error.
    pub async fn get_credentials_supported(
        &self,
        issuer_id: &str,
        search: Option<&str>,
    ) -> Result<IssuerSupportedCredentialsResponseDTO, ServiceError> {
        let issuers = self.get_all_issuers_with_all_fields()?;
        let Some(issuer) = issuers
            .issuers
            .into_iter()
            .find(|issuer| issuer.credential_issuer == issuer_id)
        else {
            tracing::debug!(%issuer_id, "Issuer not configured");
            return Ok(IssuerSupportedCredentialsResponseDTO::default());
        };

        let well_known = self
            .issuer_exchange
            .fetch_well_known(&issuer.well_known_endpoint)
            .await?;

        let mut supported_credentials = well_known.credentials_supported;
        if let Some(search) = non_empty(search) {
            supported_credentials.retain(|credential_type| credential_type.name_contains(search));
        }

        Ok(IssuerSupportedCredentialsResponseDTO {
            authorization_endpoint: Some(issuer.authorization_endpoint),
            supported_credentials,
        })
    }
}
