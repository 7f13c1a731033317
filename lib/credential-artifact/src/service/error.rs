use thiserror::Error;

use super::document::RenderError;
use super::proof_builder::ProofError;
use crate::config::ConfigParsingError;
use crate::provider::issuance::IssuanceError;
use crate::provider::issuer_config::IssuerConfigError;
use crate::provider::key_storage::error::KeyStorageError;
use crate::provider::template_store::TemplateStoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration unavailable: `{0}`")]
    ConfigUnavailable(#[from] ConfigFault),
    #[error("Unknown issuer `{0}`")]
    UnknownIssuer(String),
    #[error("Issuer exchange unavailable: `{0}`")]
    IssuerExchangeUnavailable(#[from] IssuanceError),
    #[error("Key material fault: `{0}`")]
    KeyMaterialFault(#[from] KeyStorageError),
    #[error("Signing fault: `{0}`")]
    SigningFault(ProofError),
    #[error("Render fault: `{0}`")]
    RenderFault(RenderError),
}

/// Issuer list, template or settings that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigFault {
    #[error(transparent)]
    Issuers(#[from] IssuerConfigError),
    #[error(transparent)]
    Template(#[from] TemplateStoreError),
    #[error(transparent)]
    Settings(#[from] ConfigParsingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorCategory {
    /// Caller supplied something unusable; retrying the same input won't help.
    InvalidInput,
    /// Configuration, key material or a remote party failed.
    Infrastructure,
    Rendering,
}

impl From<ProofError> for ServiceError {
    fn from(value: ProofError) -> Self {
        match value {
            ProofError::KeyMaterial(error) => ServiceError::KeyMaterialFault(error),
            other => ServiceError::SigningFault(other),
        }
    }
}

impl From<IssuerConfigError> for ServiceError {
    fn from(value: IssuerConfigError) -> Self {
        ServiceError::ConfigUnavailable(value.into())
    }
}

impl From<TemplateStoreError> for ServiceError {
    fn from(value: TemplateStoreError) -> Self {
        ServiceError::ConfigUnavailable(value.into())
    }
}

impl From<ConfigParsingError> for ServiceError {
    fn from(value: ConfigParsingError) -> Self {
        ServiceError::ConfigUnavailable(value.into())
    }
}

impl From<RenderError> for ServiceError {
    fn from(value: RenderError) -> Self {
        match value {
            RenderError::Template(error) => error.into(),
            other => ServiceError::RenderFault(other),
        }
    }
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::UnknownIssuer(_) => ErrorCategory::InvalidInput,
            ServiceError::SigningFault(ProofError::MissingProofType) => {
                ErrorCategory::InvalidInput
            }
            ServiceError::ConfigUnavailable(_)
            | ServiceError::IssuerExchangeUnavailable(_)
            | ServiceError::KeyMaterialFault(_)
            | ServiceError::SigningFault(_) => ErrorCategory::Infrastructure,
            ServiceError::RenderFault(_) => ErrorCategory::Rendering,
        }
    }
}
