use thiserror::Error;

use crate::model::issuer::IssuerList;

pub mod json_file;

#[derive(Debug, Error)]
pub enum IssuerConfigError {
    #[error("Issuer configuration `{source_name}` unavailable: `{reason}`")]
    Unavailable { source_name: String, reason: String },
    #[error("Issuer configuration parsing error: `{0}`")]
    Parsing(#[from] serde_json::Error),
}

/// Backing store of the issuers configuration blob.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait IssuerConfigSource: Send + Sync {
    fn load(&self) -> Result<IssuerList, IssuerConfigError>;
}
