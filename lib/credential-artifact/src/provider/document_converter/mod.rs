use thiserror::Error;

pub mod pdf;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid embedded image: `{0}`")]
    Image(String),
    #[error("PDF serialization error: `{0}`")]
    Pdf(String),
}

/// Converts a rendered HTML document into a portable document.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, html: &str) -> Result<Vec<u8>, ConversionError>;
}
