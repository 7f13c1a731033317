//! Lossless compaction of a credential into a QR alphanumeric friendly string.

use thiserror::Error;

use crate::model::credential::VerifiableCredential;
use crate::util::compression::{zlib_compress, zlib_decompress};

#[cfg(test)]
mod test;

/// Reason a scannable code could not be produced. Never fatal for the
/// surrounding pipeline, see [`crate::service::optical_code::CodeOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenerationFault {
    #[error("Serialization failed: `{0}`")]
    Serialization(String),
    #[error("Compression failed: `{0}`")]
    Compression(String),
    #[error("Compact encoding failed: `{0}`")]
    Encoding(String),
    #[error("Payload of {length} characters exceeds QR capacity of {capacity}")]
    CapacityExceeded { length: usize, capacity: usize },
    #[error("Symbol generation failed: `{0}`")]
    Symbol(String),
    #[error("Raster encoding failed: `{0}`")]
    Raster(String),
}

/// serde_json bytes, zlib at best level, base45.
pub fn compact(credential: &VerifiableCredential) -> Result<String, CodeGenerationFault> {
    let serialized = serde_json::to_vec(credential)
        .map_err(|e| CodeGenerationFault::Serialization(e.to_string()))?;
    let compressed =
        zlib_compress(&serialized).map_err(|e| CodeGenerationFault::Compression(e.to_string()))?;

    let payload = base45::encode(&compressed);
    tracing::debug!(
        serialized = serialized.len(),
        compressed = compressed.len(),
        encoded = payload.len(),
        "Compacted credential payload"
    );

    Ok(payload)
}

/// Inverse of [`compact`], yields the serialized credential bytes.
pub fn expand(payload: &str) -> Result<Vec<u8>, CodeGenerationFault> {
    let compressed =
        base45::decode(payload).map_err(|e| CodeGenerationFault::Encoding(format!("{e:?}")))?;

    zlib_decompress(&compressed).map_err(|e| CodeGenerationFault::Compression(e.to_string()))
}
