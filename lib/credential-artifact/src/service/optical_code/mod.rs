//! QR symbol and PNG raster for a compacted payload.

use std::io::Cursor;

use ct_codecs::{Base64, Encoder};
use image::{GrayImage, ImageFormat, Luma, imageops};
use qrcode::{QrCode, Version};

use super::payload::{CodeGenerationFault, compact};
use crate::model::credential::VerifiableCredential;


/// Alphanumeric capacity of a version 40 symbol at error correction level M.
pub const QR_ALPHANUMERIC_CAPACITY: usize = 3391;
/// Symbols above this version are hard to scan from paper.
const DENSE_VERSION_THRESHOLD: i16 = 25;
/// Edge of the square raster, in pixels.
pub const IMAGE_DIMENSION: u32 = 200;
const QUIET_ZONE_MODULES: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeOutcome {
    /// Base64 (standard, padded) PNG image of the symbol.
    Generated(String),
    Degraded(CodeGenerationFault),
}

impl CodeOutcome {
    /// Empty when degraded.
    pub fn base64_png(&self) -> &str {
        match self {
            CodeOutcome::Generated(png) => png,
            CodeOutcome::Degraded(_) => "",
        }
    }

    pub fn data_uri(&self) -> String {
        match self {
            CodeOutcome::Generated(png) => format!("data:image/png;base64,{png}"),
            CodeOutcome::Degraded(_) => String::new(),
        }
    }
}

/// Compacts the credential and encodes it, never failing the caller.
pub fn encode_credential(credential: &VerifiableCredential) -> CodeOutcome {
    match compact(credential) {
        Ok(payload) => encode(&payload),
        Err(fault) => degraded(fault),
    }
}

pub fn encode(payload: &str) -> CodeOutcome {
    match render_png(payload) {
        Ok(png) => CodeOutcome::Generated(png),
        Err(fault) => degraded(fault),
    }
}

fn degraded(fault: CodeGenerationFault) -> CodeOutcome {
    tracing::error!(%fault, "Could not generate credential code");
    CodeOutcome::Degraded(fault)
}

fn render_png(payload: &str) -> Result<String, CodeGenerationFault> {
    let length = payload.chars().count();
    if length > QR_ALPHANUMERIC_CAPACITY {
        return Err(CodeGenerationFault::CapacityExceeded {
            length,
            capacity: QR_ALPHANUMERIC_CAPACITY,
        });
    }

    let code =
        QrCode::new(payload.as_bytes()).map_err(|e| CodeGenerationFault::Symbol(e.to_string()))?;

    if let Version::Normal(version) = code.version() {
        if version > DENSE_VERSION_THRESHOLD {
            tracing::warn!(version, length, "Dense QR symbol, scanning may be unreliable");
        }
    }

    let image = rasterize(&code);

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| CodeGenerationFault::Raster(e.to_string()))?;

    Base64::encode_to_string(buffer.into_inner())
        .map_err(|e| CodeGenerationFault::Raster(e.to_string()))
}

/// Whole-pixel modules centered on a white square canvas, so every symbol
/// version yields the same raster size.
fn rasterize(code: &QrCode) -> GrayImage {
    let modules = code.width() as u32 + 2 * QUIET_ZONE_MODULES;
    let module_size = (IMAGE_DIMENSION / modules).max(1);

    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(module_size, module_size)
        .build();

    let edge = IMAGE_DIMENSION.max(symbol.width());
    let offset = i64::from((edge - symbol.width()) / 2);
    let mut canvas = GrayImage::from_pixel(edge, edge, Luma([255]));
    imageops::overlay(&mut canvas, &symbol, offset, offset);
    canvas
}
