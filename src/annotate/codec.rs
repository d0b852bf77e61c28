//! JPEG decode and encode.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

use crate::error::BoxlabelError;

/// Quality used when re-encoding annotated images.
pub const JPEG_QUALITY: u8 = 90;

/// Decodes JPEG bytes into an RGB pixel grid.
///
/// Grayscale and CMYK inputs are converted to RGB, so the re-encoded output
/// is always a three-channel JPEG.
pub fn decode_jpeg(bytes: &[u8]) -> Result<RgbImage, BoxlabelError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .map(|image| image.to_rgb8())
        .map_err(|source| BoxlabelError::Decode { source })
}

/// Encodes an RGB pixel grid as JPEG at [`JPEG_QUALITY`].
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, BoxlabelError> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|source| BoxlabelError::Encode { source })?;
    Ok(bytes)
}
