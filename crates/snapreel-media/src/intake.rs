//! Source image intake.

use image::{GenericImageView, ImageFormat};

use crate::error::{MediaError, MediaResult};

/// A decoded portrait still, held in memory until the render consumes it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    /// Original upload file name
    pub file_name: String,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl SourceImage {
    /// Decode an uploaded image from its raw bytes.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> MediaResult<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| MediaError::invalid_image(format!("unrecognized image format: {e}")))?;

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| MediaError::invalid_image(format!("failed to decode image: {e}")))?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(MediaError::invalid_image("image has zero dimensions"));
        }

        Ok(Self {
            bytes,
            format,
            file_name: file_name.into(),
            width,
            height,
        })
    }

    /// The encoded bytes as uploaded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Canonical file extension for the detected format.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    /// Whether the image is taller than wide (what the 9:16 canvas wants).
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let source = SourceImage::from_bytes("portrait.png", png_bytes(9, 16)).unwrap();
        assert_eq!(source.width, 9);
        assert_eq!(source.height, 16);
        assert_eq!(source.extension(), "png");
        assert!(source.is_portrait());
    }

    #[test]
    fn test_reject_garbage() {
        let err = SourceImage::from_bytes("nope.bin", vec![0u8; 32]).unwrap_err();
        assert!(matches!(err, MediaError::InvalidImage(_)));
    }

    #[test]
    fn test_landscape_detection() {
        let source = SourceImage::from_bytes("wide.png", png_bytes(16, 9)).unwrap();
        assert!(!source.is_portrait());
    }
}
