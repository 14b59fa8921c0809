//! Portable raster encoding of a drawing surface.
//!
//! [`encode`] bakes the background into untouched pixels and produces an [`EncodedImage`];
//! [`decode_image`] and [`draw_decoded`] bring such an image back onto a surface.

pub mod decode;
pub mod encode;

use std::io::Cursor;

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{PadError, PadResult};

pub use decode::{DecodedImage, Placement, decode_image, draw_decoded, fit_rect, zoom_matches};
pub use encode::{DEFAULT_JPEG_QUALITY, encode};

/// Container format of an [`EncodedImage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Encoded surface content: the only artifact a pad persists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Parse a base64 data URL. Dimensions are read from the image header.
    pub fn from_data_url(url: &str) -> PadResult<Self> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| PadError::decode("not a data url"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| PadError::decode("data url has no payload"))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| PadError::decode("data url is not base64 encoded"))?;
        let format = ImageFormat::from_mime(mime)
            .ok_or_else(|| PadError::decode(format!("unsupported image type '{mime}'")))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| PadError::decode(format!("invalid base64 payload: {e}")))?;
        Self::from_bytes(format, bytes)
    }

    pub fn from_bytes(format: ImageFormat, bytes: Vec<u8>) -> PadResult<Self> {
        let (width, height) = image::ImageReader::with_format(
            Cursor::new(bytes.as_slice()),
            format.to_image_format(),
        )
        .into_dimensions()
        .map_err(|e| PadError::decode(format!("read image header: {e}")))?;
        Ok(Self {
            format,
            width,
            height,
            bytes,
        })
    }

    /// Write the raw encoded bytes to `path`.
    pub fn write_to_path(&self, path: impl AsRef<std::path::Path>) -> PadResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write image '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mod.rs"]
mod tests;
