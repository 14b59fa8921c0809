use std::io::Cursor;

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::codec::{EncodedImage, ImageFormat};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PadError, PadResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::composite::over;
use crate::render::surface::Surface;

/// JPEG quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encode `surface` as `format`.
///
/// Every fully transparent pixel is first overwritten in place with the opaque form of
/// `background` (straight RGBA8), so the surface keeps the baked background afterwards.
/// `quality` only applies to JPEG and is clamped to `1..=100`.
#[tracing::instrument(skip(surface), fields(width = surface.width(), height = surface.height()))]
pub fn encode(
    surface: &mut Surface,
    background: [u8; 4],
    format: ImageFormat,
    quality: Option<u8>,
) -> PadResult<EncodedImage> {
    if surface.is_zero_sized() {
        return Err(PadError::encode("cannot encode a zero-sized surface"));
    }
    let [r, g, b, _] = background;
    let opaque_bg = Rgba8Premul::from_straight_rgba(r, g, b, 255);
    let flattened = surface.flatten_transparent(opaque_bg);
    tracing::trace!(flattened, "baked background into transparent pixels");

    let (width, height) = (surface.width(), surface.height());
    let mut buf = Vec::new();
    match format {
        ImageFormat::Png => {
            let mut rgba = surface.data().to_vec();
            unpremultiply_rgba8_in_place(&mut rgba);
            let img = image::RgbaImage::from_raw(width, height, rgba)
                .ok_or_else(|| PadError::encode("surface buffer does not match its dimensions"))?;
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
                .context("encode png")?;
        }
        ImageFormat::Jpeg => {
            let rgb = opaque_rgb(surface.data(), opaque_bg);
            let q = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, q)
                .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
                .context("encode jpeg")?;
        }
    }

    Ok(EncodedImage {
        format,
        width,
        height,
        bytes: buf,
    })
}

/// JPEG has no alpha: translucent stroke edges are composited over the background.
fn opaque_rgb(premul: &[u8], background: Rgba8Premul) -> Vec<u8> {
    let bg = background.to_array();
    let mut out = Vec::with_capacity(premul.len() / 4 * 3);
    for px in premul.chunks_exact(4) {
        let c = over(bg, [px[0], px[1], px[2], px[3]], 1.0);
        out.extend_from_slice(&c[..3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/codec/encode.rs"]
mod tests;
