use crate::foundation::core::Rect;
use crate::foundation::error::{PadError, PadResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::render::composite::{PixelView, blit_over, blit_scaled_over};
use crate::render::surface::{DirtyRect, Surface};

/// A decoded image in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

impl DecodedImage {
    pub fn view(&self) -> PadResult<PixelView<'_>> {
        PixelView::new(self.width, self.height, &self.rgba8_premul)
    }
}

/// How a decoded image is laid onto the target surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Aspect-preserving fit into the whole surface, centered.
    Fit,
    /// Native pixel size, centered. May clip or leave borders.
    Native,
}

#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> PadResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PadError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul,
    })
}

/// Zoom levels are considered equal when they differ by less than `epsilon`.
pub fn zoom_matches(actual: f64, expected: f64, epsilon: f64) -> bool {
    (actual - expected).abs() < epsilon
}

/// Destination rectangle of an `image_w` x `image_h` image inside a `target_w` x `target_h`
/// box, centered on both axes.
///
/// With [`Placement::Fit`] the more constrained axis fills the box and the other is padded
/// symmetrically.
pub fn fit_rect(
    image_w: f64,
    image_h: f64,
    target_w: f64,
    target_h: f64,
    placement: Placement,
) -> Rect {
    match placement {
        Placement::Native => {
            let x = (target_w - image_w) / 2.0;
            let y = (target_h - image_h) / 2.0;
            Rect::new(x, y, x + image_w, y + image_h)
        }
        Placement::Fit => {
            if image_w <= 0.0 || image_h <= 0.0 || target_w <= 0.0 || target_h <= 0.0 {
                return Rect::new(0.0, 0.0, 0.0, 0.0);
            }
            let rx = image_w / target_w;
            let ry = image_h / target_h;
            if rx > ry {
                let h = image_h * target_w / image_w;
                let y = (target_h - h) / 2.0;
                Rect::new(0.0, y, target_w, y + h)
            } else if rx < ry {
                let w = image_w * target_h / image_h;
                let x = (target_w - w) / 2.0;
                Rect::new(x, 0.0, x + w, target_h)
            } else {
                Rect::new(0.0, 0.0, target_w, target_h)
            }
        }
    }
}

/// Source-over `image` onto `surface` according to `placement`, in physical pixels.
///
/// When the destination has the image's own size the pixels are copied at integer offsets
/// without resampling.
pub fn draw_decoded(
    surface: &mut Surface,
    image: &DecodedImage,
    placement: Placement,
) -> PadResult<Rect> {
    let dst = fit_rect(
        f64::from(image.width),
        f64::from(image.height),
        f64::from(surface.width()),
        f64::from(surface.height()),
        placement,
    );
    let tw = dst.width().round().max(0.0) as u32;
    let th = dst.height().round().max(0.0) as u32;
    if tw == 0 || th == 0 {
        return Ok(dst);
    }

    let view = image.view()?;
    if (tw, th) == (image.width, image.height) {
        blit_over(surface, view, dst.x0.floor() as i64, dst.y0.floor() as i64);
    } else {
        let whole = DirtyRect {
            x: 0,
            y: 0,
            width: i32::try_from(image.width)
                .map_err(|_| PadError::validation("image width exceeds i32"))?,
            height: i32::try_from(image.height)
                .map_err(|_| PadError::validation("image height exceeds i32"))?,
        };
        blit_scaled_over(
            surface,
            view,
            whole,
            tw,
            th,
            dst.x0.round() as i64,
            dst.y0.round() as i64,
        )?;
    }
    Ok(dst)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
