use crate::codec::decode::{Placement, fit_rect};
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::foundation::error::PadResult;
use crate::render::composite::{PixelView, blit_over, blit_scaled_over, crop};
use crate::render::surface::{DirtyRect, Surface};
use crate::rescale::bounds::content_bounds;

/// What [`auto_crop_rescale`] did with the previous content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RescaleOutcome {
    /// Nothing but background was found; the resized surface is left clear.
    Blank,
    /// The surface grew on both axes; the whole previous raster was centered unscaled.
    Pasted { dst: Rect },
    /// The content box fits; it was cropped and centered unscaled.
    Cropped { src: DirtyRect, dst: Rect },
    /// The content box was shrunk to fit, preserving its aspect ratio.
    Scaled { src: DirtyRect, dst: Rect },
}

/// Resize `surface` to `width` x `height` physical pixels and repaint its previous content.
///
/// The previous raster is taken with fully transparent pixels baked to the opaque
/// `background` (straight RGBA8), like an encoded snapshot.
#[tracing::instrument(skip(surface), fields(old_w = surface.width(), old_h = surface.height()))]
pub fn auto_crop_rescale(
    surface: &mut Surface,
    width: u32,
    height: u32,
    pixel_ratio: f64,
    background: [u8; 4],
) -> PadResult<RescaleOutcome> {
    let [r, g, b, _] = background;
    let mut snapshot = surface.clone();
    snapshot.flatten_transparent(Rgba8Premul::from_straight_rgba(r, g, b, 255));
    let (old_w, old_h) = (snapshot.width(), snapshot.height());

    surface.resize(width, height, pixel_ratio);

    let view = PixelView::of(&snapshot);
    let Some(src) = content_bounds(view, [r, g, b]) else {
        tracing::debug!("no content to carry over");
        return Ok(RescaleOutcome::Blank);
    };

    let (new_w, new_h) = (f64::from(width), f64::from(height));
    if width >= old_w && height >= old_h {
        let dst = fit_rect(
            f64::from(old_w),
            f64::from(old_h),
            new_w,
            new_h,
            Placement::Native,
        );
        blit_over(surface, view, dst.x0.floor() as i64, dst.y0.floor() as i64);
        return Ok(RescaleOutcome::Pasted { dst });
    }

    let (cw, ch) = (f64::from(src.width), f64::from(src.height));
    if new_w >= cw && new_h >= ch {
        let dst = fit_rect(cw, ch, new_w, new_h, Placement::Native);
        if let Some((w, h, pixels)) = crop(view, src) {
            blit_over(
                surface,
                PixelView::new(w, h, &pixels)?,
                dst.x0.floor() as i64,
                dst.y0.floor() as i64,
            );
        }
        return Ok(RescaleOutcome::Cropped { src, dst });
    }

    let dst = fit_rect(cw, ch, new_w, new_h, Placement::Fit);
    let tw = dst.width().round().max(1.0) as u32;
    let th = dst.height().round().max(1.0) as u32;
    blit_scaled_over(
        surface,
        view,
        src,
        tw,
        th,
        dst.x0.round() as i64,
        dst.y0.round() as i64,
    )?;
    Ok(RescaleOutcome::Scaled { src, dst })
}

#[cfg(test)]
#[path = "../../tests/unit/rescale/autocrop.rs"]
mod tests;
