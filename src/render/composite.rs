use image::imageops::FilterType;

use crate::foundation::error::{PadError, PadResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::surface::{DirtyRect, Surface};

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// A premultiplied RGBA8 image borrowed for compositing.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> PixelView<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> PadResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PadError::validation("pixel view size overflow"))?;
        if data.len() != expected {
            return Err(PadError::validation(format!(
                "pixel view expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn of(surface: &'a Surface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            data: surface.data(),
        }
    }

    fn px(&self, x: u32, y: u32) -> PremulRgba8 {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// Source-over `src` onto `dst` with its top-left corner at (`dx`, `dy`), clipped to `dst`.
pub fn blit_over(dst: &mut Surface, src: PixelView<'_>, dx: i64, dy: i64) {
    let dw = i64::from(dst.width());
    let dh = i64::from(dst.height());
    let x0 = dx.max(0);
    let y0 = dy.max(0);
    let x1 = (dx + i64::from(src.width)).min(dw);
    let y1 = (dy + i64::from(src.height)).min(dh);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    let stride = dst.width() as usize;
    let data = dst.data_mut();
    for y in y0..y1 {
        let sy = (y - dy) as u32;
        for x in x0..x1 {
            let sx = (x - dx) as u32;
            let s = src.px(sx, sy);
            if s[3] == 0 {
                continue;
            }
            let idx = ((y as usize) * stride + (x as usize)) * 4;
            let d = [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]];
            data[idx..idx + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }
}

/// Copy the `crop` region of `src` into a new premultiplied buffer.
pub fn crop(src: PixelView<'_>, crop: DirtyRect) -> Option<(u32, u32, Vec<u8>)> {
    let c = crop.clamp(src.width, src.height)?;
    let (w, h) = (c.width as u32, c.height as u32);
    let row_bytes = (w as usize) * 4;
    let mut out = Vec::with_capacity(row_bytes * h as usize);
    for y in 0..h {
        let sy = c.y as usize + y as usize;
        let start = (sy * src.width as usize + c.x as usize) * 4;
        out.extend_from_slice(&src.data[start..start + row_bytes]);
    }
    Some((w, h, out))
}

/// Resample the `crop` region of `src` to `target_w` x `target_h` and source-over it at
/// (`dx`, `dy`).
///
/// Resampling runs on premultiplied data so edge pixels do not pick up dark fringes.
pub fn blit_scaled_over(
    dst: &mut Surface,
    src: PixelView<'_>,
    crop_rect: DirtyRect,
    target_w: u32,
    target_h: u32,
    dx: i64,
    dy: i64,
) -> PadResult<()> {
    if target_w == 0 || target_h == 0 {
        return Ok(());
    }
    let Some((cw, ch, cropped)) = crop(src, crop_rect) else {
        return Ok(());
    };
    if (cw, ch) == (target_w, target_h) {
        blit_over(dst, PixelView::new(cw, ch, &cropped)?, dx, dy);
        return Ok(());
    }
    let img = image::RgbaImage::from_raw(cw, ch, cropped)
        .ok_or_else(|| PadError::validation("cropped buffer does not match its dimensions"))?;
    let resized = image::imageops::resize(&img, target_w, target_h, FilterType::Triangle);
    blit_over(
        dst,
        PixelView::new(target_w, target_h, resized.as_raw())?,
        dx,
        dy,
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
