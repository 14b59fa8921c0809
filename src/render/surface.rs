use crate::foundation::core::{Rect, Rgba8Premul};

/// Integer pixel rectangle, clamped against a surface before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    /// Smallest pixel rect covering `r` (in pixel space), grown by `pad` on every side.
    pub fn covering(r: Rect, pad: i32) -> Self {
        let x0 = r.x0.floor() as i32 - pad;
        let y0 = r.y0.floor() as i32 - pad;
        let x1 = r.x1.ceil() as i32 + pad;
        let y1 = r.y1.ceil() as i32 + pad;
        Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(1),
            height: (y1 - y0).max(1),
        }
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<DirtyRect> {
        let max_w = i32::try_from(width).unwrap_or(i32::MAX);
        let max_h = i32::try_from(height).unwrap_or(i32::MAX);
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.x.saturating_add(self.width).clamp(0, max_w);
        let y1 = self.y.saturating_add(self.height).clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(DirtyRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// The drawing surface: a premultiplied RGBA8 pixel buffer plus its device pixel ratio.
///
/// Stroke coordinates are logical; they map to pixels through `pixel_ratio`.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    data: Vec<u8>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: clamp_ratio(pixel_ratio),
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Wrap premultiplied RGBA8 bytes. Returns `None` on a length mismatch.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        pixel_ratio: f64,
        data: Vec<u8>,
    ) -> Option<Self> {
        if data.len() != byte_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixel_ratio: clamp_ratio(pixel_ratio),
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Premultiplied RGBA8, row-major, tightly packed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn is_zero_sized(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reallocate to new dimensions. Prior content is discarded.
    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = clamp_ratio(pixel_ratio);
        self.data = vec![0; byte_len(width, height)];
    }

    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Replace every fully transparent pixel with `color`. Returns the number replaced.
    pub fn flatten_transparent(&mut self, color: Rgba8Premul) -> usize {
        let px = color.to_array();
        let mut n = 0;
        for dst in self.data.chunks_exact_mut(4) {
            if dst[3] == 0 {
                dst.copy_from_slice(&px);
                n += 1;
            }
        }
        n
    }

    /// True when every pixel is either fully transparent or exactly `background`.
    pub fn is_blank(&self, background: Rgba8Premul) -> bool {
        let bg = background.to_array();
        self.data
            .chunks_exact(4)
            .all(|px| px[3] == 0 || px == bg.as_slice())
    }
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() { ratio.max(1.0) } else { 1.0 }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
