use crate::render::composite::PixelView;
use crate::render::surface::DirtyRect;

/// Tight bounding box of the pixels that are not background.
///
/// A pixel is background when it is fully transparent or exactly the opaque `background`
/// color. Returns `None` for a blank image.
///
/// The edges are traced instead of scanning every pixel: the first hit in row order gives the
/// top edge, then rows below it are searched only left of the current left edge. The last hit
/// in row order gives the bottom edge, and rows between top and bottom are searched only right
/// of the current right edge.
pub fn content_bounds(image: PixelView<'_>, background: [u8; 3]) -> Option<DirtyRect> {
    let (w, h) = (image.width as usize, image.height as usize);
    if w == 0 || h == 0 {
        return None;
    }
    let bg = [background[0], background[1], background[2], 255];
    let is_ink = |x: usize, y: usize| {
        let i = (y * w + x) * 4;
        let px = &image.data[i..i + 4];
        px[3] != 0 && px != bg.as_slice()
    };

    let first = (0..w * h).find(|&i| is_ink(i % w, i / w))?;
    let top = first / w;
    let mut left = first % w;
    let mut right = left;

    for y in top + 1..h {
        if let Some(x) = (0..left).find(|&x| is_ink(x, y)) {
            left = x;
        }
    }

    let last = (0..w * h).rev().find(|&i| is_ink(i % w, i / w))?;
    let bottom = last / w;
    right = right.max(last % w);

    for y in (top..=bottom).rev() {
        if let Some(x) = (right + 1..w).rev().find(|&x| is_ink(x, y)) {
            right = x;
        }
    }

    Some(DirtyRect {
        x: left as i32,
        y: top as i32,
        width: (right - left + 1) as i32,
        height: (bottom - top + 1) as i32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/rescale/bounds.rs"]
mod tests;
