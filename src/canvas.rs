//! Owned RGBA8 canvas with blending and shape fills.
//!
//! The canvas is both the supersampled render target and the final badge
//! image: a width × height buffer of non-premultiplied RGBA bytes, fully
//! transparent on allocation. Blending is source-over with an 8-bit
//! coverage value, so shape edges can carry fractional coverage.

use crate::basics::{cover_from_fraction, COVER_FULL};
use crate::color::Rgba8;

/// A width × height RGBA8 pixel buffer.
///
/// Rows are stored top-down, 4 bytes per pixel in R, G, B, A order. The
/// buffer is owned; a finished badge is returned to the caller by value and
/// intermediate buffers are dropped when rendering completes.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major top-down.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the canvas, returning the raw RGBA bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read the pixel at (x, y). Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        Rgba8::new(self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3])
    }

    /// Overwrite the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, c: Rgba8) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        self.data[o] = c.r;
        self.data[o + 1] = c.g;
        self.data[o + 2] = c.b;
        self.data[o + 3] = c.a;
    }

    /// Overwrite every pixel with `c`.
    pub fn fill(&mut self, c: Rgba8) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = c.r;
            px[1] = c.g;
            px[2] = c.b;
            px[3] = c.a;
        }
    }

    /// Source-over blend of `c` at (x, y) weighted by `cover`.
    ///
    /// Out-of-bounds coordinates are ignored rather than panicking; the
    /// raster modules clip generously and rely on this.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: Rgba8, cover: u8) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let alpha = Rgba8::multiply(c.a, cover);
        if alpha == 0 {
            return;
        }
        let o = self.offset(x as u32, y as u32);
        let px = &mut self.data[o..o + 4];
        px[0] = Rgba8::lerp(px[0], c.r, alpha);
        px[1] = Rgba8::lerp(px[1], c.g, alpha);
        px[2] = Rgba8::lerp(px[2], c.b, alpha);
        px[3] = Rgba8::lerp(px[3], 255, alpha);
    }

    /// Blend a horizontal run of pixels at row `y`, columns `x..x + len`.
    pub fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: Rgba8, cover: u8) {
        if y < 0 || y as u32 >= self.height || len == 0 {
            return;
        }
        let x0 = x.max(0) as u32;
        let x1 = (x + len as i32).clamp(0, self.width as i32) as u32;
        let alpha = Rgba8::multiply(c.a, cover);
        if alpha == 0 || x1 <= x0 {
            return;
        }
        let o = self.offset(x0, y as u32);
        let run = &mut self.data[o..o + (x1 - x0) as usize * 4];
        for px in run.chunks_exact_mut(4) {
            px[0] = Rgba8::lerp(px[0], c.r, alpha);
            px[1] = Rgba8::lerp(px[1], c.g, alpha);
            px[2] = Rgba8::lerp(px[2], c.b, alpha);
            px[3] = Rgba8::lerp(px[3], 255, alpha);
        }
    }

    /// Blend the fractional span `[x0, x1)` on row `y`.
    ///
    /// Interior pixels get full coverage; the partially covered pixels at
    /// either end get fractional coverage. This is the primitive both the
    /// circle fill and the polygon raster sit on.
    pub fn blend_span(&mut self, y: i32, x0: f64, x1: f64, c: Rgba8) {
        if y < 0 || y as u32 >= self.height {
            return;
        }
        let x0 = x0.max(0.0);
        let x1 = x1.min(self.width as f64);
        if x1 <= x0 {
            return;
        }

        let first = x0.floor() as i32;
        let last = (x1.ceil() as i32 - 1).max(first);

        if first == last {
            // Span starts and ends within a single pixel.
            self.blend_pixel(first, y, c, cover_from_fraction(x1 - x0));
            return;
        }

        let head_cover = cover_from_fraction((first + 1) as f64 - x0);
        self.blend_pixel(first, y, c, head_cover);

        let interior = last - first - 1;
        if interior > 0 {
            self.blend_hline(first + 1, y, interior as u32, c, COVER_FULL);
        }

        let tail_cover = cover_from_fraction(x1 - last as f64);
        self.blend_pixel(last, y, c, tail_cover);
    }

    /// Fill a circle with exact per-scanline spans.
    ///
    /// Pixels outside the circle are left untouched, so a transparent canvas
    /// keeps transparent corners. Edge pixels receive fractional horizontal
    /// coverage; the supersample/downsample pass smooths the remainder.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, c: Rgba8) {
        if radius <= 0.0 {
            return;
        }
        let y_min = ((cy - radius).floor() as i32).max(0);
        let y_max = ((cy + radius).ceil() as i32).min(self.height as i32 - 1);
        for y in y_min..=y_max {
            let dy = (y as f64 + 0.5) - cy;
            let dist_sq = radius * radius - dy * dy;
            if dist_sq <= 0.0 {
                continue;
            }
            let half = dist_sq.sqrt();
            self.blend_span(y, cx - half, cx + half, c);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
