//! Color types and the deterministic text → color mapping.
//!
//! Provides [`Rgba8`] (8-bit non-premultiplied RGBA, the canvas pixel type)
//! and [`Hsl`], the cylindrical model badges derive their background from.
//! The hue comes from a 32-bit text hash normalized into `[0, 1)`; the
//! HSL → RGB conversion uses the canonical piecewise formula and truncating
//! channel scaling so that colors reproduce bit-exactly across
//! implementations.

use crate::hash::TextHasher;

// ============================================================================
// Rgba8
// ============================================================================

/// RGBA color, 8 bits per channel, non-premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    const BASE_SHIFT: u32 = 8;
    const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fixed-point multiply of two 8-bit values, `(a * b) / 255` with
    /// rounding.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Interpolate `p` toward `q` by `a` (fixed-point, exact at endpoints).
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }
}

// ============================================================================
// Hsl
// ============================================================================

/// Hue/saturation/lightness color. Hue is an angular position in `[0, 1)`;
/// saturation and lightness are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to an opaque [`Rgba8`].
    ///
    /// Uses the standard HSL → RGB piecewise formula: achromatic shortcut at
    /// `s == 0`, otherwise the q/p chroma intermediates with the hue-shifted
    /// channel function evaluated at `h + 1/3`, `h`, `h − 1/3`. Channels are
    /// scaled to `[0, 255]` by truncation, not rounding, for bit-exact
    /// reproduction of the reference colors.
    pub fn to_rgba8(self) -> Rgba8 {
        let (r, g, b) = if self.s == 0.0 {
            (self.l, self.l, self.l)
        } else {
            let q = if self.l < 0.5 {
                self.l * (1.0 + self.s)
            } else {
                self.l + self.s - self.l * self.s
            };
            let p = 2.0 * self.l - q;
            (
                hue_to_channel(p, q, self.h + 1.0 / 3.0),
                hue_to_channel(p, q, self.h),
                hue_to_channel(p, q, self.h - 1.0 / 3.0),
            )
        };
        Rgba8::opaque(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
        )
    }
}

/// Canonical hue-to-channel function; `t` is wrapped into `[0, 1)` first.
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ============================================================================
// Text → color mapping
// ============================================================================

/// Normalize a 32-bit hash into a hue in `[0, 1)`.
#[inline]
pub fn hue_from_hash(hash: u32) -> f64 {
    hash as f64 / 4_294_967_296.0
}

/// Deterministically map text to an opaque color.
///
/// The hue comes from the hasher; saturation and lightness are supplied by
/// the caller (normally from the badge configuration). Identical
/// `(text, saturation, lightness, hasher + seed)` always yields the
/// identical color.
pub fn color_from_text<H: TextHasher + ?Sized>(
    text: &str,
    saturation: f64,
    lightness: f64,
    hasher: &H,
) -> Rgba8 {
    let hue = hue_from_hash(hasher.hash(text));
    Hsl::new(hue, saturation, lightness).to_rgba8()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Fnv1a, Murmur3};

    #[test]
    fn test_rgba8_multiply() {
        assert_eq!(Rgba8::multiply(255, 255), 255);
        assert_eq!(Rgba8::multiply(255, 0), 0);
        assert_eq!(Rgba8::multiply(128, 255), 128);
    }

    #[test]
    fn test_rgba8_lerp_endpoints() {
        assert_eq!(Rgba8::lerp(0, 255, 0), 0);
        assert_eq!(Rgba8::lerp(0, 255, 255), 255);
        assert_eq!(Rgba8::lerp(0, 255, 128), 128);
        assert_eq!(Rgba8::lerp(100, 200, 128), 150);
    }

    #[test]
    fn test_hsl_primary_red() {
        let c = Hsl::new(0.0, 1.0, 0.5).to_rgba8();
        assert_eq!(c, Rgba8::opaque(255, 0, 0));
    }

    #[test]
    fn test_hsl_achromatic_when_saturation_zero() {
        for &h in &[0.0, 0.25, 0.37, 0.99] {
            let c = Hsl::new(h, 0.0, 0.5).to_rgba8();
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
            assert_eq!(c.r, 127); // truncation of 0.5 * 255
        }
    }

    #[test]
    fn test_hsl_lightness_extremes() {
        let black = Hsl::new(0.2, 0.65, 0.0).to_rgba8();
        assert!(black.r <= 1 && black.g <= 1 && black.b <= 1);

        let white = Hsl::new(0.2, 0.65, 1.0).to_rgba8();
        assert!(white.r >= 254 && white.g >= 254 && white.b >= 254);
    }

    #[test]
    fn test_hsl_truncation_semantics() {
        // hue 0.5 / s 0.5 / l 0.5 truncates to (63, 191, 191), not rounded.
        let c = Hsl::new(0.5, 0.5, 0.5).to_rgba8();
        assert_eq!((c.r, c.g, c.b), (63, 191, 191));

        let c = Hsl::new(0.75, 1.0, 0.5).to_rgba8();
        assert_eq!((c.r, c.g, c.b), (127, 0, 255));
    }

    #[test]
    fn test_hue_from_hash_range() {
        assert_eq!(hue_from_hash(0), 0.0);
        assert!(hue_from_hash(u32::MAX) < 1.0);
        assert!((hue_from_hash(1 << 31) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_from_text_reference_values() {
        // Precomputed against the reference formula with truncation.
        let c = color_from_text("John Doe", 0.65, 0.45, &Murmur3::new(0));
        assert_eq!((c.r, c.g, c.b, c.a), (40, 189, 115, 255));

        let c = color_from_text("John Doe", 0.65, 0.45, &Fnv1a);
        assert_eq!((c.r, c.g, c.b, c.a), (94, 189, 40, 255));
    }

    #[test]
    fn test_color_from_text_deterministic() {
        let a = color_from_text("Ada", 0.5, 0.5, &Fnv1a);
        let b = color_from_text("Ada", 0.5, 0.5, &Fnv1a);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hue_roughly_uniform() {
        // Statistical: 2000 distinct strings should spread over 10 hue bins
        // for both hashers. The floor is deliberately loose.
        for hasher in [&Fnv1a as &dyn TextHasher, &Murmur3::new(0)] {
            let mut bins = [0u32; 10];
            for i in 0..2000 {
                let hue = hue_from_hash(hasher.hash(&format!("user-{i}")));
                bins[(hue * 10.0) as usize] += 1;
            }
            for (i, &count) in bins.iter().enumerate() {
                assert!(count >= 80, "bin {i} underpopulated: {count}");
            }
        }
    }
}
