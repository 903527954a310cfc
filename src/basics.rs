//! Foundation helpers shared by the raster modules.
//!
//! Rounding and clamping primitives used when converting between the f64
//! coordinate space of shapes and glyph outlines and integer pixel positions.

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round a non-negative double to the nearest unsigned integer.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Clamp a value into `[0.0, 1.0]`.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Full anti-aliasing coverage for one pixel.
pub const COVER_FULL: u8 = 255;

/// Convert a fractional coverage in `[0.0, 1.0]` to an 8-bit cover value.
#[inline]
pub fn cover_from_fraction(f: f64) -> u8 {
    uround(clamp01(f) * COVER_FULL as f64) as u8
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iround_halfway() {
        assert_eq!(iround(2.5), 3);
        assert_eq!(iround(-2.5), -3);
        assert_eq!(iround(0.0), 0);
    }

    #[test]
    fn test_uround() {
        assert_eq!(uround(0.49), 0);
        assert_eq!(uround(0.5), 1);
        assert_eq!(uround(254.6), 255);
    }

    #[test]
    fn test_cover_from_fraction_bounds() {
        assert_eq!(cover_from_fraction(0.0), 0);
        assert_eq!(cover_from_fraction(1.0), 255);
        assert_eq!(cover_from_fraction(2.0), 255);
        assert_eq!(cover_from_fraction(-1.0), 0);
        assert_eq!(cover_from_fraction(0.5), 128);
    }
}
