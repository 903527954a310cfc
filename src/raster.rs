//! Scanline polygon fill for glyph outlines.
//!
//! Fills closed contours with the nonzero winding rule by computing edge
//! crossings per scanline. Counter-wound inner contours (the hole in an
//! "O") cancel the winding count and stay unfilled. Fractional span ends
//! give horizontal edge coverage; the rest of the anti-aliasing budget is
//! carried by rendering at a supersampled resolution.

use crate::canvas::Canvas;
use crate::color::Rgba8;

/// A closed polygon contour; the last point connects back to the first.
pub type Contour = Vec<(f64, f64)>;

/// Fill `contours` with `color` using the nonzero winding rule.
///
/// Contours are in canvas pixel coordinates, y growing downward. Degenerate
/// contours (fewer than 3 points) are ignored.
pub fn fill_contours(canvas: &mut Canvas, contours: &[Contour], color: Rgba8) {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for contour in contours {
        for &(_, y) in contour {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !y_min.is_finite() || y_max <= y_min {
        return;
    }

    let row_start = (y_min.floor() as i32).max(0);
    let row_end = (y_max.ceil() as i32).min(canvas.height() as i32 - 1);

    // (crossing x, winding direction) pairs, reused across scanlines.
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for row in row_start..=row_end {
        let yc = row as f64 + 0.5;
        crossings.clear();

        for contour in contours {
            if contour.len() < 3 {
                continue;
            }
            let n = contour.len();
            for i in 0..n {
                let (x0, y0) = contour[i];
                let (x1, y1) = contour[(i + 1) % n];
                if y0 == y1 {
                    continue;
                }
                // Half-open interval avoids double-counting shared vertices.
                let (lo, hi, dir) = if y1 > y0 {
                    (y0, y1, 1)
                } else {
                    (y1, y0, -1)
                };
                if yc >= lo && yc < hi {
                    let t = (yc - y0) / (y1 - y0);
                    crossings.push((x0 + t * (x1 - x0), dir));
                }
            }
        }

        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        let mut span_start = 0.0;
        for &(x, dir) in crossings.iter() {
            let was_inside = winding != 0;
            winding += dir;
            if !was_inside && winding != 0 {
                span_start = x;
            } else if was_inside && winding == 0 {
                canvas.blend_span(row, span_start, x, color);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    }

    #[test]
    fn test_fill_axis_aligned_rect() {
        let mut c = Canvas::new(10, 10);
        fill_contours(&mut c, &[rect(2.0, 2.0, 8.0, 8.0)], Rgba8::WHITE);
        assert_eq!(c.pixel(5, 5).a, 255);
        assert_eq!(c.pixel(2, 2).a, 255);
        assert_eq!(c.pixel(1, 5).a, 0);
        assert_eq!(c.pixel(5, 1).a, 0);
        assert_eq!(c.pixel(8, 8).a, 0); // half-open: rows/cols 8 are outside
    }

    #[test]
    fn test_nonzero_winding_hole() {
        // Outer clockwise rect with counter-wound inner rect leaves a hole.
        let outer = rect(1.0, 1.0, 11.0, 11.0);
        let inner: Contour = rect(4.0, 4.0, 8.0, 8.0).into_iter().rev().collect();
        let mut c = Canvas::new(12, 12);
        fill_contours(&mut c, &[outer, inner], Rgba8::WHITE);
        assert_eq!(c.pixel(2, 6).a, 255); // ring
        assert_eq!(c.pixel(6, 6).a, 0); // hole
        assert_eq!(c.pixel(9, 6).a, 255); // ring on far side
    }

    #[test]
    fn test_triangle_partial_rows() {
        let tri: Contour = vec![(5.0, 1.0), (9.0, 9.0), (1.0, 9.0)];
        let mut c = Canvas::new(10, 10);
        fill_contours(&mut c, &[tri], Rgba8::WHITE);
        // Apex row is narrow, base row is wide.
        assert_eq!(c.pixel(5, 8).a, 255);
        assert_eq!(c.pixel(2, 8).a, 255);
        assert_eq!(c.pixel(1, 2).a, 0);
        assert_eq!(c.pixel(9, 2).a, 0);
    }

    #[test]
    fn test_degenerate_contours_ignored() {
        let mut c = Canvas::new(4, 4);
        fill_contours(&mut c, &[vec![], vec![(1.0, 1.0), (2.0, 2.0)]], Rgba8::WHITE);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(c.pixel(x, y).a, 0);
            }
        }
    }

    #[test]
    fn test_offscreen_contour_clipped() {
        let mut c = Canvas::new(4, 4);
        fill_contours(&mut c, &[rect(-10.0, -10.0, -2.0, -2.0)], Rgba8::WHITE);
        assert_eq!(c.pixel(0, 0).a, 0);
        // Partially overlapping contour fills only the visible part.
        fill_contours(&mut c, &[rect(-2.0, -2.0, 2.0, 2.0)], Rgba8::WHITE);
        assert_eq!(c.pixel(0, 0).a, 255);
        assert_eq!(c.pixel(3, 3).a, 0);
    }
}
