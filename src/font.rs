//! Text measurement and glyph outline extraction.
//!
//! [`GlyphSource`] is the seam between the badge renderer and whatever
//! provides glyphs: the renderer only needs vertical metrics, advances, and
//! flattened outline contours. [`TtfFont`] implements it over `ttf-parser`
//! for TrueType/OpenType faces; tests substitute synthetic sources.
//!
//! Outlines are delivered flattened to polygons in pixel coordinates with
//! y growing downward and the baseline at y = 0, ready for the scanline
//! raster.

use std::collections::HashMap;

use crate::raster::Contour;
use crate::Error;

/// A glyph prepared for rendering at a specific pixel size.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Horizontal advance in pixels.
    pub advance: f64,
    /// Flattened outline contours, baseline-relative, y-down. Empty for
    /// glyphs without an outline (spaces).
    pub contours: Vec<Contour>,
}

/// Measured extents of a text run using typographic metrics: the width is
/// the advance sum (no inter-glyph padding) and the height is
/// ascent + descent, shared by measurement and drawing so centered text
/// cannot drift.
#[derive(Debug, Clone, Copy)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
    /// Distance from the top of the extents box down to the baseline.
    pub ascent: f64,
}

/// Provider of glyph outlines and metrics at arbitrary pixel sizes.
///
/// Implementations must be pure with respect to `(ch, size)` so repeated
/// renders stay pixel-identical.
pub trait GlyphSource: Send + Sync {
    /// Vertical metrics at `size` pixels: `(ascent, descent)`, both ≥ 0,
    /// with descent measured downward from the baseline.
    fn vertical_metrics(&self, size: f64) -> (f64, f64);

    /// Prepare the glyph for `ch` at `size` pixels, or `None` when the
    /// character has no mapping.
    fn glyph(&self, ch: char, size: f64) -> Option<Glyph>;

    /// Horizontal kerning adjustment between two characters, in pixels.
    fn kerning(&self, _left: char, _right: char, _size: f64) -> f64 {
        0.0
    }
}

/// Measure `text` at `size` pixels. Unmapped characters contribute nothing.
pub fn measure_text(source: &dyn GlyphSource, text: &str, size: f64) -> TextExtents {
    let (ascent, descent) = source.vertical_metrics(size);
    let mut width = 0.0;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if let Some(glyph) = source.glyph(ch, size) {
            if let Some(p) = prev {
                width += source.kerning(p, ch, size);
            }
            width += glyph.advance;
            prev = Some(ch);
        }
    }
    TextExtents {
        width,
        height: ascent + descent,
        ascent,
    }
}

// ============================================================================
// TtfFont
// ============================================================================

/// A TrueType/OpenType face loaded from raw bytes.
///
/// The face is re-parsed per operation from the owned bytes — `ttf-parser`
/// parsing is cheap table indexing, and this keeps the type free of
/// self-referential lifetimes.
pub struct TtfFont {
    data: Vec<u8>,
}

impl TtfFont {
    /// Load a face from raw TTF/OTF bytes, validating that it parses.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        ttf_parser::Face::parse(&data, 0)?;
        Ok(Self { data })
    }

    fn face(&self) -> ttf_parser::Face<'_> {
        // Validated in from_bytes; parsing cannot fail afterwards.
        ttf_parser::Face::parse(&self.data, 0).expect("font data validated at construction")
    }

    fn scale(face: &ttf_parser::Face<'_>, size: f64) -> f64 {
        size / face.units_per_em() as f64
    }
}

impl GlyphSource for TtfFont {
    fn vertical_metrics(&self, size: f64) -> (f64, f64) {
        let face = self.face();
        let scale = Self::scale(&face, size);
        let ascent = face.ascender() as f64 * scale;
        let descent = -(face.descender() as f64) * scale;
        (ascent, descent.max(0.0))
    }

    fn glyph(&self, ch: char, size: f64) -> Option<Glyph> {
        let face = self.face();
        let glyph_id = face.glyph_index(ch)?;
        let scale = Self::scale(&face, size);

        let advance = face
            .glyph_hor_advance(glyph_id)
            .map(|a| a as f64 * scale)
            .unwrap_or(0.0);

        let mut collector = OutlineFlattener::new(scale);
        // None means no outline (space etc.) — still a valid glyph.
        face.outline_glyph(glyph_id, &mut collector);

        Some(Glyph {
            advance,
            contours: collector.finish(),
        })
    }

    fn kerning(&self, left: char, right: char, size: f64) -> f64 {
        let face = self.face();
        let (Some(l), Some(r)) = (face.glyph_index(left), face.glyph_index(right)) else {
            return 0.0;
        };
        let scale = Self::scale(&face, size);
        if let Some(kern) = face.tables().kern {
            for subtable in kern.subtables {
                if subtable.horizontal && !subtable.has_cross_stream {
                    if let Some(value) = subtable.glyphs_kerning(l, r) {
                        return value as f64 * scale;
                    }
                }
            }
        }
        0.0
    }
}

// ============================================================================
// OutlineFlattener — ttf_parser::OutlineBuilder that flattens curves
// ============================================================================

/// Collects glyph outline commands, flattening quadratic and cubic Béziers
/// into line segments. Font coordinates (y-up, font units) are scaled to
/// pixels and flipped to y-down as they arrive.
struct OutlineFlattener {
    scale: f64,
    contours: Vec<Contour>,
    current: Contour,
    last: (f64, f64),
}

impl OutlineFlattener {
    fn new(scale: f64) -> Self {
        Self {
            scale,
            contours: Vec::new(),
            current: Vec::new(),
            last: (0.0, 0.0),
        }
    }

    #[inline]
    fn point(&self, x: f32, y: f32) -> (f64, f64) {
        (x as f64 * self.scale, -(y as f64) * self.scale)
    }

    /// Segment count for a curve whose control net spans `net` pixels.
    fn steps_for(net: f64) -> usize {
        ((net / 3.0).ceil() as usize).clamp(2, 32)
    }

    fn finish(mut self) -> Vec<Contour> {
        if self.current.len() >= 3 {
            self.contours.push(std::mem::take(&mut self.current));
        }
        self.contours
    }
}

impl ttf_parser::OutlineBuilder for OutlineFlattener {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.current.len() >= 3 {
            self.contours.push(std::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
        let p = self.point(x, y);
        self.current.push(p);
        self.last = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.current.push(p);
        self.last = p;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.point(x1, y1);
        let p = self.point(x, y);
        let a = self.last;
        let net = dist(a, c) + dist(c, p);
        let steps = Self::steps_for(net);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let px = u * u * a.0 + 2.0 * u * t * c.0 + t * t * p.0;
            let py = u * u * a.1 + 2.0 * u * t * c.1 + t * t * p.1;
            self.current.push((px, py));
        }
        self.last = p;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.point(x1, y1);
        let c2 = self.point(x2, y2);
        let p = self.point(x, y);
        let a = self.last;
        let net = dist(a, c1) + dist(c1, c2) + dist(c2, p);
        let steps = Self::steps_for(net);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let px = u * u * u * a.0
                + 3.0 * u * u * t * c1.0
                + 3.0 * u * t * t * c2.0
                + t * t * t * p.0;
            let py = u * u * u * a.1
                + 3.0 * u * u * t * c1.1
                + 3.0 * u * t * t * c2.1
                + t * t * t * p.1;
            self.current.push((px, py));
        }
        self.last = p;
    }

    fn close(&mut self) {
        if self.current.len() >= 3 {
            self.contours.push(std::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
    }
}

#[inline]
fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

// ============================================================================
// FontLibrary
// ============================================================================

/// Registry of glyph sources keyed by family name.
///
/// The badge configuration names a family; the generator resolves it here
/// and fails with [`Error::UnknownFontFamily`] when it is missing.
#[derive(Default)]
pub struct FontLibrary {
    families: HashMap<String, Box<dyn GlyphSource>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a glyph source under `family`, replacing any previous one.
    pub fn register<S: GlyphSource + 'static>(&mut self, family: &str, source: S) {
        log::debug!("registering font family `{family}`");
        self.families.insert(family.to_string(), Box::new(source));
    }

    /// Look up a family.
    pub fn get(&self, family: &str) -> Option<&dyn GlyphSource> {
        self.families.get(family).map(|s| s.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-metrics source whose glyphs are solid unit squares.
    struct BoxFont;

    impl GlyphSource for BoxFont {
        fn vertical_metrics(&self, size: f64) -> (f64, f64) {
            (size * 0.8, size * 0.2)
        }

        fn glyph(&self, ch: char, size: f64) -> Option<Glyph> {
            if ch == ' ' {
                return Some(Glyph {
                    advance: size * 0.5,
                    contours: Vec::new(),
                });
            }
            ch.is_ascii_graphic().then(|| Glyph {
                advance: size * 0.6,
                contours: vec![vec![
                    (0.0, -size * 0.7),
                    (size * 0.5, -size * 0.7),
                    (size * 0.5, 0.0),
                    (0.0, 0.0),
                ]],
            })
        }

        fn kerning(&self, left: char, right: char, _size: f64) -> f64 {
            if left == 'A' && right == 'V' {
                -1.0
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_measure_sums_advances() {
        let ext = measure_text(&BoxFont, "AB", 10.0);
        assert!((ext.width - 12.0).abs() < 1e-9);
        assert!((ext.height - 10.0).abs() < 1e-9);
        assert!((ext.ascent - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_applies_kerning() {
        let ext = measure_text(&BoxFont, "AV", 10.0);
        assert!((ext.width - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_skips_unmapped_chars() {
        let ext = measure_text(&BoxFont, "A\u{7f}B", 10.0);
        assert!((ext.width - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_empty_text() {
        let ext = measure_text(&BoxFont, "", 10.0);
        assert_eq!(ext.width, 0.0);
        assert!((ext.height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_space_glyph_has_advance_but_no_outline() {
        let g = BoxFont.glyph(' ', 10.0).unwrap();
        assert!(g.contours.is_empty());
        assert!((g.advance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_ttf_font_rejects_garbage() {
        assert!(matches!(
            TtfFont::from_bytes(vec![0, 1, 2, 3]),
            Err(Error::FontParse(_))
        ));
        assert!(TtfFont::from_bytes(Vec::new()).is_err());
    }

    #[test]
    fn test_library_lookup() {
        let mut lib = FontLibrary::new();
        assert!(lib.is_empty());
        assert!(lib.get("sans").is_none());
        lib.register("sans", BoxFont);
        assert!(lib.get("sans").is_some());
        assert!(lib.get("serif").is_none());
    }

    #[test]
    fn test_flattener_quad_is_subdivided() {
        use ttf_parser::OutlineBuilder;
        let mut f = OutlineFlattener::new(1.0);
        f.move_to(0.0, 0.0);
        f.quad_to(50.0, 100.0, 100.0, 0.0);
        f.line_to(0.0, 0.0);
        f.close();
        let contours = f.finish();
        assert_eq!(contours.len(), 1);
        // More vertices than the 3 command endpoints: the curve got flattened.
        assert!(contours[0].len() > 5, "got {}", contours[0].len());
        // Y is flipped: the curve bulges downward coordinates-wise (negative y).
        assert!(contours[0].iter().any(|&(_, y)| y < -10.0));
    }
}
