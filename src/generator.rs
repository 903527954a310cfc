//! Badge generation: configuration and the public entry points.
//!
//! [`BadgeGenerator`] ties the pipeline together — initials extraction,
//! deterministic color mapping, supersampled rendering, and downsampling.
//! It holds no per-call state: every generation allocates its own buffers
//! and independent calls may run concurrently.

use crate::canvas::Canvas;
use crate::color::{color_from_text, Rgba8};
use crate::font::{measure_text, FontLibrary};
use crate::hash::{Fnv1a, TextHasher};
use crate::initials::initials_for;
use crate::raster::fill_contours;
use crate::resample::{resample, FilterKernel};
use crate::Error;

/// Text color used when no override is given.
const DEFAULT_TEXT_COLOR: Rgba8 = Rgba8::WHITE;

// ============================================================================
// BadgeConfig
// ============================================================================

/// Badge generation configuration.
///
/// Constructed once and reused across calls. The supersampled render size is
/// `render_size_factor × output_size`; the font size is the render size
/// divided by `font_size_factor`.
#[derive(Debug, Clone)]
pub struct BadgeConfig {
    /// Final badge dimensions in pixels (square). Must be > 0.
    pub output_size: u32,
    /// Supersampling multiplier. Must be > 0; 1 disables supersampling.
    pub render_size_factor: u32,
    /// Divisor deriving the font size from the render size. Must be > 0.
    pub font_size_factor: f64,
    /// Font family resolved through the [`FontLibrary`].
    pub font_family: String,
    /// Background saturation in `[0, 1]`.
    pub saturation: f64,
    /// Background lightness in `[0, 1]`.
    pub lightness: f64,
    /// Circular badge (corners transparent) instead of a filled square.
    pub round: bool,
    /// Text rendered when a name yields no initials. May be empty, in which
    /// case such badges are background-only.
    pub fallback_text: String,
    /// Downsampling kernel.
    pub filter: FilterKernel,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            output_size: 64,
            render_size_factor: 4,
            font_size_factor: 2.4,
            font_family: "sans".to_string(),
            saturation: 0.65,
            lightness: 0.45,
            round: false,
            fallback_text: "?".to_string(),
            filter: FilterKernel::default(),
        }
    }
}

impl BadgeConfig {
    /// Supersampled canvas edge length in pixels.
    pub fn render_size(&self) -> u32 {
        self.render_size_factor * self.output_size
    }

    /// Font size in pixels at the render resolution.
    pub fn font_size(&self) -> f64 {
        self.render_size() as f64 / self.font_size_factor
    }

    fn validate(&self) -> Result<(), Error> {
        if self.output_size == 0 {
            return Err(Error::InvalidConfig("output_size must be positive".into()));
        }
        if self.render_size_factor == 0 {
            return Err(Error::InvalidConfig(
                "render_size_factor must be positive".into(),
            ));
        }
        if self
            .render_size_factor
            .checked_mul(self.output_size)
            .is_none()
        {
            return Err(Error::InvalidConfig("render size overflows u32".into()));
        }
        if !(self.font_size_factor.is_finite() && self.font_size_factor > 0.0) {
            return Err(Error::InvalidConfig(
                "font_size_factor must be positive and finite".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.saturation) {
            return Err(Error::InvalidConfig("saturation must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.lightness) {
            return Err(Error::InvalidConfig("lightness must be in [0, 1]".into()));
        }
        Ok(())
    }
}

// ============================================================================
// BadgeGenerator
// ============================================================================

/// Stateless badge generator over a validated configuration, a font
/// library, and a hash strategy.
pub struct BadgeGenerator {
    config: BadgeConfig,
    fonts: FontLibrary,
    hasher: Box<dyn TextHasher + Send + Sync>,
}

impl BadgeGenerator {
    /// Create a generator with the default FNV-1a hash strategy.
    pub fn new(config: BadgeConfig, fonts: FontLibrary) -> Result<Self, Error> {
        Self::with_hasher(config, fonts, Box::new(Fnv1a))
    }

    /// Create a generator with an explicit hash strategy.
    pub fn with_hasher(
        config: BadgeConfig,
        fonts: FontLibrary,
        hasher: Box<dyn TextHasher + Send + Sync>,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            fonts,
            hasher,
        })
    }

    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    /// Derive display initials from a name. See [`initials_for`].
    pub fn initials(&self, name: &str) -> Option<String> {
        initials_for(name)
    }

    /// Deterministically map text to an opaque background color using the
    /// configured saturation, lightness, and hash strategy.
    pub fn color_from_text(&self, text: &str) -> Rgba8 {
        color_from_text(
            text,
            self.config.saturation,
            self.config.lightness,
            self.hasher.as_ref(),
        )
    }

    /// Generate a badge from a display name.
    ///
    /// The name is reduced to initials (the configured fallback text is
    /// substituted when none can be derived) and the background color is
    /// derived from the full name, so names sharing initials still get
    /// distinct colors.
    pub fn create_image(&self, name: &str) -> Result<Canvas, Error> {
        let text = self
            .initials(name)
            .unwrap_or_else(|| self.config.fallback_text.clone());
        let background = self.color_from_text(name);
        log::debug!(
            "badge for name (initials `{text}`, background #{:02x}{:02x}{:02x})",
            background.r,
            background.g,
            background.b
        );
        self.render(&text, DEFAULT_TEXT_COLOR, background)
    }

    /// Generate a badge from literal text, skipping initials extraction.
    ///
    /// `text_color` and `background` override the defaults (white text, a
    /// color derived from the text) when given.
    pub fn create_image_raw(
        &self,
        text: &str,
        text_color: Option<Rgba8>,
        background: Option<Rgba8>,
    ) -> Result<Canvas, Error> {
        let display = if text.is_empty() {
            self.config.fallback_text.as_str()
        } else {
            text
        };
        let background = background.unwrap_or_else(|| self.color_from_text(text));
        self.render(
            display,
            text_color.unwrap_or(DEFAULT_TEXT_COLOR),
            background,
        )
    }

    /// Render `text` onto a freshly allocated supersampled canvas and
    /// downsample to the output size.
    fn render(&self, text: &str, text_color: Rgba8, background: Rgba8) -> Result<Canvas, Error> {
        let render_size = self.config.render_size();
        let mut canvas = Canvas::new(render_size, render_size);

        if self.config.round {
            let half = render_size as f64 / 2.0;
            canvas.fill_circle(half, half, half, background);
        } else {
            canvas.fill(background);
        }

        if !text.is_empty() {
            self.draw_text(&mut canvas, text, text_color)?;
        }

        let out = resample(
            &canvas,
            self.config.output_size,
            self.config.output_size,
            self.config.filter,
        );
        log::trace!(
            "rendered `{text}` at {render_size}px, downsampled to {}px",
            self.config.output_size
        );
        Ok(out)
    }

    fn draw_text(&self, canvas: &mut Canvas, text: &str, color: Rgba8) -> Result<(), Error> {
        let font = self
            .fonts
            .get(&self.config.font_family)
            .ok_or_else(|| Error::UnknownFontFamily(self.config.font_family.clone()))?;

        let size = self.config.font_size();
        let extents = measure_text(font, text, size);
        let render_size = canvas.width() as f64;

        let origin_x = (render_size - extents.width) / 2.0;
        let origin_y = (render_size - extents.height) / 2.0;
        let baseline = origin_y + extents.ascent;

        let mut pen_x = origin_x;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            let Some(glyph) = font.glyph(ch, size) else {
                continue;
            };
            if let Some(p) = prev {
                pen_x += font.kerning(p, ch, size);
            }
            // All contours of a glyph fill together so counter-wound inner
            // contours keep their holes.
            let placed: Vec<crate::raster::Contour> = glyph
                .contours
                .iter()
                .map(|contour| {
                    contour
                        .iter()
                        .map(|&(x, y)| (x + pen_x, y + baseline))
                        .collect()
                })
                .collect();
            fill_contours(canvas, &placed, color);
            pen_x += glyph.advance;
            prev = Some(ch);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
