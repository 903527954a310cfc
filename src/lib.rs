//! # initicon
//!
//! Deterministic initials badge ("identicon") generation — derives a small
//! avatar image from an arbitrary input string such as a display name.
//!
//! Given the same name and configuration the crate always produces the same
//! initials and the same background color, so badges can be generated
//! statelessly and cached by key. It features:
//!
//! - Unicode-aware initials extraction from free-form names
//! - Deterministic text → color mapping via pluggable 32-bit hash strategies
//!   (FNV-1a default, canonical Murmur3 x86 32-bit)
//! - HSL color model with bit-exact truncating channel conversion
//! - CPU-only rendering: supersampled canvas, scanline glyph fill,
//!   high-quality downsampling (Catmull-Rom / Lanczos kernels)
//! - TrueType text measurement and outline extraction via `ttf-parser`
//!
//! ## Pipeline
//!
//! 1. **Initials** — tokenize the name, keep letters/digits, take 1–2 chars
//! 2. **Color** — hash the text, normalize to a hue, convert HSL → RGB
//! 3. **Render** — fill the background (square or inscribed circle), draw
//!    the centered text at a supersampled resolution
//! 4. **Downsample** — resample to the final size with a quality filter
//!
//! ```no_run
//! use initicon::{BadgeConfig, BadgeGenerator, FontLibrary, TtfFont};
//!
//! # fn main() -> Result<(), initicon::Error> {
//! let data = std::fs::read("sans.ttf").expect("font file");
//! let mut fonts = FontLibrary::new();
//! fonts.register("sans", TtfFont::from_bytes(data)?);
//!
//! let generator = BadgeGenerator::new(BadgeConfig::default(), fonts)?;
//! let badge = generator.create_image("John Doe")?;
//! assert_eq!(badge.width(), 64);
//! # Ok(())
//! # }
//! ```

// Foundation
pub mod basics;
pub mod char_class;
pub mod color;
pub mod error;
pub mod hash;
pub mod initials;

// Rendering
pub mod canvas;
pub mod font;
pub mod raster;
pub mod resample;

// Orchestration
pub mod generator;

pub use canvas::Canvas;
pub use color::{Hsl, Rgba8};
pub use error::Error;
pub use font::{FontLibrary, GlyphSource, TtfFont};
pub use generator::{BadgeConfig, BadgeGenerator};
pub use hash::{Fnv1a, Murmur3, TextHasher};
pub use initials::initials_for;
pub use resample::FilterKernel;
