//! Crate error type.

/// Errors surfaced by badge generation.
///
/// Empty or unusable names are not errors — they fall back to the configured
/// fallback text. Hashing and color mapping are total and never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration field violates its invariant (zero sizes,
    /// out-of-range saturation/lightness, non-positive font size factor).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The font bytes could not be parsed as a TrueType/OpenType face.
    #[error("failed to parse font face")]
    FontParse(#[from] ttf_parser::FaceParsingError),

    /// The configured font family has not been registered.
    #[error("unknown font family `{0}`")]
    UnknownFontFamily(String),
}
