//! Character classification for token cleanup.
//!
//! Decides whether a character contributes to a name token. Letters of any
//! script and numeric digits count; punctuation, marks, symbols, and
//! whitespace do not.

/// Returns `true` if `c` is a Unicode letter or numeric digit.
///
/// Pure and total — every `char` classifies one way or the other.
#[inline]
pub fn is_letter_or_digit(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

// ============================================================================
// Tests
// ============================================================================
