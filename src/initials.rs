//! Initials extraction from free-form display names.
//!
//! Reduces a name like `"John Doe"` to a 1–2 character uppercase initials
//! string (`"JD"`). Tokenization splits on whitespace runs and on
//! apostrophe-like characters so `"O'Brien"` yields `"OB"` rather than
//! treating the apostrophe as part of a token.

use crate::char_class::is_letter_or_digit;

/// Characters that act as token separators in addition to whitespace:
/// straight apostrophe, grave accent, acute accent.
const APOSTROPHE_LIKE: [char; 3] = ['\'', '`', '´'];

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || APOSTROPHE_LIKE.contains(&c)
}

/// Derive display initials from a name.
///
/// Returns `None` ("no initials") when the trimmed name is empty or no token
/// survives cleanup. Otherwise the result is 1–2 characters, uppercased with
/// locale-invariant rules:
///
/// - one surviving token → its first up-to-2 characters
/// - two or more tokens → first character of the first and last tokens
///
/// ```
/// use initicon::initials_for;
///
/// assert_eq!(initials_for("John Doe").as_deref(), Some("JD"));
/// assert_eq!(initials_for("alice").as_deref(), Some("AL"));
/// assert_eq!(initials_for("O'Brien").as_deref(), Some("OB"));
/// assert_eq!(initials_for("   "), None);
/// ```
pub fn initials_for(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<String> = trimmed
        .split(is_separator)
        .map(|t| t.chars().filter(|&c| is_letter_or_digit(c)).collect())
        .filter(|t: &String| !t.is_empty())
        .collect();

    let initials: String = match tokens.as_slice() {
        [] => return None,
        [single] => single.chars().take(2).collect(),
        [first, .., last] => {
            let mut s = String::new();
            s.extend(first.chars().next());
            s.extend(last.chars().next());
            s
        }
    };

    Some(initials.to_uppercase())
}

// ============================================================================
// Tests
// ============================================================================
