//! Coercion of user-typed quantity text.
//!
//! One rule, used by every entry point: trim, accept ASCII digits with an
//! optional fractional part, truncate the fraction toward zero, and require the
//! result to be positive.

use thiserror::Error;

/// Why a piece of text is not a usable quantity.
///
/// These never escape the input layer as failures; callers treat all of them as
/// "nothing entered yet".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    #[error("no quantity entered")]
    Empty,

    #[error("not a whole non-negative number")]
    Unparseable,

    #[error("quantity must be greater than zero")]
    NotPositive,
}

/// Parse a typed box or piece count.
///
/// `"12"` → 12, `" 2.7 "` → 2, `"5."` → 5. Signs, exponents, separators and
/// anything that truncates to 0 are rejected.
pub fn parse_entry(raw: &str) -> Result<u64, EntryError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(EntryError::Empty);
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };

    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(EntryError::Unparseable);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EntryError::Unparseable);
    }
    if !fraction.unwrap_or_default().bytes().all(|b| b.is_ascii_digit()) {
        return Err(EntryError::Unparseable);
    }

    // ".5" truncates to zero
    let value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| EntryError::Unparseable)?
    };

    if value == 0 {
        return Err(EntryError::NotPositive);
    }
    Ok(value)
}
