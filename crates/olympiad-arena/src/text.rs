//! String helpers that write into a region.
//!
//! Entity lists borrow their names; when a name's storage is transient
//! (a text-input buffer, a frame-scoped label) copy it into a long-lived
//! region with [`dup`] first and borrow from there.

use crate::error::ArenaError;
use crate::handle::Span;
use crate::region::Region;

/// Copy `s` into `region`.
pub fn dup(region: &mut Region, s: &str) -> Result<Span, ArenaError> {
    region.alloc_copy(s.as_bytes(), 1)
}

/// Concatenate `a` and `b` into a fresh allocation.
pub fn cat(region: &mut Region, a: &str, b: &str) -> Result<Span, ArenaError> {
    let span = region.alloc(a.len() + b.len(), 1)?;
    let bytes = region.bytes_mut(span);
    bytes[..a.len()].copy_from_slice(a.as_bytes());
    bytes[a.len()..].copy_from_slice(b.as_bytes());
    Ok(span)
}

/// Decimal rendering of `n`.
pub fn from_u32(region: &mut Region, n: u32) -> Result<Span, ArenaError> {
    let mut digits = [0u8; 10];
    let mut at = digits.len();
    let mut rest = n;
    loop {
        at -= 1;
        digits[at] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    region.alloc_copy(&digits[at..], 1)
}

/// Byte-for-byte equality, the comparison entity lookup uses.
pub fn eq(a: &str, b: &str) -> bool {
    a.as_bytes() == b.as_bytes()
}

/// `s` without leading or trailing ASCII whitespace.
pub fn strip_whitespace(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}
