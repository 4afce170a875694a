//! 8-bit channel arithmetic
//!
//! Every color channel in the engine is a `u8`. These helpers keep the
//! arithmetic inside `0..=255` without branching on overflow at call sites.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems. A scale of 255
/// returns the value unchanged.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Dim a value by `amount` (0 = untouched, 255 = almost black)
///
/// Values at or below `floor` snap straight to zero so a fade always
/// terminates instead of lingering on the last few steps.
#[inline]
pub const fn fade8(value: u8, amount: u8, floor: u8) -> u8 {
    if value <= floor {
        return 0;
    }
    scale8(value, 255 - amount)
}

/// Saturating add
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Saturating subtract
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}
