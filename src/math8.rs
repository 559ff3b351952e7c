//! 8-bit math helpers and explicit numeric conversions.
//!
//! Float to integer conversions in the color math go through the named
//! helpers below instead of bare `as` casts.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Truncate toward zero and saturate into `0..=255`.
///
/// NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn saturate_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    libm::truncf(value).clamp(0.0, 255.0) as u8
}

/// Truncate toward zero into an `i32`, saturating at the type bounds.
///
/// NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn truncate_to_int(value: f32) -> i32 {
    // `as` already saturates and maps NaN to 0
    value as i32
}
