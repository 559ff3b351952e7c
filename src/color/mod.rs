mod palette;

pub use palette::{CB_SPECTRAL, GradientPalette, GradientStop};
pub use smart_leds::hsv::hsv2rgb;
use smart_leds::{RGB8, hsv::Hsv as HSV};

use crate::math8::blend8;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}
