//! Gradient palettes
//!
//! A palette is a list of color stops over the `0..=255` index range.
//! Lookups blend linearly between the two stops surrounding the index.

use crate::{
    color::{Rgb, blend_colors},
    math8::scale8,
};

/// A single control point of a gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientStop {
    /// Position on the index range
    pub position: u8,
    pub color: Rgb,
}

impl GradientStop {
    pub const fn new(position: u8, r: u8, g: u8, b: u8) -> Self {
        Self {
            position,
            color: Rgb { r, g, b },
        }
    }
}

/// Piecewise linear gradient over `N` stops
///
/// Stops must be sorted by position. Indices before the first stop take its
/// color, indices after the last stop take the last color.
#[derive(Debug, Clone)]
pub struct GradientPalette<const N: usize> {
    stops: [GradientStop; N],
}

/// ColorBrewer "Spectral", 9 classes. Red for index 0 through blue at 255.
pub const CB_SPECTRAL: GradientPalette<9> = GradientPalette::new([
    GradientStop::new(0, 213, 62, 79),
    GradientStop::new(31, 244, 109, 67),
    GradientStop::new(63, 253, 174, 97),
    GradientStop::new(95, 254, 224, 139),
    GradientStop::new(127, 255, 255, 191),
    GradientStop::new(159, 230, 245, 152),
    GradientStop::new(191, 171, 221, 164),
    GradientStop::new(223, 102, 194, 165),
    GradientStop::new(255, 50, 136, 189),
]);

impl<const N: usize> GradientPalette<N> {
    pub const fn new(stops: [GradientStop; N]) -> Self {
        Self { stops }
    }

    pub const fn stops(&self) -> &[GradientStop; N] {
        &self.stops
    }

    /// Interpolated color at `index`
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_at(&self, index: u8) -> Rgb {
        let Some(first) = self.stops.first() else {
            return Rgb::default();
        };
        if index <= first.position {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if index > to.position {
                continue;
            }
            let span = u16::from(to.position.saturating_sub(from.position));
            if span == 0 {
                return to.color;
            }
            let local = (u16::from(index.saturating_sub(from.position)) * 255) / span;
            return blend_colors(from.color, to.color, local as u8);
        }

        self.stops.last().map_or(first.color, |stop| stop.color)
    }

    /// Interpolated color at `index`, dimmed by `brightness` (255 = unchanged)
    pub fn color_from_palette(&self, index: u8, brightness: u8) -> Rgb {
        let color = self.color_at(index);
        Rgb {
            r: scale8(color.r, brightness),
            g: scale8(color.g, brightness),
            b: scale8(color.b, brightness),
        }
    }
}
