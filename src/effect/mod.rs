//! Frame effects
//!
//! Each effect fills a whole frame for a given instant.

mod idle;
mod lantern;

use embassy_time::Instant;
pub use idle::IdleAnimation;
pub use lantern::LanternEffect;

use crate::color::Rgb;

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);
}
