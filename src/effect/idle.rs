//! Idle animation
//!
//! Shown until the first scan reports networks. A rainbow rotates along the
//! strip while saturation and brightness breathe on independent periods.

use core::f32::consts::TAU;

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{Hsv, Rgb, hsv2rgb},
    math8::saturate_u8,
};

const SATURATION_PERIOD_MS: u64 = 2_500;
const BRIGHTNESS_PERIOD_MS: u64 = 5_000;

const SATURATION_BASE: f32 = 128.0;
const SATURATION_SWING: f32 = 128.0;
const BRIGHTNESS_BASE: f32 = 160.0;
const BRIGHTNESS_SWING: f32 = 96.0;

/// Rotating rainbow with breathing saturation and brightness
#[derive(Debug, Clone, Default)]
pub struct IdleAnimation {
    /// Advanced once per rendered pixel
    hue: u8,
}

impl IdleAnimation {
    pub const fn new() -> Self {
        Self { hue: 0 }
    }

    /// Current value of the hue counter
    pub const fn hue(&self) -> u8 {
        self.hue
    }

    /// Color of pixel `index` on a strip of `num_leds`, advancing the counter
    pub fn pixel(&mut self, index: usize, num_leds: usize, now: Instant) -> Hsv {
        self.hue = self.hue.wrapping_add(1);
        let spacing = 255 / num_leds.max(1);
        #[allow(clippy::cast_possible_truncation)]
        let base = (spacing * index) as u8;

        let saturation = libm::cosf(phase(now, SATURATION_PERIOD_MS));
        let brightness = libm::sinf(phase(now, BRIGHTNESS_PERIOD_MS));

        Hsv {
            hue: base.wrapping_add(self.hue),
            sat: saturate_u8(SATURATION_BASE + SATURATION_SWING * saturation),
            val: saturate_u8(BRIGHTNESS_BASE + BRIGHTNESS_SWING * brightness),
        }
    }
}

/// Angle within a period, computed on the remainder to keep f32 precision
#[allow(clippy::cast_precision_loss)]
fn phase(now: Instant, period_ms: u64) -> f32 {
    TAU * (now.as_millis() % period_ms) as f32 / period_ms as f32
}

impl Effect for IdleAnimation {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let num_leds = leds.len();
        for (index, led) in leds.iter_mut().enumerate() {
            *led = hsv2rgb(self.pixel(index, num_leds, now));
        }
    }
}
