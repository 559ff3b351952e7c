//! Flicker engine
//!
//! Closed-form flicker driven by the network count. The count enters the
//! cosine frequency through a logarithm, so additional networks speed the
//! flicker up less and less. Every pixel gets its own phase offset so
//! neighbours never flicker in lockstep.

use core::f32::consts::TAU;

use embassy_time::Instant;

use crate::{
    color::{GradientPalette, Rgb},
    config::FlickerParams,
    math8::saturate_u8,
    scan::AggregateScanState,
};

/// Gain from perturbation to palette brightness (out of 255)
const BRIGHTNESS_GAIN: f32 = 96.0;

/// Full scale of the signal ratio, in dBm
const SIGNAL_FULL_SCALE_DBM: f32 = 100.0;

/// Brightness perturbation for `network_count` networks at `elapsed` base
/// periods and phase `angular_offset`.
///
/// Bounded by `[0, 2 * ratio]`.
pub fn flicker(
    params: &FlickerParams,
    network_count: u8,
    elapsed: f64,
    angular_offset: f32,
) -> f32 {
    let networks = f32::from(network_count) - 1.0;
    let frequency = libm::logf(networks / params.divisor + 1.0);
    // Phase is built in double precision so long uptimes keep a smooth motion
    let phase = f64::from(frequency) * elapsed + f64::from(angular_offset);
    #[allow(clippy::cast_possible_truncation)]
    let cosine = libm::cos(phase) as f32;
    params.ratio - params.ratio * cosine
}

/// Current time expressed in base flicker periods
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_periods(params: &FlickerParams, now: Instant) -> f64 {
    now.as_millis() as f64 / f64::from(params.time_period_ms)
}

/// Phase offset of pixel `index` on a strip of `num_leds` pixels
#[allow(clippy::cast_precision_loss)]
pub fn angular_offset(index: usize, num_leds: usize) -> f32 {
    libm::expf(index as f32) + TAU / num_leds.max(1) as f32
}

/// Palette coordinates of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerSample {
    pub palette_index: u8,
    pub brightness: u8,
}

/// Per-pixel color from aggregate scan data
#[derive(Debug, Clone, Copy)]
pub struct FlickerEngine {
    params: FlickerParams,
    num_leds: usize,
}

impl FlickerEngine {
    pub const fn new(params: FlickerParams, num_leds: usize) -> Self {
        Self { params, num_leds }
    }

    pub const fn params(&self) -> &FlickerParams {
        &self.params
    }

    /// Palette index and brightness of pixel `index` at time `now`.
    ///
    /// The signal ratio is not clamped; out-of-range inputs saturate at the
    /// `u8` conversion.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(
        &self,
        index: usize,
        mean_signal_strength: i32,
        network_count: u8,
        now: Instant,
    ) -> FlickerSample {
        let signal_ratio = mean_signal_strength.unsigned_abs() as f32 / SIGNAL_FULL_SCALE_DBM;
        let elapsed = elapsed_periods(&self.params, now);
        let offset = angular_offset(index, self.num_leds);
        let perturbation = flicker(&self.params, network_count, elapsed, offset);

        let heat = (signal_ratio - self.params.ratio) + perturbation;
        FlickerSample {
            palette_index: saturate_u8(libm::roundf(heat * 255.0)),
            brightness: saturate_u8(BRIGHTNESS_GAIN * perturbation),
        }
    }

    /// Final color of pixel `index`
    pub fn render_pixel<const N: usize>(
        &self,
        palette: &GradientPalette<N>,
        index: usize,
        aggregate: &AggregateScanState,
        now: Instant,
    ) -> Rgb {
        let sample = self.sample(
            index,
            aggregate.mean_signal_strength,
            aggregate.network_count,
            now,
        );
        palette.color_from_palette(sample.palette_index, sample.brightness)
    }
}
