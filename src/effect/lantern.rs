//! Signal-driven lantern flicker

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{GradientPalette, Rgb},
    flicker::FlickerEngine,
    scan::AggregateScanState,
};

/// Colors every pixel from the latest scan aggregate
#[derive(Debug, Clone)]
pub struct LanternEffect<const P: usize> {
    engine: FlickerEngine,
    palette: GradientPalette<P>,
    aggregate: AggregateScanState,
}

impl<const P: usize> LanternEffect<P> {
    pub const fn new(engine: FlickerEngine, palette: GradientPalette<P>) -> Self {
        Self {
            engine,
            palette,
            aggregate: AggregateScanState::UNSEEN,
        }
    }

    pub const fn engine(&self) -> &FlickerEngine {
        &self.engine
    }

    /// Use a new aggregate from the next frame on
    pub fn set_aggregate(&mut self, aggregate: AggregateScanState) {
        self.aggregate = aggregate;
    }
}

impl<const P: usize> Effect for LanternEffect<P> {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        for (index, led) in leds.iter_mut().enumerate() {
            *led = self
                .engine
                .render_pixel(&self.palette, index, &self.aggregate, now);
        }
    }
}
