use embassy_time::Instant;

use crate::color::{CB_SPECTRAL, Rgb};
use crate::config::FlickerParams;
use crate::effect::{Effect, IdleAnimation, LanternEffect};
use crate::flicker::FlickerEngine;
use crate::scan::AggregateScanState;

/// Which effect a frame is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// No networks known yet
    IdleAnimation,
    /// Flicker driven by the scan aggregate
    SignalDriven,
}

impl RenderMode {
    /// Mode for the given aggregate, decided from scratch on every frame
    pub const fn for_aggregate(aggregate: &AggregateScanState) -> Self {
        if aggregate.has_networks() {
            Self::SignalDriven
        } else {
            Self::IdleAnimation
        }
    }
}

/// Frame renderer for a strip of `N` pixels
pub struct Renderer<const N: usize> {
    frame_buffer: [Rgb; N],
    mode: RenderMode,
    idle: IdleAnimation,
    lantern: LanternEffect<9>,
}

impl<const N: usize> Renderer<N> {
    pub const fn new(params: FlickerParams) -> Self {
        Self {
            frame_buffer: [Rgb { r: 0, g: 0, b: 0 }; N],
            mode: RenderMode::IdleAnimation,
            idle: IdleAnimation::new(),
            lantern: LanternEffect::new(FlickerEngine::new(params, N), CB_SPECTRAL),
        }
    }

    /// Render one frame
    ///
    /// Picks the mode from `aggregate`, fills every pixel and returns the frame.
    pub fn render(&mut self, now: Instant, aggregate: &AggregateScanState) -> &[Rgb] {
        self.mode = RenderMode::for_aggregate(aggregate);
        match self.mode {
            RenderMode::IdleAnimation => self.idle.render(now, &mut self.frame_buffer),
            RenderMode::SignalDriven => {
                self.lantern.set_aggregate(*aggregate);
                self.lantern.render(now, &mut self.frame_buffer);
            }
        }

        &self.frame_buffer
    }

    /// Mode of the last rendered frame
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer
    }

    pub const fn idle(&self) -> &IdleAnimation {
        &self.idle
    }
}
