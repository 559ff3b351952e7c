#![no_std]

pub mod color;
pub mod config;
pub mod diagnostics;
pub mod effect;
pub mod flicker;
pub mod lantern;
pub mod math8;
pub mod renderer;
pub mod scan;
pub mod scheduler;

pub use config::{FlickerParams, LanternConfig};
pub use diagnostics::{DiagnosticsReport, DiagnosticsSink, FpsCounter, NoDiagnostics};
pub use flicker::{FlickerEngine, FlickerSample, flicker};
pub use lantern::Lantern;
pub use renderer::{RenderMode, Renderer};
pub use scan::{AggregateScanState, PollOutcome, ScanAggregator, ScanFacility, ScanStatus};
pub use scheduler::{PeriodicTask, Scheduler, TaskId, TickResult};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The lantern is generic over this trait.
pub trait LedDriver {
    /// Set every pixel and flush the frame to the strip
    fn write(&mut self, colors: &[Rgb]);

    /// Apply a color temperature correction to subsequent frames
    fn set_color_temperature(&mut self, _temperature: Rgb) {}

    /// Set the global brightness scale (0-255)
    fn set_brightness(&mut self, _brightness: u8) {}
}
