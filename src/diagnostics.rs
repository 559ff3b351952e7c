//! Diagnostics reporting
//!
//! Optional, fire-and-forget status lines. Nothing in the core depends on a
//! sink being present.

use core::fmt;

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::print;

use crate::scan::AggregateScanState;

/// Length of a frame rate measurement window, in milliseconds
const FPS_WINDOW_MS: u64 = 1000;

/// Achieved frame rate over one-second windows
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: u16,
}

impl FpsCounter {
    pub const fn new() -> Self {
        Self {
            window_start: None,
            frames: 0,
            fps: 0,
        }
    }

    /// Frame rate of the last complete window
    pub const fn fps(&self) -> u16 {
        self.fps
    }

    /// Count a pushed frame
    #[allow(clippy::cast_possible_truncation)]
    pub fn record_frame(&mut self, now: Instant) {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return;
        };

        self.frames = self.frames.saturating_add(1);
        let elapsed = now.as_millis().saturating_sub(start.as_millis());
        if elapsed >= FPS_WINDOW_MS {
            let fps = u64::from(self.frames) * 1000 / elapsed;
            self.fps = fps.min(u64::from(u16::MAX)) as u16;
            self.window_start = Some(now);
            self.frames = 0;
        }
    }
}

/// Snapshot printed by the diagnostics task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsReport {
    pub aggregate: AggregateScanState,
    /// Raw scan facility status at report time
    pub scan_status: i8,
    pub fps: u16,
}

impl fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ {} networks rssi {}dBm / scan status {} | {} fps ]",
            self.aggregate.network_count,
            self.aggregate.mean_signal_strength,
            self.scan_status,
            self.fps
        )
    }
}

/// Destination of diagnostics reports
pub trait DiagnosticsSink {
    fn report(&mut self, report: &DiagnosticsReport);
}

/// Sink that drops every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticsSink for NoDiagnostics {
    fn report(&mut self, _report: &DiagnosticsReport) {}
}

/// Sink writing to the serial console, overwriting the current line
#[cfg(feature = "esp32-log")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialDiagnostics;

#[cfg(feature = "esp32-log")]
impl DiagnosticsSink for SerialDiagnostics {
    fn report(&mut self, report: &DiagnosticsReport) {
        print!("{}\r", report);
    }
}
