//! Compile-time configuration
//!
//! All tuning constants live here. [`LanternConfig::DEFAULT`] bundles them for
//! the controller; nothing is reconfigured after construction.

use embassy_time::Duration;

use crate::color::Rgb;

/// Base flicker period in milliseconds. Larger values slow the flicker down.
pub const TIME_PERIOD_MS: f32 = 666.0;

/// Share of the brightness that the flicker may swing.
pub const FLICKER_RATIO: f32 = 0.16;

/// Divisor inside the logarithm applied to the network count.
///
/// Low values make the frequency climb fast with more networks (2 already
/// strobes at around 20 networks), high values keep crowded areas calm.
pub const FLICKER_DIVISOR: f32 = 16.0;

/// GPIO pin of the LED data line
pub const LED_DATA_PIN: u8 = 14;

/// Number of pixels on the strip
pub const NUM_LEDS: usize = 12;

/// Target frame rate
pub const FRAMERATE: u32 = 30;

/// Frame period, truncated to whole milliseconds
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / FRAMERATE as u64);

/// Interval between scan-facility polls
pub const SCAN_POLL_PERIOD: Duration = Duration::from_secs(30);

/// Interval between diagnostics reports
pub const DIAGNOSTICS_PERIOD: Duration = Duration::from_secs(1);

/// Diagnostics are off unless explicitly enabled
pub const DIAGNOSTICS_ENABLED: bool = false;

/// Mean signal strength reported before any scan completed
pub const NO_SIGNAL_DBM: i32 = -100;

/// Warm "tungsten 100W" white point applied as color temperature
pub const TUNGSTEN_100W: Rgb = Rgb {
    r: 255,
    g: 214,
    b: 170,
};

/// Global brightness set at startup
pub const GLOBAL_BRIGHTNESS: u8 = 255;

/// Parameters of the flicker function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlickerParams {
    /// Base period in milliseconds
    pub time_period_ms: f32,
    /// Maximum fractional brightness swing
    pub ratio: f32,
    /// Network count divisor inside the logarithm
    pub divisor: f32,
}

impl FlickerParams {
    pub const DEFAULT: Self = Self {
        time_period_ms: TIME_PERIOD_MS,
        ratio: FLICKER_RATIO,
        divisor: FLICKER_DIVISOR,
    };
}

impl Default for FlickerParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the lantern controller
#[derive(Debug, Clone, Copy)]
pub struct LanternConfig {
    pub flicker: FlickerParams,
    pub frame_duration: Duration,
    pub scan_poll_period: Duration,
    pub diagnostics_period: Duration,
    pub diagnostics_enabled: bool,
    pub color_temperature: Rgb,
    pub brightness: u8,
}

impl LanternConfig {
    pub const DEFAULT: Self = Self {
        flicker: FlickerParams::DEFAULT,
        frame_duration: FRAME_DURATION,
        scan_poll_period: SCAN_POLL_PERIOD,
        diagnostics_period: DIAGNOSTICS_PERIOD,
        diagnostics_enabled: DIAGNOSTICS_ENABLED,
        color_temperature: TUNGSTEN_100W,
        brightness: GLOBAL_BRIGHTNESS,
    };

    /// Enable periodic diagnostics reports
    #[must_use]
    pub const fn with_diagnostics(mut self) -> Self {
        self.diagnostics_enabled = true;
        self
    }
}

impl Default for LanternConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
