//! Lantern controller
//!
//! Owns the scan state, the renderer and the hardware collaborators, and runs
//! the three periodic tasks from a single cooperative loop.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LedDriver;
use crate::color::Rgb;
use crate::config::LanternConfig;
use crate::diagnostics::{DiagnosticsReport, DiagnosticsSink, FpsCounter};
use crate::renderer::Renderer;
use crate::scan::{AggregateScanState, PollOutcome, ScanAggregator, ScanFacility};
use crate::scheduler::{Scheduler, TaskId, TickResult};

/// Lantern - the main orchestrator
///
/// # Usage
///
/// ```ignore
/// let mut lantern: Lantern<_, _, _, NUM_LEDS> =
///     Lantern::new(driver, scanner, NoDiagnostics, &LanternConfig::DEFAULT);
/// lantern.start(Instant::from_millis(now_ms()));
///
/// loop {
///     let result = lantern.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct Lantern<D, S, G, const N: usize>
where
    D: LedDriver,
    S: ScanFacility,
    G: DiagnosticsSink,
{
    // External dependencies and configuration
    driver: D,
    scanner: S,
    diagnostics: G,
    config: LanternConfig,

    // Internal state
    aggregator: ScanAggregator,
    scheduler: Scheduler,
    fps: FpsCounter,

    // Internal dependencies
    renderer: Renderer<N>,
}

impl<D, S, G, const N: usize> Lantern<D, S, G, N>
where
    D: LedDriver,
    S: ScanFacility,
    G: DiagnosticsSink,
{
    pub fn new(driver: D, scanner: S, diagnostics: G, config: &LanternConfig) -> Self {
        Self {
            driver,
            scanner,
            diagnostics,
            config: *config,
            aggregator: ScanAggregator::new(),
            scheduler: Scheduler::new(
                config.frame_duration,
                config.scan_poll_period,
                config.diagnostics_period,
            ),
            fps: FpsCounter::new(),
            renderer: Renderer::new(config.flicker),
        }
    }

    /// Bring up the strip, kick off the first scan and arm the tasks.
    ///
    /// The first scan is requested here so that a result is usually ready
    /// when the first scan-poll fires.
    pub fn start(&mut self, now: Instant) {
        #[cfg(feature = "esp32-log")]
        println!("[Lantern.start] {} leds, first scan requested", N);

        self.driver
            .set_color_temperature(self.config.color_temperature);
        self.driver.set_brightness(self.config.brightness);
        self.driver.write(&[Rgb::default(); N]);

        self.scanner.request_scan(false);
        self.scheduler.start(now, self.config.diagnostics_enabled);
    }

    /// Run every task that is due at `now`, at most once each.
    ///
    /// Tasks run in the order render, scan-poll, diagnostics.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let result = self.scheduler.tick(now);
        for task in &result.fired {
            match task {
                TaskId::Render => self.render_frame(now),
                TaskId::ScanPoll => {
                    self.poll_scan();
                }
                TaskId::Diagnostics => self.report_diagnostics(),
            }
        }
        result
    }

    /// Render a frame from the current aggregate and push it to the strip
    pub fn render_frame(&mut self, now: Instant) {
        let frame = self.renderer.render(now, self.aggregator.state());
        self.driver.write(frame);
        self.fps.record_frame(now);
    }

    /// Poll the scan facility once
    pub fn poll_scan(&mut self) -> PollOutcome {
        self.aggregator.poll(&mut self.scanner)
    }

    /// Send a status report to the diagnostics sink
    pub fn report_diagnostics(&mut self) {
        let report = self.diagnostics_report();
        self.diagnostics.report(&report);
    }

    /// Current status snapshot
    pub fn diagnostics_report(&mut self) -> DiagnosticsReport {
        DiagnosticsReport {
            aggregate: *self.aggregator.state(),
            scan_status: self.scanner.status(),
            fps: self.fps.fps(),
        }
    }

    pub const fn aggregate(&self) -> &AggregateScanState {
        self.aggregator.state()
    }

    pub const fn renderer(&self) -> &Renderer<N> {
        &self.renderer
    }

    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub const fn fps(&self) -> u16 {
        self.fps.fps()
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub const fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    pub const fn diagnostics(&self) -> &G {
        &self.diagnostics
    }
}
