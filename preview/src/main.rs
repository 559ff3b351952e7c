//! Desktop preview app for the wifi lantern
//!
//! Runs the real `Lantern` controller against a simulated scanner so the
//! flicker can be tuned without hardware.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use wifi_lantern::{
    Instant, Lantern, LanternConfig, LedDriver, NoDiagnostics, PollOutcome, RenderMode, Rgb,
    ScanFacility,
    config::NUM_LEDS,
    math8::scale8,
};

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 48.0;

/// Gap between LEDs
const LED_GAP: f32 = 6.0;

/// Spread of the simulated RSSI values around the mean, in dBm
const RSSI_SPREAD: i8 = 6;

/// Driver that keeps the last frame for drawing
#[derive(Default)]
struct PreviewDriver {
    frame: Vec<Rgb>,
    temperature: Rgb,
    brightness: u8,
}

impl LedDriver for PreviewDriver {
    fn write(&mut self, colors: &[Rgb]) {
        self.frame.clear();
        self.frame.extend(colors.iter().map(|color| Rgb {
            r: scale8(scale8(color.r, self.temperature.r), self.brightness),
            g: scale8(scale8(color.g, self.temperature.g), self.brightness),
            b: scale8(scale8(color.b, self.temperature.b), self.brightness),
        }));
    }

    fn set_color_temperature(&mut self, temperature: Rgb) {
        self.temperature = temperature;
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

/// Scanner that completes a scan a fixed time after it was requested
struct SimulatedScanner {
    /// Synthetic time in milliseconds, advanced by the app
    t_ms: u64,
    requested_at: Option<u64>,
    results: Option<Vec<i8>>,
    scan_duration_ms: u64,
    network_count: u8,
    mean_rssi: i8,
}

impl SimulatedScanner {
    fn new() -> Self {
        Self {
            t_ms: 0,
            requested_at: None,
            results: None,
            scan_duration_ms: 2_000,
            network_count: 8,
            mean_rssi: -65,
        }
    }

    /// Networks found by a scan finishing now, spread around the mean
    fn scan_results(&self) -> Vec<i8> {
        (0..self.network_count)
            .map(|index| {
                #[allow(clippy::cast_possible_wrap)]
                let offset = (index % 3) as i8 - 1;
                self.mean_rssi
                    .saturating_add(offset.saturating_mul(RSSI_SPREAD))
                    .min(0)
            })
            .collect()
    }
}

impl ScanFacility for SimulatedScanner {
    fn request_scan(&mut self, _show_hidden: bool) {
        self.requested_at = Some(self.t_ms);
        self.results = None;
    }

    fn status(&mut self) -> i8 {
        if let Some(results) = &self.results {
            return i8::try_from(results.len()).unwrap_or(i8::MAX);
        }
        match self.requested_at {
            None => -2,
            Some(at) if self.t_ms.saturating_sub(at) >= self.scan_duration_ms => {
                let results = self.scan_results();
                let count = i8::try_from(results.len()).unwrap_or(i8::MAX);
                self.results = Some(results);
                self.requested_at = None;
                count
            }
            Some(_) => -1,
        }
    }

    fn signal_strength(&self, index: usize) -> Option<i8> {
        self.results.as_ref()?.get(index).copied()
    }

    fn clear_results(&mut self) {
        self.results = None;
    }
}

type PreviewLantern = Lantern<PreviewDriver, SimulatedScanner, NoDiagnostics, NUM_LEDS>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 420.0])
            .with_title("WiFi Lantern Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "wifi-lantern-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    lantern: PreviewLantern,
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Outcome of the last manual poll
    last_poll: Option<PollOutcome>,
}

impl PreviewApp {
    fn new() -> Self {
        let mut lantern = Lantern::new(
            PreviewDriver::default(),
            SimulatedScanner::new(),
            NoDiagnostics,
            &LanternConfig::DEFAULT,
        );
        lantern.start(Instant::from_millis(0));

        Self {
            lantern,
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            last_poll: None,
        }
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
        self.lantern.scanner_mut().t_ms = self.t_ms;
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.lantern.tick(Instant::from_millis(self.t_ms));

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .button(if self.playing {
                                "⏸ Pause"
                            } else {
                                "▶ Play"
                            })
                            .clicked()
                        {
                            self.playing = !self.playing;
                        }
                        if ui.button("Poll now").clicked() {
                            self.last_poll = Some(self.lantern.poll_scan());
                        }
                    });

                    ui.add_space(4.0);

                    let secs = self.t_ms / 1000;
                    let ms = self.t_ms % 1000;
                    ui.label(format!("Time: {secs}.{ms:03}s"));

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(
                            egui::Slider::new(&mut self.time_scale, 0.1..=20.0)
                                .logarithmic(true),
                        );
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <ScanControls>
                ui.vertical(|ui| {
                    let scanner = self.lantern.scanner_mut();
                    ui.horizontal(|ui| {
                        ui.label("Networks:");
                        ui.add(egui::Slider::new(&mut scanner.network_count, 0..=60));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Mean RSSI:");
                        ui.add(
                            egui::Slider::new(&mut scanner.mean_rssi, -100..=-20).suffix(" dBm"),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label("Scan time:");
                        ui.add(
                            egui::Slider::new(&mut scanner.scan_duration_ms, 0..=10_000)
                                .suffix(" ms"),
                        );
                    });
                });
                // </ScanControls>
            });

            ui.add_space(16.0);

            let aggregate = *self.lantern.aggregate();
            let mode = match self.lantern.renderer().mode() {
                RenderMode::IdleAnimation => "idle",
                RenderMode::SignalDriven => "signal",
            };
            ui.label(format!(
                "{} networks, {} dBm | mode: {mode} | {} fps",
                aggregate.network_count,
                aggregate.mean_signal_strength,
                self.lantern.fps()
            ));
            if let Some(outcome) = self.last_poll {
                ui.label(format!("Last manual poll: {outcome:?}"));
            }

            ui.add_space(16.0);

            // === LED Display ===
            let frame = &self.lantern.driver().frame;
            let available_width = ui.available_width();
            let led_pitch = LED_SIZE + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = frame.len().div_ceil(leds_per_row).max(1);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) =
                ui.allocate_painter(egui::vec2(available_width, height), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 6.0, color);
            }
        });
    }
}
