mod tests {
    use embassy_time::Instant;
    use wifi_lantern::{
        AggregateScanState, DiagnosticsReport, DiagnosticsSink, FpsCounter, Lantern,
        LanternConfig, LedDriver, NoDiagnostics, PollOutcome, RenderMode, Rgb, ScanFacility,
        TaskId,
        config::{NUM_LEDS, TUNGSTEN_100W},
    };

    #[derive(Default)]
    struct MockDriver {
        frames: Vec<Vec<Rgb>>,
        temperature: Option<Rgb>,
        brightness: Option<u8>,
    }

    impl LedDriver for MockDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }

        fn set_color_temperature(&mut self, temperature: Rgb) {
            self.temperature = Some(temperature);
        }

        fn set_brightness(&mut self, brightness: u8) {
            self.brightness = Some(brightness);
        }
    }

    /// Scanner whose scans complete when `finish` is called
    struct MockScanner {
        status: i8,
        rssi: Vec<i8>,
        requests: usize,
    }

    impl MockScanner {
        fn new() -> Self {
            Self {
                status: -2,
                rssi: Vec::new(),
                requests: 0,
            }
        }

        fn finish(&mut self, rssi: &[i8]) {
            self.rssi = rssi.to_vec();
            self.status = i8::try_from(rssi.len()).unwrap();
        }
    }

    impl ScanFacility for MockScanner {
        fn request_scan(&mut self, _show_hidden: bool) {
            self.requests += 1;
            self.status = -1;
        }

        fn status(&mut self) -> i8 {
            self.status
        }

        fn signal_strength(&self, index: usize) -> Option<i8> {
            self.rssi.get(index).copied()
        }

        fn clear_results(&mut self) {
            self.rssi.clear();
            self.status = -2;
        }
    }

    #[derive(Default)]
    struct MockSink {
        lines: Vec<String>,
    }

    impl DiagnosticsSink for MockSink {
        fn report(&mut self, report: &DiagnosticsReport) {
            self.lines.push(report.to_string());
        }
    }

    type TestLantern<G> = Lantern<MockDriver, MockScanner, G, NUM_LEDS>;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn lantern() -> TestLantern<NoDiagnostics> {
        Lantern::new(
            MockDriver::default(),
            MockScanner::new(),
            NoDiagnostics,
            &LanternConfig::DEFAULT,
        )
    }

    #[test]
    fn test_start_brings_up_strip_and_scan() {
        let mut lantern = lantern();
        lantern.start(at(0));

        let driver = lantern.driver();
        assert_eq!(driver.temperature, Some(TUNGSTEN_100W));
        assert_eq!(driver.brightness, Some(255));
        assert_eq!(driver.frames, vec![vec![Rgb::default(); NUM_LEDS]]);
        assert_eq!(lantern.scanner().requests, 1);
        assert_eq!(*lantern.aggregate(), AggregateScanState::UNSEEN);
    }

    #[test]
    fn test_idle_until_first_scan_completes() {
        let mut lantern = lantern();
        lantern.start(at(0));

        let mut now = 0;
        while now < 30_000 {
            now += 33;
            lantern.tick(at(now));
        }
        // Scan still running at the first poll
        assert_eq!(lantern.renderer().mode(), RenderMode::IdleAnimation);
        assert_eq!(lantern.scanner().requests, 1);

        // First poll happened on the tick at or after 30 s
        let poll_at = now + 30_000;
        lantern.scanner_mut().finish(&[-40, -50, -60, -70, -80]);
        let result = lantern.tick(at(poll_at));
        assert_eq!(result.fired.as_slice(), &[TaskId::Render, TaskId::ScanPoll]);
        // Render ran before the poll in this tick
        assert_eq!(lantern.renderer().mode(), RenderMode::IdleAnimation);
        assert_eq!(
            *lantern.aggregate(),
            AggregateScanState {
                network_count: 5,
                mean_signal_strength: -60,
            }
        );

        lantern.tick(at(poll_at + 33));
        assert_eq!(lantern.renderer().mode(), RenderMode::SignalDriven);
    }

    #[test]
    fn test_every_render_pushes_one_frame() {
        let mut lantern = lantern();
        lantern.start(at(0));

        for step in 1..=10 {
            lantern.tick(at(step * 33));
        }
        // Startup frame plus ten rendered frames
        assert_eq!(lantern.driver().frames.len(), 11);
        assert!(lantern.driver().frames.iter().all(|frame| frame.len() == NUM_LEDS));
    }

    #[test]
    fn test_poll_cycle_through_lantern() {
        let mut lantern = lantern();
        lantern.start(at(0));

        assert_eq!(lantern.poll_scan(), PollOutcome::Pending);
        lantern.scanner_mut().finish(&[]);
        assert_eq!(lantern.poll_scan(), PollOutcome::Empty);
        assert_eq!(lantern.poll_scan(), PollOutcome::ScanRequested);
        assert_eq!(lantern.scanner().requests, 2);
        assert_eq!(*lantern.aggregate(), AggregateScanState::UNSEEN);
    }

    #[test]
    fn test_diagnostics_report_line() {
        let mut lantern: TestLantern<MockSink> = Lantern::new(
            MockDriver::default(),
            MockScanner::new(),
            MockSink::default(),
            &LanternConfig::DEFAULT.with_diagnostics(),
        );
        lantern.start(at(0));

        let mut now = 0;
        while now < 1_000 {
            now += 33;
            lantern.tick(at(now));
        }

        let lines = &lantern.diagnostics().lines;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "[ 0 networks rssi -100dBm / scan status -1 | 0 fps ]");
    }

    #[test]
    fn test_diagnostics_disabled_by_default() {
        let mut lantern: TestLantern<MockSink> = Lantern::new(
            MockDriver::default(),
            MockScanner::new(),
            MockSink::default(),
            &LanternConfig::DEFAULT,
        );
        lantern.start(at(0));
        lantern.tick(at(5_000));
        assert!(lantern.diagnostics().lines.is_empty());
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0);

        for step in 0..=30 {
            fps.record_frame(at(step * 33 + 100));
        }
        // Window opened at 100 ms is still short of a second
        assert_eq!(fps.fps(), 0);

        fps.record_frame(at(31 * 33 + 100));
        // 31 frames after the window opened, over 1 023 ms
        assert_eq!(fps.fps(), 30);
    }
}
