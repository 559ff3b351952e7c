mod tests {
    use embassy_time::{Duration, Instant};
    use wifi_lantern::{
        PeriodicTask, Scheduler, TaskId,
        config::{DIAGNOSTICS_PERIOD, FRAME_DURATION, SCAN_POLL_PERIOD},
    };

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(FRAME_DURATION, Duration::from_millis(33));
    }

    #[test]
    fn test_stopped_task_never_fires() {
        let mut task = PeriodicTask::new(Duration::from_millis(10));
        assert!(!task.is_running());
        assert!(!task.poll(at(1_000)));
        assert_eq!(task.next_due(), None);
    }

    #[test]
    fn test_first_fire_after_one_period() {
        let mut task = PeriodicTask::new(Duration::from_millis(100));
        task.start(at(0));
        assert!(!task.poll(at(99)));
        assert!(task.poll(at(100)));
        assert_eq!(task.next_due(), Some(at(200)));
    }

    #[test]
    fn test_scan_poll_does_not_fire_early() {
        let mut task = PeriodicTask::new(SCAN_POLL_PERIOD);
        task.start(at(0));
        assert!(task.poll(at(30_000)));

        for ms in (30_001..=59_999).step_by(1_000) {
            assert!(!task.poll(at(ms)));
        }
        assert!(!task.poll(at(59_999)));
        assert!(task.poll(at(60_000)));
    }

    #[test]
    fn test_missed_periods_are_dropped() {
        let mut task = PeriodicTask::new(Duration::from_millis(100));
        task.start(at(0));

        // Ten periods late: a single fire, measured again from here
        assert!(task.poll(at(1_050)));
        assert!(!task.poll(at(1_050)));
        assert!(!task.poll(at(1_149)));
        assert!(task.poll(at(1_150)));
    }

    #[test]
    fn test_scheduler_fires_each_task_at_most_once() {
        let mut scheduler = Scheduler::new(FRAME_DURATION, SCAN_POLL_PERIOD, DIAGNOSTICS_PERIOD);
        scheduler.start(at(0), true);

        let result = scheduler.tick(at(120_000));
        assert_eq!(
            result.fired.as_slice(),
            &[TaskId::Render, TaskId::ScanPoll, TaskId::Diagnostics]
        );
        assert_eq!(result.sleep_duration, FRAME_DURATION);

        let result = scheduler.tick(at(120_000));
        assert!(result.fired.is_empty());
    }

    #[test]
    fn test_diagnostics_disabled_by_default() {
        let mut scheduler = Scheduler::new(FRAME_DURATION, SCAN_POLL_PERIOD, DIAGNOSTICS_PERIOD);
        scheduler.start(at(0), false);

        let diagnostics = scheduler.task(TaskId::Diagnostics).unwrap();
        assert!(!diagnostics.is_running());

        let result = scheduler.tick(at(5_000));
        assert_eq!(result.fired.as_slice(), &[TaskId::Render]);
    }

    #[test]
    fn test_sleep_until_next_due() {
        let mut scheduler = Scheduler::new(FRAME_DURATION, SCAN_POLL_PERIOD, DIAGNOSTICS_PERIOD);
        scheduler.start(at(0), false);

        let result = scheduler.tick(at(10));
        assert!(result.fired.is_empty());
        assert_eq!(result.sleep_duration, Duration::from_millis(23));

        let result = scheduler.tick(at(40));
        assert_eq!(result.fired.as_slice(), &[TaskId::Render]);
        assert_eq!(result.sleep_duration, Duration::from_millis(33));
    }

    #[test]
    fn test_task_mut_stops_task() {
        let mut scheduler = Scheduler::new(FRAME_DURATION, SCAN_POLL_PERIOD, DIAGNOSTICS_PERIOD);
        scheduler.start(at(0), false);
        scheduler.task_mut(TaskId::Render).unwrap().stop();

        let result = scheduler.tick(at(30_000));
        assert_eq!(result.fired.as_slice(), &[TaskId::ScanPoll]);
    }
}
