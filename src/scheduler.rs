//! Cooperative periodic task scheduling.
//!
//! Portable task pacing without async/await or platform-specific timers.
//! The caller owns the loop and may sleep for the returned duration between
//! ticks.

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Number of periodic tasks driven by the scheduler
pub const TASK_COUNT: usize = 3;

/// Periodic tasks of the lantern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// Render and push one frame
    Render,
    /// Poll the scan facility
    ScanPoll,
    /// Emit a diagnostics report
    Diagnostics,
}

/// A task that fires once per elapsed period.
///
/// Missed periods are dropped: after a long stall the task fires once and
/// the next period is measured from that fire.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicTask {
    period: Duration,
    last_fire: Option<Instant>,
}

impl PeriodicTask {
    /// Create a stopped task
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            last_fire: None,
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Arm the task. The first fire happens one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.last_fire = Some(now);
    }

    pub fn stop(&mut self) {
        self.last_fire = None;
    }

    pub const fn is_running(&self) -> bool {
        self.last_fire.is_some()
    }

    /// Instant at which the task is next due
    pub fn next_due(&self) -> Option<Instant> {
        self.last_fire.map(|last| last + self.period)
    }

    /// Fire at most once if a period has elapsed since the last fire
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_fire else {
            return false;
        };
        let elapsed = now.as_millis().saturating_sub(last.as_millis());
        if elapsed < self.period.as_millis() {
            return false;
        }
        self.last_fire = Some(now);
        true
    }
}

/// Result of a scheduler tick.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Tasks that fired, in execution order
    pub fired: Vec<TaskId, TASK_COUNT>,
    /// How long to wait until the next task is due (zero if one is overdue)
    pub sleep_duration: Duration,
}

/// Fixed set of periodic tasks polled from a single loop.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = Scheduler::new(FRAME_DURATION, SCAN_POLL_PERIOD, DIAGNOSTICS_PERIOD);
/// scheduler.start(now, false);
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     for task in &result.fired {
///         // run the task callback
///     }
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    tasks: [(TaskId, PeriodicTask); TASK_COUNT],
}

impl Scheduler {
    pub const fn new(
        render_period: Duration,
        scan_poll_period: Duration,
        diagnostics_period: Duration,
    ) -> Self {
        Self {
            tasks: [
                (TaskId::Render, PeriodicTask::new(render_period)),
                (TaskId::ScanPoll, PeriodicTask::new(scan_poll_period)),
                (TaskId::Diagnostics, PeriodicTask::new(diagnostics_period)),
            ],
        }
    }

    /// Arm render and scan-poll, and diagnostics when enabled
    pub fn start(&mut self, now: Instant, diagnostics: bool) {
        for (id, task) in &mut self.tasks {
            if *id != TaskId::Diagnostics || diagnostics {
                task.start(now);
            }
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&PeriodicTask> {
        self.tasks
            .iter()
            .find(|(task_id, _)| *task_id == id)
            .map(|(_, task)| task)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut PeriodicTask> {
        self.tasks
            .iter_mut()
            .find(|(task_id, _)| *task_id == id)
            .map(|(_, task)| task)
    }

    /// Check every task once and report the ones that are due.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let mut fired = Vec::new();
        for (id, task) in &mut self.tasks {
            if task.poll(now) {
                // Capacity equals the task count
                let _ = fired.push(*id);
            }
        }

        TickResult {
            fired,
            sleep_duration: self.sleep_duration(now),
        }
    }

    fn sleep_duration(&self, now: Instant) -> Duration {
        let next_due = self
            .tasks
            .iter()
            .filter_map(|(_, task)| task.next_due())
            .map(|due| due.as_millis())
            .min();

        match next_due {
            Some(due) => Duration::from_millis(due.saturating_sub(now.as_millis())),
            None => Duration::from_millis(0),
        }
    }
}
