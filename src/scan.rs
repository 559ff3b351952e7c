//! WiFi scan aggregation
//!
//! The scan facility is asynchronous: a scan is requested, then its status is
//! polled until it completes. [`ScanAggregator::poll`] never blocks and only
//! touches [`AggregateScanState`] once a cycle completes.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{config::NO_SIGNAL_DBM, math8::truncate_to_int};

const SCAN_STATUS_NOT_STARTED: i8 = -2;
const SCAN_STATUS_IN_PROGRESS: i8 = -1;

/// Asynchronous WiFi scanner
///
/// Implement this trait for the platform radio driver.
pub trait ScanFacility {
    /// Start an asynchronous scan. Must return immediately.
    fn request_scan(&mut self, show_hidden: bool);

    /// Raw status code: `-2` nothing queued, `-1` running, `n >= 0` done with
    /// `n` networks found.
    fn status(&mut self) -> i8;

    /// Signal strength of network `index` of the last completed scan, in dBm
    fn signal_strength(&self, index: usize) -> Option<i8>;

    /// Drop the results of the last scan so a new one can be requested
    fn clear_results(&mut self);
}

/// Decoded scan facility status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// No scan queued and none pending
    NotStarted,
    /// A scan is running
    InProgress,
    /// A scan finished with this many networks
    Completed(u8),
    /// Any other negative code
    Unrecognized(i8),
}

impl ScanStatus {
    pub const fn from_raw(value: i8) -> Self {
        match value {
            SCAN_STATUS_NOT_STARTED => Self::NotStarted,
            SCAN_STATUS_IN_PROGRESS => Self::InProgress,
            #[allow(clippy::cast_sign_loss)]
            count if count >= 0 => Self::Completed(count as u8),
            other => Self::Unrecognized(other),
        }
    }
}

/// Network count and mean signal strength of the last completed scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateScanState {
    pub network_count: u8,
    /// Mean RSSI in dBm, meaningful only when `network_count > 0`
    pub mean_signal_strength: i32,
}

impl AggregateScanState {
    /// State before any scan completed
    pub const UNSEEN: Self = Self {
        network_count: 0,
        mean_signal_strength: NO_SIGNAL_DBM,
    };

    pub const fn has_networks(&self) -> bool {
        self.network_count > 0
    }
}

impl Default for AggregateScanState {
    fn default() -> Self {
        Self::UNSEEN
    }
}

/// What a single poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing was queued, a new scan was requested
    ScanRequested,
    /// The scan is still running
    Pending,
    /// A scan completed and the aggregate was replaced
    Updated(AggregateScanState),
    /// A scan completed without networks, the aggregate was kept
    Empty,
    /// The facility reported something unusable, nothing changed
    Ignored(i8),
}

/// Scan polling state machine
#[derive(Debug, Clone, Default)]
pub struct ScanAggregator {
    state: AggregateScanState,
}

impl ScanAggregator {
    pub const fn new() -> Self {
        Self {
            state: AggregateScanState::UNSEEN,
        }
    }

    /// Latest aggregate
    pub const fn state(&self) -> &AggregateScanState {
        &self.state
    }

    /// Check the facility once without blocking
    pub fn poll<S: ScanFacility>(&mut self, facility: &mut S) -> PollOutcome {
        match ScanStatus::from_raw(facility.status()) {
            ScanStatus::NotStarted => {
                #[cfg(feature = "esp32-log")]
                println!("[ScanAggregator.poll] requesting scan");
                facility.request_scan(false);
                PollOutcome::ScanRequested
            }
            ScanStatus::InProgress => PollOutcome::Pending,
            ScanStatus::Unrecognized(raw) => {
                #[cfg(feature = "esp32-log")]
                println!("[ScanAggregator.poll] unrecognized scan status {}", raw);
                PollOutcome::Ignored(raw)
            }
            ScanStatus::Completed(0) => {
                #[cfg(feature = "esp32-log")]
                println!("[ScanAggregator.poll] scan found no networks");
                facility.clear_results();
                PollOutcome::Empty
            }
            ScanStatus::Completed(count) => {
                let outcome = match Self::mean_signal_strength(facility, count) {
                    Some(mean) => {
                        self.state = AggregateScanState {
                            network_count: count,
                            mean_signal_strength: mean,
                        };
                        #[cfg(feature = "esp32-log")]
                        println!(
                            "[ScanAggregator.poll] {} networks, mean rssi {}dBm",
                            count, mean
                        );
                        PollOutcome::Updated(self.state)
                    }
                    #[allow(clippy::cast_possible_wrap)]
                    None => PollOutcome::Ignored(count as i8),
                };
                facility.clear_results();
                outcome
            }
        }
    }

    /// Mean RSSI over `count` networks, truncated toward zero.
    ///
    /// Returns `None` when the facility is missing an entry.
    #[allow(clippy::cast_precision_loss)]
    fn mean_signal_strength<S: ScanFacility>(facility: &S, count: u8) -> Option<i32> {
        let mut sum: i64 = 0;
        for index in 0..usize::from(count) {
            sum += i64::from(facility.signal_strength(index)?);
        }
        Some(truncate_to_int(sum as f32 / f32::from(count)))
    }
}
