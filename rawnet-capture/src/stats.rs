//! Capture statistics

use std::time::{Duration, Instant};

/// Counters accumulated by a capture run
///
/// The capture loop is single-threaded, so plain counters suffice; a snapshot
/// is taken when the loop hands stats back to the caller.
#[derive(Debug, Clone)]
pub struct CaptureStats {
    /// Frames that passed the EtherType filter
    pub frames_received: u64,
    /// Total bytes across received frames
    pub bytes_received: u64,
    /// Frames skipped because a layer failed to decode
    pub decode_errors: u64,
    /// Receive deadlines that expired without a frame
    pub timeouts: u64,
    /// Time the loop has been running
    pub duration: Duration,
}

impl CaptureStats {
    /// Frames per second over the run so far
    pub fn frames_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.frames_received as f64 / secs
        } else {
            0.0
        }
    }

    /// Human-readable summary
    pub fn format(&self) -> String {
        format!(
            "{} frames ({} bytes), {} decode errors, {} timeouts, {:.1}s ({:.1} fps)",
            self.frames_received,
            self.bytes_received,
            self.decode_errors,
            self.timeouts,
            self.duration.as_secs_f64(),
            self.frames_per_second()
        )
    }
}

/// Mutable accumulator owned by the capture loop
#[derive(Debug)]
pub(crate) struct StatsAccumulator {
    frames_received: u64,
    bytes_received: u64,
    decode_errors: u64,
    timeouts: u64,
    start_time: Instant,
}

impl StatsAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            frames_received: 0,
            bytes_received: 0,
            decode_errors: 0,
            timeouts: 0,
            start_time: Instant::now(),
        }
    }

    pub(crate) fn record_frame(&mut self, size: usize) {
        self.frames_received += 1;
        self.bytes_received += size as u64;
    }

    pub(crate) fn record_decode_error(&mut self) {
        self.decode_errors += 1;
    }

    pub(crate) fn record_timeout(&mut self) {
        self.timeouts += 1;
    }

    pub(crate) fn snapshot(&self) -> CaptureStats {
        CaptureStats {
            frames_received: self.frames_received,
            bytes_received: self.bytes_received,
            decode_errors: self.decode_errors,
            timeouts: self.timeouts,
            duration: self.start_time.elapsed(),
        }
    }
}
