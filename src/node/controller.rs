//! Session state for the host control loop.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info};

use crate::protocol::{FrameEncoder, Result};
use crate::transport::Transport;

/// Operating mode of the control loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Nothing is sent on ticks.
    #[default]
    Idle,
    /// One test reading is sent per elapsed interval until the limit.
    TestRun,
}

/// Counters and flags owned by the single control loop.
///
/// Time is supplied by the caller as a monotonic offset, so the controller
/// never reads a clock itself.
#[derive(Debug, Clone)]
pub struct NodeController {
    interval: Duration,
    limit: u32,
    test_value: f32,
    mode: Mode,
    sent: u32,
    last_tick: Duration,
}

impl NodeController {
    /// Create an idle controller.
    #[must_use]
    pub const fn new(interval: Duration, limit: u32, test_value: f32) -> Self {
        Self {
            interval,
            limit,
            test_value,
            mode: Mode::Idle,
            sent: 0,
            last_tick: Duration::ZERO,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Frames sent in the current (or last) test run.
    #[must_use]
    pub const fn sent(&self) -> u32 {
        self.sent
    }

    /// Timestamp of the last send.
    #[must_use]
    pub const fn last_tick(&self) -> Duration {
        self.last_tick
    }

    /// Begin a test run, restarting the send counter.
    pub fn start_test(&mut self) {
        info!(limit = self.limit, "starting test run");
        self.mode = Mode::TestRun;
        self.sent = 0;
    }

    /// Return to idle, keeping the counter for inspection.
    pub fn stop(&mut self) {
        self.mode = Mode::Idle;
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.sent = 0;
        self.last_tick = Duration::ZERO;
    }

    /// Advance the loop to `now`, sending a test reading if one is due.
    ///
    /// Returns whether a frame was sent. A missed interval is not made up;
    /// at most one frame goes out per call.
    pub fn poll<T: Transport>(
        &mut self,
        now: Duration,
        encoder: &FrameEncoder,
        transport: &mut T,
    ) -> Result<bool> {
        if self.mode != Mode::TestRun || now.saturating_sub(self.last_tick) < self.interval {
            return Ok(false);
        }
        if self.sent >= self.limit {
            self.mode = Mode::Idle;
            return Ok(false);
        }
        self.last_tick = now;

        let frame = encoder.build(true, self.test_value)?;
        transport.broadcast(Bytes::copy_from_slice(&encoder.serialize(&frame)));
        self.sent += 1;
        debug!(sent = self.sent, "test reading broadcast");

        if self.sent >= self.limit {
            info!(sent = self.sent, "test run complete");
            self.mode = Mode::Idle;
        }
        Ok(true)
    }
}
