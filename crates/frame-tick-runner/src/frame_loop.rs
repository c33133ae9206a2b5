//! Real-time frame pump.
//!
//! ```text
//! each frame:
//!   accumulator += elapsed
//!   while accumulator >= step (at most max_fixed_steps): fixed_update(step)
//!   update(elapsed)
//!   late_update(elapsed)
//!   sleep until the frame budget is spent
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use frame_tick::FrameHooks;
use tracing::debug;

use crate::config::LoopConfig;

/// Drives host hooks from a clock with a fixed-timestep accumulator.
#[derive(Debug)]
pub struct FrameLoop<H> {
    hooks: H,
    config: LoopConfig,
    accumulator: Duration,
    frames: u64,
}

impl<H: FrameHooks> FrameLoop<H> {
    pub fn new(hooks: H, config: LoopConfig) -> Self {
        Self {
            hooks,
            config,
            accumulator: Duration::ZERO,
            frames: 0,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame that took `elapsed` of wall-clock time.
    ///
    /// Returns the number of fixed steps run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let step = self.config.fixed_step();
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= step && steps < self.config.max_fixed_steps() {
            self.hooks.fixed_update(self.config.fixed_timestep());
            self.accumulator -= step;
            steps += 1;
        }

        if self.accumulator >= step {
            // Keep only the partial step.
            debug!(backlog = ?self.accumulator, steps, "dropping fixed-step backlog");
            self.accumulator = Duration::from_nanos(
                (self.accumulator.as_nanos() % step.as_nanos()) as u64,
            );
        }

        let delta = elapsed.as_secs_f32();
        self.hooks.update(delta);
        self.hooks.late_update(delta);
        self.frames += 1;

        steps
    }

    /// Pump frames at the target rate until `stop` is set or the frame limit
    /// is reached. Returns the total frames run.
    pub fn run(&mut self, stop: &AtomicBool) -> u64 {
        let budget = self.config.frame_duration();
        let mut last = Instant::now();

        while !stop.load(Ordering::Relaxed) {
            if self
                .config
                .max_frames()
                .is_some_and(|max| self.frames >= max)
            {
                break;
            }

            let start = Instant::now();
            self.advance(start - last);
            last = start;

            let spent = start.elapsed();
            if spent < budget {
                std::thread::sleep(budget - spent);
            }
        }

        self.frames
    }
}
