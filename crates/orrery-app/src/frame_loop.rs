//! Fixed-timestep frame pacing.
//!
//! Each animation step must correspond to the same amount of simulated time,
//! so steps run at a fixed rate decoupled from how often frames are drawn. An
//! accumulator collects elapsed wall-clock time and releases it in whole steps.

use std::time::{Duration, Instant};

use tracing::warn;

/// Longest frame time accepted before clamping, in seconds.
///
/// A stall longer than this is dropped rather than replayed as a burst of steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Result of one [`FrameLoop::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Fixed steps the caller should run before drawing.
    pub updates: u32,
    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub alpha: f64,
}

/// Fixed-timestep loop state.
pub struct FrameLoop {
    /// `None` runs exactly one step per tick.
    step: Option<f64>,
    previous_time: Instant,
    accumulator: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameLoop {
    /// Paced at `target_fps` steps per second; `0` means one step per tick.
    pub fn new(target_fps: u32) -> Self {
        Self {
            step: (target_fps > 0).then(|| 1.0 / f64::from(target_fps)),
            previous_time: Instant::now(),
            accumulator: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Measure the time since the previous tick and release whole steps.
    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.tick_with(frame_time)
    }

    /// Like [`tick`](Self::tick) with an explicit frame time in seconds.
    pub fn tick_with(&mut self, frame_time: f64) -> FrameTick {
        self.frame_count += 1;

        let Some(step) = self.step else {
            self.update_count += 1;
            return FrameTick {
                updates: 1,
                alpha: 0.0,
            };
        };

        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        let mut updates = 0;
        while self.accumulator >= step {
            self.accumulator -= step;
            updates += 1;
        }
        self.update_count += u64::from(updates);

        FrameTick {
            updates,
            alpha: self.accumulator / step,
        }
    }

    /// How long until the accumulator holds another full step.
    pub fn time_until_next_update(&self) -> Duration {
        match self.step {
            Some(step) => Duration::from_secs_f64((step - self.accumulator).max(0.0)),
            None => Duration::ZERO,
        }
    }

    /// Step length in seconds, if paced.
    pub fn step(&self) -> Option<f64> {
        self.step
    }

    /// Ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Steps released so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}
