//! Fling and programmatic scroll physics.
//!
//! One-dimensional trajectory helper: start a motion, then step it once
//! per frame with [`compute_offset`](Scroller::compute_offset) until it
//! reports the final resting offset. Time is caller-supplied milliseconds,
//! so the trajectory is deterministic under test.

use crate::constants::FLING_DECELERATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Fixed-duration interpolated scroll (programmatic value set).
    Scroll,
    /// Constant-deceleration fling from a release velocity.
    Fling,
}

/// A single in-flight scroll or fling trajectory.
#[derive(Debug, Clone)]
pub(crate) struct Scroller {
    mode: Mode,
    start: f32,
    final_x: f32,
    curr: f32,
    start_time: u64,
    duration_ms: u64,
    /// Fling speed in px/s, always non-negative; direction lives in `sign`.
    speed: f32,
    sign: f32,
    finished: bool,
}

impl Scroller {
    pub(crate) fn new() -> Self {
        Self {
            mode: Mode::Scroll,
            start: 0.0,
            final_x: 0.0,
            curr: 0.0,
            start_time: 0,
            duration_ms: 0,
            speed: 0.0,
            sign: 1.0,
            finished: true,
        }
    }

    /// Starts a scroll from `start` by `dx` over `duration_ms`.
    pub(crate) fn start_scroll(&mut self, start: f32, dx: f32, duration_ms: u64, now_ms: u64) {
        self.mode = Mode::Scroll;
        self.start = start;
        self.curr = start;
        self.final_x = start + dx;
        self.start_time = now_ms;
        self.duration_ms = duration_ms;
        self.finished = false;
    }

    /// Starts a decelerating fling from `start` at `velocity` px/s, bounded
    /// to `[min, max]`. When the trajectory would cross a bound, the
    /// duration is cut to the boundary-crossing time.
    pub(crate) fn fling(&mut self, start: f32, velocity: f32, min: f32, max: f32, now_ms: u64) {
        let sign = if velocity < 0.0 { -1.0 } else { 1.0 };
        let speed = velocity.abs();
        let travel = speed * speed / (2.0 * FLING_DECELERATION);
        let mut duration_ms = (speed / FLING_DECELERATION * 1_000.0) as u64;

        let unclamped = start + sign * travel;
        let final_x = unclamped.clamp(min, max);
        if final_x != unclamped {
            // t = (v - sqrt(v² - 2ad)) / a, the first time the bound is hit.
            let dist = (final_x - start).abs();
            let disc = (speed * speed - 2.0 * FLING_DECELERATION * dist).max(0.0);
            duration_ms = ((speed - disc.sqrt()) / FLING_DECELERATION * 1_000.0) as u64;
        }

        self.mode = Mode::Fling;
        self.start = start;
        self.curr = start;
        self.final_x = final_x;
        self.start_time = now_ms;
        self.duration_ms = duration_ms;
        self.speed = speed;
        self.sign = sign;
        self.finished = false;
    }

    /// Advances the trajectory to `now_ms`.
    ///
    /// Returns `true` while the motion is live, including the step that
    /// lands on the final offset; `false` once finished.
    pub(crate) fn compute_offset(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.start_time);
        if elapsed < self.duration_ms {
            self.curr = match self.mode {
                Mode::Scroll => {
                    let t = elapsed as f32 / self.duration_ms as f32;
                    self.start + (self.final_x - self.start) * smoothstep(t)
                }
                Mode::Fling => {
                    let t = elapsed as f32 / 1_000.0;
                    let travelled = self.speed * t - 0.5 * FLING_DECELERATION * t * t;
                    let lo = self.start.min(self.final_x);
                    let hi = self.start.max(self.final_x);
                    (self.start + self.sign * travelled).clamp(lo, hi)
                }
            };
        } else {
            self.curr = self.final_x;
            self.finished = true;
        }
        true
    }

    pub(crate) fn curr(&self) -> f32 {
        self.curr
    }

    pub(crate) fn final_offset(&self) -> f32 {
        self.final_x
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Aborts the motion in place; the next `compute_offset` reports done.
    pub(crate) fn force_finished(&mut self) {
        self.finished = true;
    }
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}
