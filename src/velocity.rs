//! Pointer velocity estimation for fling release decisions.
//!
//! Ring buffer of recent horizontal samples with an impulse-strategy
//! estimate: velocity is recovered from the kinetic energy the pointer
//! deltas would impart to a unit mass.

/// Samples kept in the ring buffer.
const HISTORY: usize = 20;

/// Samples older than this relative to the newest are ignored.
const HORIZON_MS: u64 = 100;

/// A gap this long between consecutive samples means the pointer stopped;
/// older samples are discarded.
const STOP_GAP_MS: u64 = 40;

#[derive(Debug, Clone, Copy)]
struct Sample {
    time_ms: u64,
    x: f32,
}

/// Tracks horizontal pointer positions and estimates release velocity.
#[derive(Debug, Clone)]
pub(crate) struct VelocityTracker {
    samples: [Option<Sample>; HISTORY],
    head: usize,
}

impl VelocityTracker {
    pub(crate) fn new() -> Self {
        Self {
            samples: [None; HISTORY],
            head: 0,
        }
    }

    /// Records a sample. Times must be non-decreasing.
    pub(crate) fn add(&mut self, time_ms: u64, x: f32) {
        self.head = (self.head + 1) % HISTORY;
        self.samples[self.head] = Some(Sample { time_ms, x });
    }

    /// Drops all recorded samples.
    pub(crate) fn reset(&mut self) {
        self.samples = [None; HISTORY];
        self.head = 0;
    }

    /// Estimated horizontal velocity in px/s.
    ///
    /// Returns 0.0 with fewer than two usable samples, or when the pointer
    /// held still long enough to read as stopped.
    pub(crate) fn velocity(&self) -> f32 {
        let newest = match self.samples[self.head] {
            Some(sample) => sample,
            None => return 0.0,
        };

        // Walk backwards from the newest sample, collecting positions and
        // their (negative) ms offsets until the horizon or a stop gap.
        let mut xs = [0.0f32; HISTORY];
        let mut ts = [0.0f32; HISTORY];
        let mut count = 0;
        let mut index = self.head;
        let mut later_time = newest.time_ms;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = later_time.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || gap > STOP_GAP_MS {
                break;
            }

            xs[count] = sample.x;
            ts[count] = -(age as f32);
            count += 1;
            if count >= HISTORY {
                break;
            }

            later_time = sample.time_ms;
            index = if index == 0 { HISTORY - 1 } else { index - 1 };
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&xs[..count], &ts[..count]) * 1_000.0
    }

    /// [`velocity`](Self::velocity) clamped to `[-max, max]`.
    pub(crate) fn velocity_clamped(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let v = self.velocity();
        if v.is_nan() {
            return 0.0;
        }
        v.clamp(-max, max)
    }
}

/// Impulse-strategy velocity in px/ms.
///
/// `xs`/`ts` are ordered newest-first; `ts` holds non-positive ms offsets
/// from the newest sample. Each consecutive pair contributes work equal to
/// the velocity change it causes times the pair's speed; the accumulated
/// kinetic energy converts back to a signed velocity.
fn impulse_velocity(xs: &[f32], ts: &[f32]) -> f32 {
    let count = xs.len();
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    for i in (1..count).rev() {
        if ts[i] == ts[i - 1] {
            continue;
        }
        let v_prev = energy_to_velocity(work);
        let v_curr = (xs[i - 1] - xs[i]) / (ts[i - 1] - ts[i]);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == count - 1 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// E = v²/2 with unit mass, signed.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
