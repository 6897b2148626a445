//! Tick layout: the drawable gradation sequence for the current offset.
//!
//! [`RulerModel::ticks`](crate::RulerModel::ticks) yields one [`Tick`] per
//! visible step, plus a two-step overscan margin on each side so marks are
//! already positioned before they scroll into view. The iterator is finite
//! and restartable; building a fresh one for the same offset and viewport
//! yields an identical sequence.

/// One drawable gradation mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Step index relative to the minimum value, `0..=total_steps`.
    pub step: i64,
    /// Horizontal pixel position in widget coordinates.
    pub x: f32,
    /// Major ticks are drawn long and labeled.
    pub is_major: bool,
    /// Decimal label, present on major ticks only.
    pub label: Option<String>,
}

/// Lazy sequence of [`Tick`]s over a clamped step range.
#[derive(Debug, Clone)]
pub struct Ticks {
    step: i64,
    end: i64,
    x: f32,
    gap: f32,
    base_step: i64,
    steps_per_label: i64,
    min_value: f64,
    unit: f64,
}

impl Ticks {
    /// `start..=end` step range with the first tick at pixel `x0`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        start: i64,
        end: i64,
        x0: f32,
        gap: f32,
        base_step: i64,
        steps_per_label: i64,
        min_value: f64,
        unit: f64,
    ) -> Self {
        Self {
            step: start,
            end,
            x: x0,
            gap,
            base_step,
            steps_per_label,
            min_value,
            unit,
        }
    }
}

impl Iterator for Ticks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.step > self.end {
            return None;
        }
        let step = self.step;
        let x = self.x;
        self.step += 1;
        self.x += self.gap;

        // Major phase follows the absolute step index, so labels land on
        // round values even when the minimum is not one.
        let is_major = (self.base_step + step).rem_euclid(self.steps_per_label) == 0;
        let label = is_major.then(|| format_label(self.min_value + step as f64 * self.unit));
        Some(Tick {
            step,
            x,
            is_major,
            label,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.step + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

/// Decimal label with trailing zeros and a bare trailing dot stripped:
/// `1.0` renders as `"1"`, `0.5` as `"0.5"`.
pub(crate) fn format_label(value: f64) -> String {
    let mut text = format!("{value:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
