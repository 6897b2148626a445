//! The ruler's value/offset core.
//!
//! [`RulerModel`] owns the numeric range, the fixed-point step
//! representation, the pixel offset, and the drag/fling/settle state
//! machine. It is host-free: pointer events and animation frames arrive as
//! plain calls with caller-supplied millisecond timestamps, and every
//! outcome that the widget must act on (publish a value, keep animating) is
//! returned rather than called back. The Floem binding lives in
//! [`ruler`](crate::ruler).
//!
//! Values are never accumulated in floating point: the current position is
//! an integer count of `unit` steps from the minimum, and the displayed
//! value is derived from it on demand.

use tracing::{debug, trace};

use crate::constants::{
    MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, OVERSCAN_STEPS, RANGE_SCROLL_MS, TOUCH_SLOP,
};
use crate::error::RulerError;
use crate::scroller::Scroller;
use crate::ticks::Ticks;
use crate::velocity::VelocityTracker;

/// Value-model configuration: the numeric range and its pixel mapping.
///
/// `unit` is the value distance between adjacent ticks, `gap` the pixel
/// distance; every `ticks_per_label`th tick is drawn long and labeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerConfig {
    pub min_value: f32,
    pub max_value: f32,
    pub current_value: f32,
    pub unit: f32,
    pub ticks_per_label: u32,
    pub gap: f32,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 100.0,
            current_value: 0.0,
            unit: 0.1,
            ticks_per_label: 10,
            gap: 10.0,
        }
    }
}

impl RulerConfig {
    /// Checks the configuration without building anything.
    ///
    /// Rejects inverted bounds, a current value outside the bounds,
    /// non-finite inputs, non-positive `unit`/`gap`, and a zero
    /// `ticks_per_label`.
    pub fn validate(&self) -> Result<(), RulerError> {
        let ordered = self.min_value.is_finite()
            && self.max_value.is_finite()
            && self.current_value.is_finite()
            && self.min_value <= self.max_value
            && self.current_value >= self.min_value
            && self.current_value <= self.max_value;
        let usable = self.unit.is_finite()
            && self.unit > 0.0
            && self.gap.is_finite()
            && self.gap > 0.0
            && self.ticks_per_label > 0;
        if ordered && usable {
            Ok(())
        } else {
            Err(RulerError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
                current: self.current_value,
                unit: self.unit,
                gap: self.gap,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Dragging {
        down_x: f32,
        last_x: f32,
        last_y: f32,
        moved: bool,
    },
    Animating,
}

/// Outcome of a pointer release or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// The release velocity started a fling; drive [`RulerModel::frame`]
    /// once per frame until it settles.
    Fling,
    /// The offset snapped to the nearest step; publish the value.
    Settled(f32),
    /// No gesture was live; nothing changed.
    Ignored,
}

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// No animation is live.
    Idle,
    /// Still in motion; publish the value and request the next frame.
    Moving(f32),
    /// Landed on the final offset and snapped; publish the value.
    Settled(f32),
}

/// The value/offset core of the ruler.
#[derive(Debug, Clone)]
pub struct RulerModel {
    min_value: f32,
    max_value: f32,
    unit: f32,
    steps_per_label: u32,
    gap: f32,
    /// Absolute step index of `min_value`, the phase for major ticks.
    base_step: i64,
    total_steps: i64,
    /// Whole steps from the minimum, `0..=total_steps`.
    current_step: i64,
    /// Pixel offset into the range, `0..=range_px`.
    distance: f32,
    range_px: f32,
    width: f32,
    half_width: f32,
    gesture: Gesture,
    scroller: Scroller,
    velocity: VelocityTracker,
}

impl RulerModel {
    pub fn new(config: &RulerConfig) -> Result<Self, RulerError> {
        let mut model = Self {
            min_value: 0.0,
            max_value: 0.0,
            unit: 1.0,
            steps_per_label: 1,
            gap: 1.0,
            base_step: 0,
            total_steps: 0,
            current_step: 0,
            distance: 0.0,
            range_px: 0.0,
            width: 0.0,
            half_width: 0.0,
            gesture: Gesture::Idle,
            scroller: Scroller::new(),
            velocity: VelocityTracker::new(),
        };
        model.configure(config)?;
        Ok(model)
    }

    /// Replaces the range, unit, label spacing, and current value
    /// atomically. Any in-flight animation or drag is cancelled. On error
    /// nothing changes.
    pub fn configure(&mut self, config: &RulerConfig) -> Result<(), RulerError> {
        config.validate()?;

        self.scroller.force_finished();
        self.gesture = Gesture::Idle;

        self.min_value = config.min_value;
        self.max_value = config.max_value;
        self.unit = config.unit;
        self.steps_per_label = config.ticks_per_label;
        self.gap = config.gap;

        let unit = config.unit as f64;
        self.base_step = (config.min_value as f64 / unit).round() as i64;
        self.total_steps = ((config.max_value - config.min_value) as f64 / unit).round() as i64;
        self.current_step = (((config.current_value - config.min_value) as f64 / unit).round()
            as i64)
            .clamp(0, self.total_steps);
        self.range_px = self.total_steps as f32 * self.gap;
        self.distance = self.current_step as f32 * self.gap;

        debug!(
            min = self.min_value,
            max = self.max_value,
            steps = self.total_steps,
            "ruler configured"
        );
        Ok(())
    }

    /// Starts an animated transition to `value`.
    ///
    /// The duration scales with the pixel distance so a full-range
    /// traversal takes the reference duration. The value is published from
    /// animation frames and becomes current on settle, not here. On error
    /// nothing changes.
    pub fn set_value(&mut self, value: f32, now_ms: u64) -> Result<(), RulerError> {
        if !value.is_finite() || value < self.min_value || value > self.max_value {
            return Err(RulerError::OutOfRange {
                value,
                min: self.min_value,
                max: self.max_value,
            });
        }

        self.scroller.force_finished();
        let target = self.step_of(value) as f32 * self.gap;
        let dx = target - self.distance;
        let duration_ms = if self.range_px > 0.0 {
            (dx.abs() * RANGE_SCROLL_MS as f32 / self.range_px) as u64
        } else {
            0
        };
        self.scroller.start_scroll(self.distance, dx, duration_ms, now_ms);
        self.gesture = Gesture::Animating;
        debug!(value, duration_ms, "scrolling to value");
        Ok(())
    }

    pub fn current_value(&self) -> f32 {
        self.value_of(self.current_step)
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Begins a gesture: cancels any animation and arms the drag/tap
    /// disambiguation.
    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: u64) {
        self.scroller.force_finished();
        self.velocity.reset();
        self.velocity.add(now_ms, x);
        self.gesture = Gesture::Dragging {
            down_x: x,
            last_x: x,
            last_y: y,
            moved: false,
        };
    }

    /// Feeds a pointer move. Returns whether the event was consumed.
    ///
    /// Until the gesture commits to a horizontal drag, a move whose
    /// vertical delta dominates, or whose total travel from the press is
    /// under the touch slop, is left unhandled so the host can treat it as
    /// a tap or vertical scroll. Committed drags accumulate the negated
    /// horizontal delta: dragging content left increases the value.
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: u64) -> bool {
        self.velocity.add(now_ms, x);
        let Gesture::Dragging {
            down_x,
            last_x,
            last_y,
            moved,
        } = &mut self.gesture
        else {
            return false;
        };

        let dx = x - *last_x;
        if !*moved {
            let dy = y - *last_y;
            if dx.abs() < dy.abs() || (x - *down_x).abs() < TOUCH_SLOP {
                *last_x = x;
                *last_y = y;
                return false;
            }
            *moved = true;
        }
        *last_x = x;
        *last_y = y;

        self.distance += -dx;
        self.recompute_from_distance();
        true
    }

    /// Ends a gesture: flings when the release velocity clears the
    /// threshold, otherwise settles in place.
    pub fn pointer_up(&mut self, x: f32, now_ms: u64) -> Release {
        if !matches!(self.gesture, Gesture::Dragging { .. }) {
            return Release::Ignored;
        }
        self.velocity.add(now_ms, x);

        let velocity = self.velocity.velocity_clamped(MAX_FLING_VELOCITY);
        if velocity.abs() >= MIN_FLING_VELOCITY {
            // Negated: finger moving left scrolls the offset rightwards.
            self.scroller
                .fling(self.distance, -velocity, 0.0, self.range_px, now_ms);
            self.gesture = Gesture::Animating;
            debug!(velocity, "fling started");
            Release::Fling
        } else {
            self.gesture = Gesture::Idle;
            Release::Settled(self.settle())
        }
    }

    /// Aborts a live drag (focus loss, gesture cancel) by settling where
    /// it stands. Animations are left running.
    pub fn pointer_cancel(&mut self) -> Release {
        if matches!(self.gesture, Gesture::Dragging { .. }) {
            self.gesture = Gesture::Idle;
            Release::Settled(self.settle())
        } else {
            Release::Ignored
        }
    }

    /// Advances a live fling or programmatic scroll by one frame.
    pub fn frame(&mut self, now_ms: u64) -> Frame {
        if !matches!(self.gesture, Gesture::Animating) {
            return Frame::Idle;
        }
        if self.scroller.compute_offset(now_ms) {
            if self.scroller.curr() != self.scroller.final_offset() {
                self.distance = self.scroller.curr();
                self.recompute_from_distance();
                Frame::Moving(self.current_value())
            } else {
                self.gesture = Gesture::Idle;
                Frame::Settled(self.settle())
            }
        } else {
            self.gesture = Gesture::Idle;
            Frame::Idle
        }
    }

    /// The viewport width, from layout.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.width = width;
        self.half_width = width / 2.0;
    }

    /// Tick descriptors for the current offset and viewport, overscanned
    /// two steps past each edge and clamped to the range.
    pub fn ticks(&self) -> Ticks {
        let start = (((self.distance - self.half_width) / self.gap).floor() as i64
            - OVERSCAN_STEPS)
            .max(0);
        let steps_in_width = (self.width / self.gap) as i64;
        let end = (start + steps_in_width + 2 * OVERSCAN_STEPS).min(self.total_steps);
        let x0 = self.half_width - (self.distance - start as f32 * self.gap);
        Ticks::new(
            start,
            end,
            x0,
            self.gap,
            self.base_step,
            self.steps_per_label as i64,
            self.min_value as f64,
            self.unit as f64,
        )
    }

    fn value_of(&self, step: i64) -> f32 {
        (self.min_value as f64 + step as f64 * self.unit as f64) as f32
    }

    fn step_of(&self, value: f32) -> i64 {
        ((((value - self.min_value) as f64) / self.unit as f64).round() as i64)
            .clamp(0, self.total_steps)
    }

    /// Clamps the offset to the range and floors it onto a whole step.
    fn recompute_from_distance(&mut self) {
        self.distance = self.distance.clamp(0.0, self.range_px);
        self.current_step = ((self.distance / self.gap) as i64).min(self.total_steps);
        trace!(
            distance = self.distance,
            step = self.current_step,
            "offset recomputed"
        );
    }

    /// Snaps the offset to the nearest whole step and returns the settled
    /// value.
    fn settle(&mut self) -> f32 {
        self.current_step = ((self.distance / self.gap).round() as i64).clamp(0, self.total_steps);
        self.distance = self.current_step as f32 * self.gap;
        trace!(
            distance = self.distance,
            step = self.current_step,
            "settled on step"
        );
        self.current_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: f32, max: f32, current: f32, unit: f32) -> RulerConfig {
        RulerConfig {
            min_value: min,
            max_value: max,
            current_value: current,
            unit,
            ..RulerConfig::default()
        }
    }

    /// Default range 0..=100, unit 0.1, gap 10px, viewport 400px.
    fn model() -> RulerModel {
        let mut model = RulerModel::new(&RulerConfig::default()).unwrap();
        model.set_viewport_width(400.0);
        model
    }

    /// Drives animation frames until the model settles, with a hard cap.
    fn run_to_settle(model: &mut RulerModel, mut now: u64) -> f32 {
        loop {
            now += 16;
            match model.frame(now) {
                Frame::Settled(value) => return value,
                Frame::Moving(_) => assert!(now < 60_000, "animation never settled"),
                Frame::Idle => panic!("animation dropped without settling"),
            }
        }
    }

    #[test]
    fn configure_adopts_current_value() {
        let model = RulerModel::new(&config(0.0, 100.0, 36.6, 0.1)).unwrap();
        assert!((model.current_value() - 36.6).abs() < 0.05);

        let model = RulerModel::new(&config(-5.0, 5.0, 0.0, 0.1)).unwrap();
        assert!(model.current_value().abs() < 1e-6);
    }

    #[test]
    fn configure_rejects_inverted_bounds() {
        assert!(matches!(
            RulerModel::new(&config(10.0, 0.0, 5.0, 0.1)),
            Err(RulerError::InvalidRange { .. })
        ));
    }

    #[test]
    fn configure_rejects_current_outside_bounds() {
        assert!(RulerModel::new(&config(0.0, 10.0, 11.0, 0.1)).is_err());
        assert!(RulerModel::new(&config(0.0, 10.0, -1.0, 0.1)).is_err());
    }

    #[test]
    fn configure_rejects_unusable_unit_and_gap() {
        assert!(RulerModel::new(&config(0.0, 10.0, 5.0, 0.0)).is_err());
        assert!(RulerModel::new(&config(0.0, 10.0, 5.0, f32::NAN)).is_err());
        let bad_gap = RulerConfig {
            gap: 0.0,
            ..RulerConfig::default()
        };
        assert!(RulerModel::new(&bad_gap).is_err());
    }

    #[test]
    fn failed_configure_leaves_state_untouched() {
        let mut model = model();
        model.set_value(42.0, 0).unwrap();
        run_to_settle(&mut model, 0);

        let err = model.configure(&config(10.0, 0.0, 5.0, 0.1));
        assert!(err.is_err());
        assert_eq!(model.current_value(), 42.0);
        assert_eq!(model.min_value(), 0.0);
        assert_eq!(model.max_value(), 100.0);
    }

    #[test]
    fn drag_left_increases_value_by_whole_steps() {
        let mut model = model();
        model.pointer_down(200.0, 40.0, 0);
        // Slow samples (past the stop gap) so the release reads as no fling.
        assert!(model.pointer_move(190.0, 40.0, 100));
        assert!(model.pointer_move(147.0, 40.0, 300));

        // 53px of travel floors to 5 steps while dragging.
        assert!((model.current_value() - 0.5).abs() < 1e-6);

        match model.pointer_up(147.0, 500) {
            Release::Settled(value) => assert!((value - 0.5).abs() < 1e-6),
            other => panic!("expected settle, got {other:?}"),
        }
    }

    #[test]
    fn drag_right_at_minimum_clamps() {
        let mut model = model();
        model.pointer_down(100.0, 40.0, 0);
        assert!(model.pointer_move(250.0, 40.0, 100));
        assert_eq!(model.current_value(), 0.0);
        match model.pointer_up(250.0, 300) {
            Release::Settled(value) => assert_eq!(value, 0.0),
            other => panic!("expected settle, got {other:?}"),
        }
    }

    #[test]
    fn drag_never_exceeds_maximum() {
        let mut model = RulerModel::new(&RulerConfig {
            max_value: 1.0,
            ..RulerConfig::default()
        })
        .unwrap();
        model.set_viewport_width(400.0);

        model.pointer_down(380.0, 40.0, 0);
        assert!(model.pointer_move(20.0, 40.0, 100));
        assert!(model.pointer_move(10.0, 40.0, 300));
        assert_eq!(model.current_value(), 1.0);
        match model.pointer_up(10.0, 500) {
            Release::Settled(value) => assert_eq!(value, 1.0),
            other => panic!("expected settle, got {other:?}"),
        }
    }

    #[test]
    fn vertical_moves_are_not_consumed() {
        let mut model = model();
        model.pointer_down(100.0, 40.0, 0);
        assert!(!model.pointer_move(102.0, 80.0, 16));
        assert_eq!(model.current_value(), 0.0);
    }

    #[test]
    fn sub_slop_moves_are_not_consumed() {
        let mut model = model();
        model.pointer_down(100.0, 40.0, 0);
        assert!(!model.pointer_move(95.0, 40.0, 16));
        assert_eq!(model.current_value(), 0.0);

        // Crossing the slop commits the drag; only deltas after the last
        // sample count.
        assert!(model.pointer_move(90.0, 40.0, 32));
        assert!((model.current_value() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn tap_without_movement_settles_in_place() {
        let mut model = model();
        model.pointer_down(200.0, 40.0, 0);
        match model.pointer_up(200.0, 50) {
            Release::Settled(value) => assert_eq!(value, 0.0),
            other => panic!("expected settle, got {other:?}"),
        }
    }

    #[test]
    fn up_without_down_is_ignored() {
        let mut model = model();
        assert_eq!(model.pointer_up(100.0, 0), Release::Ignored);
    }

    #[test]
    fn fast_release_flings_and_settles_on_a_step() {
        let mut model = model();
        model.pointer_down(300.0, 40.0, 0);
        assert!(model.pointer_move(280.0, 40.0, 16));
        assert!(model.pointer_move(260.0, 40.0, 32));
        assert!(model.pointer_move(240.0, 40.0, 48));
        let dragged_to = model.current_value();

        assert_eq!(model.pointer_up(240.0, 60), Release::Fling);
        let settled = run_to_settle(&mut model, 60);

        // The fling carried past the drag position, landed on a whole
        // step, and stayed inside the bounds.
        assert!(settled > dragged_to);
        assert!(settled <= model.max_value());
        let steps: f32 = (settled / 0.1).round();
        assert!((settled - steps * 0.1).abs() < 1e-4);
    }

    #[test]
    fn pointer_down_interrupts_a_fling() {
        let mut model = model();
        model.pointer_down(300.0, 40.0, 0);
        model.pointer_move(260.0, 40.0, 16);
        model.pointer_move(220.0, 40.0, 32);
        assert_eq!(model.pointer_up(220.0, 40), Release::Fling);
        model.frame(56);

        model.pointer_down(200.0, 40.0, 80);
        // The interrupted animation no longer produces frames.
        assert_eq!(model.frame(96), Frame::Idle);
    }

    #[test]
    fn set_value_round_trips_exactly() {
        let mut model = model();
        model.set_value(50.0, 0).unwrap();

        // First frames report motion without snapping.
        assert!(matches!(model.frame(16), Frame::Moving(_)));
        let settled = run_to_settle(&mut model, 16);
        assert_eq!(settled, 50.0);
        assert_eq!(model.current_value(), 50.0);
    }

    #[test]
    fn set_value_duration_scales_with_distance() {
        let mut model = model();
        // Target 50 of 100: 5000px of 10000px, so 1000ms of the 2000ms
        // reference. One frame past the duration must have settled.
        model.set_value(50.0, 0).unwrap();
        let mut settled_at = None;
        for now in (16..=2_000).step_by(16) {
            if let Frame::Settled(_) = model.frame(now) {
                settled_at = Some(now);
                break;
            }
        }
        let settled_at = settled_at.expect("scroll never settled");
        assert!((1_000..1_032).contains(&settled_at), "settled at {settled_at}");
    }

    #[test]
    fn set_value_rejects_out_of_range() {
        let mut model = model();
        let err = model.set_value(150.0, 0);
        assert_eq!(
            err,
            Err(RulerError::OutOfRange {
                value: 150.0,
                min: 0.0,
                max: 100.0
            })
        );
        assert_eq!(model.current_value(), 0.0);
        assert_eq!(model.frame(16), Frame::Idle);

        assert!(model.set_value(f32::NAN, 0).is_err());
        assert!(model.set_value(-0.1, 0).is_err());
    }

    #[test]
    fn cancel_settles_a_live_drag() {
        let mut model = model();
        model.pointer_down(200.0, 40.0, 0);
        model.pointer_move(145.0, 40.0, 100);
        match model.pointer_cancel() {
            Release::Settled(value) => assert!(value > 0.0),
            other => panic!("expected settle, got {other:?}"),
        }
        assert_eq!(model.pointer_cancel(), Release::Ignored);
    }

    #[test]
    fn ticks_cover_viewport_with_overscan() {
        let model = model();
        let all: Vec<_> = model.ticks().collect();
        // Offset 0, 400px viewport: steps 0..=44 survive clamping at the
        // left edge (40 in-view plus the right overscan).
        assert_eq!(all.first().unwrap().step, 0);
        assert_eq!(all.last().unwrap().step, 44);
        // Center of the viewport maps to the current step.
        assert_eq!(all[0].x, 200.0);
    }

    #[test]
    fn ticks_are_restartable_and_identical() {
        let mut model = model();
        model.pointer_down(200.0, 40.0, 0);
        model.pointer_move(163.0, 40.0, 100);

        let first: Vec<_> = model.ticks().collect();
        let second: Vec<_> = model.ticks().collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn tick_steps_stay_inside_the_range() {
        let mut model = model();
        model.set_value(100.0, 0).unwrap();
        run_to_settle(&mut model, 0);

        let all: Vec<_> = model.ticks().collect();
        assert!(all.iter().all(|t| (0..=1_000).contains(&t.step)));
        // At the right edge the last step is the maximum value.
        assert_eq!(all.last().unwrap().step, 1_000);
    }
}
