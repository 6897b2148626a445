//! Gesture and animation constants for the ruler.

use std::time::Duration;

/// Default widget height when the layout does not constrain it
pub const DEFAULT_HEIGHT: f32 = 80.0;

/// Drag threshold in logical pixels; moves closer to the press than this
/// are taps, not drags
pub const TOUCH_SLOP: f32 = 8.0;

/// Releases slower than this (px/s) settle in place instead of flinging
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Velocity cap (px/s) handed to the fling physics
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Fling friction in px/s²
pub const FLING_DECELERATION: f32 = 1_800.0;

/// Animation frame pacing while a fling or programmatic scroll is live
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Reference duration for a programmatic scroll across the full range;
/// shorter moves scale down proportionally
pub const RANGE_SCROLL_MS: u64 = 2_000;

/// Extra tick steps laid out past each edge of the viewport so ticks are
/// already positioned before they scroll into view
pub const OVERSCAN_STEPS: i64 = 2;
