//! Rejection kinds for configuration and programmatic value changes.
//!
//! Both variants are raised before any state is mutated; a failed call
//! leaves the ruler exactly as it was.

use thiserror::Error;

/// Errors surfaced by [`RulerModel`](crate::RulerModel) and the widget
/// constructor.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RulerError {
    /// The configuration is unusable: inverted bounds, a current value
    /// outside the bounds, a non-positive unit or gap, a zero label count,
    /// or non-finite inputs.
    #[error(
        "invalid configuration: min={min}, max={max}, current={current}, unit={unit}, gap={gap}"
    )]
    InvalidRange {
        min: f32,
        max: f32,
        current: f32,
        unit: f32,
        gap: f32,
    },

    /// A programmatic value set landed outside the configured bounds.
    #[error("value {value} is out of range [{min}, {max}]")]
    OutOfRange { value: f32, min: f32, max: f32 },
}
