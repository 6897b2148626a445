//! # floem-ruler
//!
//! A horizontally scrollable ruler/slider widget for
//! [Floem](https://github.com/lapce/floem).
//!
//! The ruler renders minor and labeled major tick marks under a fixed
//! center indicator. Dragging scrolls the scale (content left raises the
//! value), a fast release flings with deceleration, and every gesture ends
//! by snapping to the nearest tick. The selected value is reported through
//! the bound signal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_ruler::{ruler, RulerConfig};
//!
//! let config = RwSignal::new(RulerConfig {
//!     min_value: 0.0,
//!     max_value: 100.0,
//!     current_value: 36.6,
//!     ..RulerConfig::default()
//! });
//! let value = RwSignal::new(0.0f32);
//! // Use `ruler(config, value)?` in your Floem view tree; `value` tracks
//! // the selection and writing to it scrolls the ruler.
//! ```
//!
//! The value/offset core is exposed as [`RulerModel`] for headless use.

mod constants;
mod error;
mod model;
mod ruler;
mod scroller;
mod style;
mod ticks;
mod velocity;

pub use error::RulerError;
pub use model::{Frame, Release, RulerConfig, RulerModel};
pub use ruler::{ruler, Ruler};
pub use style::RulerStyle;
pub use ticks::{Tick, Ticks};
