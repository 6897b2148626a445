//! Appearance parameters for the ruler.
//!
//! These affect rendering only; the value model never reads them. The
//! defaults give a dark scale: near-black background, light gradation
//! lines, blue center indicator.

use floem::peniko::Color;

/// Colors, line metrics, and text sizing for [`Ruler`](crate::Ruler).
///
/// Construct with struct update syntax over [`Default`]:
///
/// ```rust
/// use floem_ruler::RulerStyle;
///
/// let style = RulerStyle {
///     text_size: 12.0,
///     ..RulerStyle::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RulerStyle {
    /// Background fill.
    pub bg_color: Color,
    /// Color of minor and major tick lines.
    pub tick_color: Color,
    /// Stroke width of minor ticks.
    pub short_tick_width: f32,
    /// Stroke width of major (labeled) ticks.
    pub long_tick_width: f32,
    /// Line length of minor ticks.
    pub short_tick_len: f32,
    /// Line length of major ticks.
    pub long_tick_len: f32,
    /// Major tick label color.
    pub text_color: Color,
    /// Major tick label font size.
    pub text_size: f32,
    /// Vertical gap between the label row and the tick band.
    pub label_gap: f32,
    /// Center indicator color.
    pub indicator_color: Color,
    /// Center indicator stroke width.
    pub indicator_width: f32,
    /// Center indicator line length; ticks are centered inside this band.
    pub indicator_len: f32,
}

impl Default for RulerStyle {
    fn default() -> Self {
        Self {
            bg_color: Color::rgb8(0x1f, 0x1f, 0x1f),
            tick_color: Color::rgb8(0xcc, 0xcc, 0xcc),
            short_tick_width: 1.0,
            long_tick_width: 2.0,
            short_tick_len: 16.0,
            long_tick_len: 32.0,
            text_color: Color::rgb8(0xe0, 0xe0, 0xe0),
            text_size: 14.0,
            label_gap: 8.0,
            indicator_color: Color::rgb8(0x2b, 0x99, 0xd0),
            indicator_width: 3.0,
            indicator_len: 35.0,
        }
    }
}
