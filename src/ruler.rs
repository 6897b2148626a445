//! The ruler widget: Floem `View` binding over [`RulerModel`].
//!
//! Pointer events and layout feed the model; painting consumes its tick
//! descriptors. Fling and programmatic scrolls are driven by one-shot
//! frame timers that re-arm while an animation is live.

use std::collections::HashMap;
use std::time::Instant;

use floem::action::exec_after;
use floem::kurbo::{Cap, Line, Point, Rect, Stroke};
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::text::{Attrs, AttrsList, TextLayout};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;
use tracing::warn;

use crate::constants;
use crate::error::RulerError;
use crate::model::{Frame, Release, RulerConfig, RulerModel};
use crate::style::RulerStyle;

enum RulerUpdate {
    Value(f32),
    Config(RulerConfig),
    Frame,
}

/// A horizontally scrollable ruler with tick marks, numeric labels, and a
/// fixed center indicator. Created with [`ruler`].
pub struct Ruler {
    id: ViewId,
    model: RulerModel,
    style: RulerStyle,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(f32)>>,
    /// Timestamp origin for pointer samples and animation frames.
    epoch: Instant,
    frame_queued: bool,
    /// Label layouts keyed by text; ticks reuse labels heavily while
    /// scrolling.
    label_cache: HashMap<String, TextLayout>,
}

/// Creates a ruler bound to `config` and `value`.
///
/// Fails with [`RulerError::InvalidRange`] when the initial configuration
/// is unusable. Afterwards both signals stay live: writing `value` animates
/// the ruler to that value, writing `config` replaces the range atomically,
/// and every value change the ruler produces (drag, fling, settle) is
/// written back into `value`. Invalid runtime writes are rejected without
/// touching state and logged.
///
/// ```rust,no_run
/// use floem::prelude::*;
/// use floem_ruler::{ruler, RulerConfig};
///
/// let config = RwSignal::new(RulerConfig::default());
/// let value = RwSignal::new(0.0f32);
/// let widget = ruler(config, value).unwrap();
/// ```
pub fn ruler(config: RwSignal<RulerConfig>, value: RwSignal<f32>) -> Result<Ruler, RulerError> {
    let model = RulerModel::new(&config.get_untracked())?;
    // The initial configure notifies the observer.
    value.set(model.current_value());

    let id = ViewId::new();

    create_effect(move |_| {
        let v = value.get();
        id.update_state(RulerUpdate::Value(v));
    });

    create_effect(move |_| {
        let c = config.get();
        id.update_state(RulerUpdate::Config(c));
    });

    Ok(Ruler {
        id,
        model,
        style: RulerStyle::default(),
        size: Default::default(),
        on_change: Some(Box::new(move |v| value.set(v))),
        epoch: Instant::now(),
        frame_queued: false,
        label_cache: HashMap::new(),
    }
    .style(|s| s.width_full().height(constants::DEFAULT_HEIGHT)))
}

impl Ruler {
    /// Replaces the appearance parameters.
    pub fn ruler_style(mut self, style: RulerStyle) -> Self {
        self.style = style;
        self
    }

    /// Replaces the value observer. The default observer writes into the
    /// `value` signal the ruler was created with; there is a single slot.
    pub fn on_change(mut self, on_change: impl Fn(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn current_value(&self) -> f32 {
        self.model.current_value()
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn publish(&self, value: f32) {
        if let Some(on_change) = &self.on_change {
            on_change(value);
        }
    }

    /// Arms one frame timer; at most one is in flight.
    fn schedule_frame(&mut self) {
        if self.frame_queued {
            return;
        }
        self.frame_queued = true;
        let id = self.id;
        exec_after(constants::FRAME_INTERVAL, move |_| {
            id.update_state(RulerUpdate::Frame);
        });
    }

    fn label_layout(&mut self, text: &str) -> &TextLayout {
        let style = &self.style;
        self.label_cache.entry(text.to_string()).or_insert_with(|| {
            let mut layout = TextLayout::new();
            let attrs = Attrs::new()
                .color(style.text_color)
                .font_size(style.text_size);
            layout.set_text(text, AttrsList::new(attrs));
            layout
        })
    }
}

impl View for Ruler {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<RulerUpdate>() {
            match *update {
                RulerUpdate::Value(value) => {
                    // Round trips of our own publishes arrive here; only a
                    // genuinely new value starts a scroll.
                    if value == self.model.current_value() {
                        return;
                    }
                    match self.model.set_value(value, self.now_ms()) {
                        Ok(()) => {
                            self.schedule_frame();
                            self.id.request_paint();
                        }
                        Err(err) => warn!(%err, "ignoring value signal write"),
                    }
                }
                RulerUpdate::Config(config) => match self.model.configure(&config) {
                    Ok(()) => {
                        self.publish(self.model.current_value());
                        self.id.request_paint();
                    }
                    Err(err) => warn!(%err, "ignoring config signal write"),
                },
                RulerUpdate::Frame => {
                    self.frame_queued = false;
                    match self.model.frame(self.now_ms()) {
                        Frame::Moving(value) => {
                            self.publish(value);
                            self.id.request_paint();
                            self.schedule_frame();
                        }
                        Frame::Settled(value) => {
                            self.publish(value);
                            self.id.request_paint();
                        }
                        Frame::Idle => {}
                    }
                }
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.model
                    .pointer_down(e.pos.x as f32, e.pos.y as f32, self.now_ms());
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self
                    .model
                    .pointer_move(e.pos.x as f32, e.pos.y as f32, self.now_ms())
                {
                    self.publish(self.model.current_value());
                    self.id.request_paint();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                match self.model.pointer_up(e.pos.x as f32, self.now_ms()) {
                    Release::Fling => {
                        self.schedule_frame();
                        self.id.request_paint();
                    }
                    Release::Settled(value) => {
                        self.publish(value);
                        self.id.request_paint();
                    }
                    Release::Ignored => {}
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                if let Release::Settled(value) = self.model.pointer_cancel() {
                    self.publish(value);
                    self.id.request_paint();
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        self.model.set_viewport_width(layout.size.width);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let width = self.size.width as f64;
        let height = self.size.height as f64;
        if width == 0.0 || height == 0.0 {
            return;
        }

        let style = self.style.clone();
        cx.fill(&Rect::new(0.0, 0.0, width, height), style.bg_color, 0.0);

        // Ticks hang below the label row, centered in the indicator band.
        let band_top = (style.label_gap + style.text_size) as f64;

        for tick in self.model.ticks() {
            let x = tick.x as f64;
            let (len, line_width) = if tick.is_major {
                (style.long_tick_len, style.long_tick_width)
            } else {
                (style.short_tick_len, style.short_tick_width)
            };
            let y0 = band_top + ((style.indicator_len - len) / 2.0) as f64;
            let y1 = y0 + len as f64;
            cx.stroke(
                &Line::new((x, y0), (x, y1)),
                style.tick_color,
                &Stroke::new(line_width as f64),
            );

            if let Some(label) = &tick.label {
                let layout = self.label_layout(label);
                let text_width = layout.size().width;
                cx.draw_text(layout, Point::new(x - text_width / 2.0, 0.0));
            }
        }

        let center = width / 2.0;
        cx.stroke(
            &Line::new((center, band_top), (center, band_top + style.indicator_len as f64)),
            style.indicator_color,
            &Stroke::new(style.indicator_width as f64).with_caps(Cap::Round),
        );
    }
}
