//! Standalone demo: a ruler with a live value readout above it.

use floem::peniko::Color;
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_ruler::{ruler, RulerConfig};

fn main() {
    let config = RwSignal::new(RulerConfig {
        min_value: 0.0,
        max_value: 100.0,
        current_value: 36.6,
        ..RulerConfig::default()
    });
    let value = RwSignal::new(0.0f32);

    floem::Application::new()
        .window(
            move |_| {
                v_stack((
                    label(move || format!("{:.1}", value.get())).style(|s| {
                        s.font_size(28.0)
                            .color(Color::rgb8(0x2b, 0x99, 0xd0))
                            .margin_bottom(16.0)
                    }),
                    ruler(config, value).expect("demo configuration is valid"),
                ))
                .style(|s| {
                    s.size_full()
                        .items_center()
                        .justify_center()
                        .background(Color::rgb8(0x12, 0x12, 0x12))
                })
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((520.0, 220.0))
                    .title("floem-ruler"),
            ),
        )
        .run();
}
