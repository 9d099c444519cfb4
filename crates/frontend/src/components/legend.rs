use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use quakescope_shared::geo::MagnitudeBand;

use crate::components::map_view::container_rect;

/// Magnitude legend overlay. Fixed relative to the map panel (it does
/// not move with panning or zooming), but the user can drag it anywhere
/// without touching map state.
#[component]
pub fn Legend() -> Element {
    // None = default corner position from CSS; Some = user-dragged offset
    // relative to the map panel.
    let mut position = use_signal(|| None::<(f64, f64)>);
    let mut dragging = use_signal(|| false);
    let mut grab = use_signal(|| (0.0_f64, 0.0_f64));

    let style = match *position.read() {
        Some((x, y)) => format!("left: {x}px; top: {y}px; right: auto; bottom: auto;"),
        None => String::new(),
    };

    rsx! {
        div {
            class: "map-legend",
            style: "{style}",

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                // Keep the map's own drag handler out of this gesture.
                evt.stop_propagation();
                let element = evt.element_coordinates();
                dragging.set(true);
                grab.set((element.x, element.y));
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*dragging.read() {
                    return;
                }
                evt.stop_propagation();
                let Some(rect) = container_rect() else { return };
                let client = evt.client_coordinates();
                let (gx, gy) = *grab.read();
                position.set(Some((
                    client.x - rect.left() - gx,
                    client.y - rect.top() - gy,
                )));
            },

            onmouseup: move |evt: Event<MouseData>| {
                if *dragging.read() {
                    evt.stop_propagation();
                }
                dragging.set(false);
            },

            onmouseleave: move |_| {
                dragging.set(false);
            },

            h4 { class: "legend-title", "Magnitude" }
            for (color, label) in MagnitudeBand::ALL.map(|b| (b.color(), b.label())) {
                div { class: "legend-row",
                    span {
                        class: "legend-swatch",
                        style: "background: {color};",
                    }
                    "{label}"
                }
            }
        }
    }
}
