use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use quakescope_shared::geo::{self, MagnitudeBand, Viewport};
use quakescope_shared::models::Feature;

use crate::components::legend::Legend;
use crate::time;

pub(crate) const MAP_CONTAINER_ID: &str = "quake-map-container";

/// Drag threshold in pixels; movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

const ZOOM_STEP: f64 = 1.1;

/// Screen-pixel radius for marker click hit testing.
const MARKER_HIT_RADIUS: f64 = 14.0;

/// Reference container width used to normalize marker sizes.
const REFERENCE_WIDTH: f64 = 960.0;

/// Equirectangular world basemap (2:1), fetched from a public URL.
const WORLD_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/8/83/Equirectangular_projection_SW.jpg";

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
pub(crate) fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

// ---------------------------------------------------------------------------
// Marker descriptors
// ---------------------------------------------------------------------------

/// One renderable marker: an event with a valid position, projected into
/// world image pixels and banded by magnitude.
#[derive(Debug, Clone, PartialEq)]
struct MarkerPoint {
    id: String,
    pos: (f64, f64),
    band: MagnitudeBand,
    title: String,
}

fn marker_points(events: &[Feature]) -> Vec<MarkerPoint> {
    events
        .iter()
        .filter_map(|ev| {
            let (lon, lat) = ev.position()?;
            let mag = match ev.properties.mag {
                Some(m) => format!("M{m:.1}"),
                None => "M?".to_string(),
            };
            Some(MarkerPoint {
                id: ev.id.clone(),
                pos: geo::project(lon, lat),
                band: MagnitudeBand::from_magnitude(ev.magnitude()),
                title: format!("{} ({})", ev.place_or_unknown(), mag),
            })
        })
        .collect()
}

/// Escape text destined for SVG markup.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Euclidean distance between two points.
fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Find the index of the nearest position within `threshold`.
fn find_nearest(positions: &[(f64, f64)], click: (f64, f64), threshold: f64) -> Option<usize> {
    let mut best_idx = None;
    let mut best_dist = threshold;
    for (i, &pos) in positions.iter().enumerate() {
        let d = dist(pos, click);
        if d < best_dist {
            best_dist = d;
            best_idx = Some(i);
        }
    }
    best_idx
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

/// Build the marker overlay as an SVG string in world image pixel space.
fn build_svg_content(
    markers: &[MarkerPoint],
    zoom: f64,
    container_width: f64,
    selected_id: Option<&str>,
) -> String {
    let mut svg = String::with_capacity(4096);

    // Keeps markers a consistent physical size on screen regardless of
    // container width and (up to a cap) zoom level.
    let mobile_boost = (REFERENCE_WIDTH / container_width).max(1.0);
    let s = mobile_boost / zoom.min(5.0);

    for marker in markers {
        let (x, y) = marker.pos;
        let r = 7.0 * s;
        let sw = 2.0 * s;
        let fill = marker.band.color();
        let title = xml_escape(&marker.title);
        svg.push_str(&format!(r##"<g role="img"><title>{title}</title>"##));
        svg.push_str(&format!(
            r##"<circle cx="{x}" cy="{y}" r="{r}" fill="{fill}" fill-opacity="0.85" stroke="white" stroke-width="{sw}"/>"##
        ));
        if selected_id == Some(marker.id.as_str()) {
            build_selection_ring(&mut svg, x, y, s);
        }
        svg.push_str("</g>");
    }

    svg
}

/// Emit an animated dashed ring around the selected marker.
fn build_selection_ring(svg: &mut String, cx: f64, cy: f64, s: f64) {
    let r = 14.0 * s;
    let sw = 2.0 * s;
    let da1 = 5.0 * s;
    let da2 = 3.0 * s;
    svg.push_str(&format!(
        r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="white" stroke-width="{sw}" stroke-dasharray="{da1} {da2}" opacity="0.9"><animate attributeName="opacity" values="0.5;1;0.5" dur="1.2s" repeatCount="indefinite"/></circle>"##
    ));
}

// ---------------------------------------------------------------------------
// Popup
// ---------------------------------------------------------------------------

/// Screen-positioned popup content for one event.
struct PopupView {
    x: f64,
    y: f64,
    place: String,
    magnitude: String,
    depth: Option<String>,
    when: Option<String>,
    url: Option<String>,
}

fn popup_view(ev: &Feature, viewport: &Viewport, container_w: f64) -> Option<PopupView> {
    let (lon, lat) = ev.position()?;
    let (x, y) = geo::screen_position(viewport, geo::project(lon, lat), container_w);
    Some(PopupView {
        x,
        y,
        place: ev.place_or_unknown().to_string(),
        magnitude: format!("{}", ev.magnitude()),
        depth: ev.depth_km().map(|d| format!("{d} km")),
        when: ev.properties.time.map(time::format_timestamp_ms),
        url: ev.properties.url.clone(),
    })
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// World map panel: one colored marker per filtered event with a valid
/// position, viewport fitted to the visible markers, fly-to plus forced
/// popup on selection, draggable legend overlay, and a non-blocking
/// loading indicator.
#[component]
pub fn MapView(
    loading: ReadSignal<bool>,
    events: ReadSignal<Vec<Feature>>,
    selected: ReadSignal<Option<Feature>>,
) -> Element {
    let mut viewport = use_signal(Viewport::default);
    let mut popup_open = use_signal(|| None::<String>);

    // Drag state
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_pan = use_signal(|| (0.0_f64, 0.0_f64));

    let markers = use_memo(move || marker_points(&events.read()));

    // Fit the viewport to all visible markers whenever the filtered set
    // changes. Zero points leave the viewport alone.
    use_effect(move || {
        let pts: Vec<(f64, f64)> = markers.read().iter().map(|m| m.pos).collect();
        let Some(rect) = container_rect() else { return };
        if let Some(vp) = geo::fit_points(&pts, rect.width(), rect.height()) {
            viewport.set(vp);
        }
    });

    // Fly to the selection and force its popup open, even when the event
    // is no longer in the filtered set.
    use_effect(move || {
        let sel = selected.read();
        let Some(ev) = sel.as_ref() else { return };
        let Some((lon, lat)) = ev.position() else { return };
        popup_open.set(Some(ev.id.clone()));
        let Some(rect) = container_rect() else { return };
        viewport.set(geo::fly_to(
            geo::project(lon, lat),
            rect.width(),
            rect.height(),
        ));
    });

    let selected_id = use_memo(move || selected.read().as_ref().map(|ev| ev.id.clone()));

    // Zoom isolated behind its own memo so pan-only viewport changes
    // (every mousemove of a drag) don't rebuild the SVG overlay.
    let zoom_level = use_memo(move || viewport.read().zoom);

    let svg_html = use_memo(move || {
        let markers = markers.read();
        let zoom = *zoom_level.read();
        let cw = container_rect().map(|r| r.width()).unwrap_or(REFERENCE_WIDTH);
        let content = build_svg_content(&markers, zoom, cw, selected_id.read().as_deref());
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="none" style="position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:5;">{}</svg>"#,
            geo::WORLD_WIDTH_PX,
            geo::WORLD_HEIGHT_PX,
            content
        )
    });

    let vp = *viewport.read();
    let dragging = *is_dragging.read();
    let transform_style = format!(
        "transform: translate({}px, {}px) scale({}); transform-origin: 0 0;",
        vp.pan_x, vp.pan_y, vp.zoom
    );
    let container_class = if dragging {
        "map-container dragging"
    } else {
        "map-container"
    };

    // The open popup: taken from the filtered set, falling back to the
    // selection itself when the filters have hidden it.
    let popup = popup_open.read().as_ref().and_then(|id| {
        let ev = events
            .read()
            .iter()
            .find(|ev| &ev.id == id)
            .cloned()
            .or_else(|| {
                selected
                    .read()
                    .clone()
                    .filter(|ev| &ev.id == id)
            })?;
        let rect = container_rect()?;
        popup_view(&ev, &vp, rect.width())
    });

    rsx! {
        div { class: "map-panel",
            div {
                id: MAP_CONTAINER_ID,
                class: "{container_class}",

                onwheel: move |evt: Event<WheelData>| {
                    evt.prevent_default();

                    let delta_y = wheel_delta_y(evt.data().delta());
                    let factor = if delta_y < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                    let old_vp = *viewport.read();
                    let new_zoom = (old_vp.zoom * factor).clamp(geo::ZOOM_MIN, geo::ZOOM_MAX);
                    if (new_zoom - old_vp.zoom).abs() < 1e-9 {
                        return;
                    }

                    let Some(rect) = container_rect() else { return };
                    let client = evt.data().client_coordinates();
                    let cx = client.x - rect.left();
                    let cy = client.y - rect.top();

                    let (px, py) = geo::zoom_pan_at_cursor(
                        cx, cy, old_vp.zoom, new_zoom, old_vp.pan_x, old_vp.pan_y,
                    );
                    let (px, py) = geo::clamp_pan(px, py, new_zoom, rect.width(), rect.height());
                    viewport.set(Viewport { zoom: new_zoom, pan_x: px, pan_y: py });
                },

                onmousedown: move |evt: Event<MouseData>| {
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    let client = evt.client_coordinates();
                    let cur = *viewport.peek();
                    is_dragging.set(true);
                    did_drag.set(false);
                    drag_start.set((client.x, client.y));
                    drag_start_pan.set((cur.pan_x, cur.pan_y));
                },

                onmousemove: move |evt: Event<MouseData>| {
                    if !*is_dragging.read() {
                        return;
                    }
                    let client = evt.client_coordinates();
                    let (sx, sy) = *drag_start.read();
                    let dx = client.x - sx;
                    let dy = client.y - sy;

                    if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                        did_drag.set(true);
                    }
                    if *did_drag.read() {
                        let (start_px, start_py) = *drag_start_pan.read();
                        let cur = *viewport.peek();
                        let (px, py) = match container_rect() {
                            Some(rect) => geo::clamp_pan(
                                start_px + dx, start_py + dy, cur.zoom, rect.width(), rect.height(),
                            ),
                            None => (start_px + dx, start_py + dy),
                        };
                        viewport.set(Viewport { zoom: cur.zoom, pan_x: px, pan_y: py });
                    }
                },

                onmouseup: move |evt: Event<MouseData>| {
                    let was_dragging = *is_dragging.read();
                    let was_drag = *did_drag.read();
                    is_dragging.set(false);

                    // A mouseup without drag movement = a click: open the
                    // nearest marker's popup, or close the open one.
                    if was_dragging && !was_drag {
                        let Some(rect) = container_rect() else { return };
                        let client = evt.client_coordinates();
                        let click = (client.x - rect.left(), client.y - rect.top());

                        let cur = *viewport.peek();
                        let points = markers.peek();
                        let positions: Vec<(f64, f64)> = points
                            .iter()
                            .map(|m| geo::screen_position(&cur, m.pos, rect.width()))
                            .collect();
                        match find_nearest(&positions, click, MARKER_HIT_RADIUS) {
                            Some(i) => popup_open.set(Some(points[i].id.clone())),
                            None => popup_open.set(None),
                        }
                    }
                },

                onmouseleave: move |_| {
                    is_dragging.set(false);
                },

                ondoubleclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    viewport.set(Viewport::default());
                },

                // Inner wrapper: the CSS transform applies zoom/pan to the
                // basemap and marker overlay together.
                div {
                    class: "map-inner",
                    style: "{transform_style}",

                    img { src: WORLD_IMAGE_URL, draggable: "false", alt: "World map" }

                    div {
                        dangerous_inner_html: "{svg_html}",
                        style: "position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;",
                    }
                }

                // Popup overlay (outside the transform so it never scales)
                if let Some(p) = popup {
                    div {
                        class: "map-popup",
                        style: "left: {p.x}px; top: {p.y}px;",
                        button {
                            class: "popup-close",
                            onclick: move |_| popup_open.set(None),
                            "×"
                        }
                        div { class: "popup-place", "{p.place}" }
                        div {
                            "Magnitude: "
                            span { class: "popup-strong", "{p.magnitude}" }
                        }
                        if let Some(depth) = &p.depth {
                            div { "Depth: {depth}" }
                        }
                        if let Some(when) = &p.when {
                            div { "Time: {when}" }
                        }
                        if let Some(url) = &p.url {
                            a {
                                class: "popup-link",
                                href: "{url}",
                                target: "_blank",
                                rel: "noreferrer",
                                "USGS Event Page →"
                            }
                        }
                    }
                }

                Legend {}

                if *loading.read() {
                    div { class: "map-loading",
                        div { class: "map-loading-text", "Loading earthquakes…" }
                    }
                }
            }
        }
    }
}
