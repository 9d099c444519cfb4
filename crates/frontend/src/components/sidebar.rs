use dioxus::prelude::*;
use quakescope_shared::filters::{summarize, EventFilter};
use quakescope_shared::models::Feature;

use crate::api::Range;
use crate::time;

#[component]
fn Stat(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat",
            div { class: "stat-label", "{label}" }
            div { class: "stat-value", "{value}" }
        }
    }
}

/// Filter/list panel: summary stats over the filtered set, range and
/// filter controls, and one row per visible event. Clicking a row reports
/// that event upward as the new selection.
#[component]
pub fn Sidebar(
    loading: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
    filters: Signal<EventFilter>,
    events: ReadSignal<Vec<Feature>>,
    range: Signal<Range>,
    on_select: EventHandler<Feature>,
) -> Element {
    let stats = use_memo(move || summarize(&events.read()));

    let min_mag = filters.read().min_magnitude;
    let query = filters.read().query.clone();

    let has_error = error.read().is_some();
    let is_loading = *loading.read();
    let is_empty = events.read().is_empty();

    // Pre-render row labels so the click closure owns only the event.
    let rows: Vec<(String, String, String, String, Feature)> = events
        .read()
        .iter()
        .map(|ev| {
            let mag = match ev.properties.mag {
                Some(m) => format!("M{m:.1}"),
                None => "M?".to_string(),
            };
            let when = match ev.properties.time {
                Some(t) => time::format_timestamp_ms(t),
                None => "—".to_string(),
            };
            let place = ev.place_or_unknown().to_string();
            (ev.id.clone(), mag, when, place, ev.clone())
        })
        .collect();

    rsx! {
        aside { class: "sidebar",
            section { class: "panel",
                h2 { "Range" }
                div { class: "range-buttons",
                    for (r, title) in Range::ALL.map(|r| (r, r.title())) {
                        button {
                            class: if *range.read() == r { "range-button active" } else { "range-button" },
                            onclick: move |_| range.set(r),
                            "{title}"
                        }
                    }
                }
            }

            section { class: "panel",
                h2 { "Filters" }
                label { class: "field-label", "Minimum Magnitude" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "7",
                    step: "0.1",
                    value: "{min_mag}",
                    oninput: move |evt: Event<FormData>| {
                        let v = evt.value().parse::<f64>().unwrap_or(0.0);
                        filters.write().min_magnitude = v;
                    },
                }
                div { class: "field-hint",
                    "Current: "
                    span { class: "field-current", "{min_mag:.1}" }
                }

                label { class: "field-label", "Search by Place/Region" }
                input {
                    r#type: "text",
                    placeholder: "e.g., Alaska, Japan",
                    value: "{query}",
                    oninput: move |evt: Event<FormData>| {
                        filters.write().query = evt.value();
                    },
                }
            }

            section { class: "panel",
                h2 { "Stats" }
                div { class: "stats-grid",
                    Stat { label: "Total", value: stats.read().count.to_string() }
                    Stat { label: "Max M", value: stats.read().max_mag.clone() }
                    Stat { label: "Avg M", value: stats.read().avg_mag.clone() }
                }
            }

            section { class: "panel",
                h2 { "Earthquakes" }
                div { class: "event-box",
                    // Error first: it wins over the empty-after-filter state.
                    if has_error {
                        div { class: "list-message error",
                            "Couldn't load data. Check your connection and try Refresh."
                        }
                    } else if is_loading && is_empty {
                        div { class: "list-message", "Loading earthquakes…" }
                    } else if is_empty {
                        div { class: "list-message", "No earthquakes matched your filters." }
                    }
                    ul { class: "event-list",
                        for (id, mag, when, place, ev) in rows {
                            li {
                                key: "{id}",
                                onclick: move |_| on_select.call(ev.clone()),
                                div { class: "event-row-top",
                                    span { class: "event-mag", "{mag}" }
                                    span { class: "event-time", "{when}" }
                                }
                                div { class: "event-place", "{place}" }
                            }
                        }
                    }
                }
            }

            p { class: "sidebar-tip",
                "Tip: switch ranges to compare activity, and click a row to fly to it on the map."
            }
        }
    }
}
