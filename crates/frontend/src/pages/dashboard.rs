use dioxus::prelude::*;
use quakescope_shared::filters::{filter_events, EventFilter};
use quakescope_shared::models::Feature;

use crate::api::Range;
use crate::components::map_view::MapView;
use crate::components::sidebar::Sidebar;
use crate::hooks::use_earthquake_feed;

/// Root controller: owns range, filters and selection, and wires the feed
/// through the filter layer into both views. Children receive read-only
/// state and report intent back upward.
#[component]
pub fn Dashboard() -> Element {
    let range = use_signal(Range::default);
    let filters = use_signal(EventFilter::default);
    let mut selected = use_signal(|| None::<Feature>);

    let mut feed = use_earthquake_feed(range);

    // Derived visible subset; recomputed only when its inputs change.
    let filtered = use_memo(move || match &*feed.data.read() {
        Some(data) => filter_events(&data.features, &filters.read()),
        None => Vec::new(),
    });

    let range_label = range.read().label();

    rsx! {
        div { class: "app",
            header { class: "header",
                h1 { "Earthquake Visualizer — Last {range_label}" }
                button {
                    class: "refresh",
                    onclick: move |_| feed.refetch(),
                    "Refresh"
                }
            }

            main { class: "content",
                Sidebar {
                    loading: feed.loading,
                    error: feed.error,
                    filters: filters,
                    events: filtered,
                    range: range,
                    on_select: move |ev: Feature| {
                        // A selection always carries a mappable position;
                        // it is NOT cleared by later range/filter changes.
                        if ev.position().is_some() {
                            selected.set(Some(ev));
                        }
                    },
                }
                MapView {
                    loading: feed.loading,
                    events: filtered,
                    selected: selected,
                }
            }

            footer { class: "footer",
                "Data: USGS. Basemap: equirectangular world map, Wikimedia Commons."
            }
        }
    }
}
