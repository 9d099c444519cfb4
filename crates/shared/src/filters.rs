//! Client-side event filtering and summary statistics.
//!
//! Filtering is a pure function of the raw feed and the active filter
//! state; it never reorders events and never mutates its inputs.

use crate::models::Feature;

/// Active filter state, owned by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    /// Minimum magnitude, 0–7 inclusive.
    pub min_magnitude: f64,
    /// Case-insensitive substring match against the place description.
    pub query: String,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            min_magnitude: 0.0,
            query: String::new(),
        }
    }
}

impl EventFilter {
    /// Check whether an event passes both filter criteria.
    #[must_use]
    pub fn matches(&self, event: &Feature) -> bool {
        if event.magnitude() < self.min_magnitude {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let place = event
            .properties
            .place
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        place.contains(&self.query.to_lowercase())
    }
}

/// Derive the visible subset of `events`, preserving feed order.
#[must_use]
pub fn filter_events(events: &[Feature], filter: &EventFilter) -> Vec<Feature> {
    events
        .iter()
        .filter(|ev| filter.matches(ev))
        .cloned()
        .collect()
}

/// Summary statistics over the filtered set, pre-formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    /// Maximum magnitude to one decimal, or `"-"` when empty.
    pub max_mag: String,
    /// Mean magnitude to two decimals, or `"-"` when empty.
    pub avg_mag: String,
}

/// Compute display statistics for the event list panel.
#[must_use]
pub fn summarize(events: &[Feature]) -> SummaryStats {
    if events.is_empty() {
        return SummaryStats {
            count: 0,
            max_mag: "-".to_string(),
            avg_mag: "-".to_string(),
        };
    }

    let mags: Vec<f64> = events
        .iter()
        .map(Feature::magnitude)
        .filter(|m| m.is_finite())
        .collect();
    if mags.is_empty() {
        return SummaryStats {
            count: events.len(),
            max_mag: "-".to_string(),
            avg_mag: "-".to_string(),
        };
    }

    let max = mags.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = mags.iter().sum::<f64>() / mags.len() as f64;
    SummaryStats {
        count: events.len(),
        max_mag: format!("{max:.1}"),
        avg_mag: format!("{avg:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, Properties};

    fn event(id: &str, mag: Option<f64>, place: Option<&str>) -> Feature {
        Feature {
            id: id.to_string(),
            geometry: Some(Geometry {
                coordinates: vec![0.0, 0.0, 10.0],
            }),
            properties: Properties {
                mag,
                place: place.map(str::to_string),
                time: None,
                url: None,
            },
        }
    }

    #[test]
    fn test_magnitude_and_query_filter() {
        let events = vec![
            event("1", Some(3.0), Some("Alaska")),
            event("2", Some(6.5), Some("Japan")),
        ];

        let filter = EventFilter {
            min_magnitude: 4.0,
            query: String::new(),
        };
        let visible = filter_events(&events, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");

        let stats = summarize(&visible);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.max_mag, "6.5");
        assert_eq!(stats.avg_mag, "6.50");
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let events = vec![
            event("1", Some(2.0), Some("10 km NE of Anchorage, Alaska")),
            event("2", Some(2.0), Some("near the coast of Honshu, Japan")),
        ];
        let filter = EventFilter {
            min_magnitude: 0.0,
            query: "ALASKA".to_string(),
        };
        let visible = filter_events(&events, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn test_missing_place_only_matches_empty_query() {
        let events = vec![event("1", Some(5.0), None)];

        let no_query = EventFilter::default();
        assert_eq!(filter_events(&events, &no_query).len(), 1);

        let with_query = EventFilter {
            min_magnitude: 0.0,
            query: "japan".to_string(),
        };
        assert!(filter_events(&events, &with_query).is_empty());
    }

    #[test]
    fn test_missing_magnitude_counts_as_zero() {
        let events = vec![event("1", None, Some("somewhere"))];

        let zero_min = EventFilter::default();
        assert_eq!(filter_events(&events, &zero_min).len(), 1);

        let positive_min = EventFilter {
            min_magnitude: 0.1,
            query: String::new(),
        };
        assert!(filter_events(&events, &positive_min).is_empty());
    }

    #[test]
    fn test_output_is_ordered_subset() {
        let events = vec![
            event("a", Some(5.0), Some("Chile")),
            event("b", Some(1.0), Some("Chile")),
            event("c", Some(6.0), Some("Chile")),
            event("d", Some(4.0), Some("Peru")),
        ];
        let filter = EventFilter {
            min_magnitude: 3.5,
            query: "chile".to_string(),
        };
        let visible = filter_events(&events, &filter);

        let ids: Vec<&str> = visible.iter().map(|ev| ev.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        for ev in &visible {
            assert!(ev.magnitude() >= filter.min_magnitude);
            assert!(events.contains(ev));
        }
    }

    #[test]
    fn test_stats_empty_set() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.max_mag, "-");
        assert_eq!(stats.avg_mag, "-");
    }

    #[test]
    fn test_stats_mixed_magnitudes() {
        let events = vec![
            event("1", Some(2.0), None),
            event("2", None, None),
            event("3", Some(4.0), None),
        ];
        let stats = summarize(&events);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.max_mag, "4.0");
        // Missing magnitude contributes 0 to the mean.
        assert_eq!(stats.avg_mag, "2.00");
    }
}
