//! Data model for USGS earthquake summary feeds.
//!
//! These structures match the GeoJSON format published by the USGS
//! summary endpoints. Every field the upstream marks optional is optional
//! here as well; a missing field must never fail the whole render.

use serde::Deserialize;

/// Top-level GeoJSON envelope from a USGS summary feed.
///
/// Each successful fetch replaces the previous collection wholesale;
/// there is no merging or identity reconciliation across fetches.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FeatureCollection {
    /// Earthquake events, in feed order.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single earthquake event.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Feature {
    /// Unique event ID within a fetch.
    #[serde(default)]
    pub id: String,

    /// Geographic location, when the feed provides one.
    #[serde(default)]
    pub geometry: Option<Geometry>,

    /// Event properties.
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    /// Magnitude for filtering and statistics. Missing magnitudes count
    /// as 0 so the event still passes a zero minimum-magnitude filter.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.properties.mag.unwrap_or(0.0)
    }

    /// Human-readable place description.
    #[must_use]
    pub fn place_or_unknown(&self) -> &str {
        self.properties.place.as_deref().unwrap_or("Unknown location")
    }

    /// `(longitude, latitude)` when the geometry carries at least two
    /// finite coordinates.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        let coords = &self.geometry.as_ref()?.coordinates;
        let lon = *coords.first()?;
        let lat = *coords.get(1)?;
        if lon.is_finite() && lat.is_finite() {
            Some((lon, lat))
        } else {
            None
        }
    }

    /// Depth in kilometers, when present and finite.
    #[must_use]
    pub fn depth_km(&self) -> Option<f64> {
        let depth = *self.geometry.as_ref()?.coordinates.get(2)?;
        depth.is_finite().then_some(depth)
    }
}

/// Geographic geometry for an event.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Geometry {
    /// Coordinates: `[longitude, latitude, depth_km]`.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// Event properties from the USGS feed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Properties {
    /// Magnitude value.
    #[serde(default)]
    pub mag: Option<f64>,

    /// Human-readable place description.
    #[serde(default)]
    pub place: Option<String>,

    /// Event time (ms since epoch).
    #[serde(default)]
    pub time: Option<i64>,

    /// Event detail page URL.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_feature() {
        let json = r#"{
            "features": [{
                "type": "Feature",
                "id": "us7000abcd",
                "geometry": { "type": "Point", "coordinates": [142.3, 38.1, 29.0] },
                "properties": {
                    "mag": 6.5,
                    "place": "off the east coast of Honshu, Japan",
                    "time": 1756391820000,
                    "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us7000abcd"
                }
            }]
        }"#;
        let feed: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(feed.features.len(), 1);

        let ev = &feed.features[0];
        assert_eq!(ev.id, "us7000abcd");
        assert!((ev.magnitude() - 6.5).abs() < 1e-9);
        assert_eq!(ev.place_or_unknown(), "off the east coast of Honshu, Japan");
        assert_eq!(ev.position(), Some((142.3, 38.1)));
        assert_eq!(ev.depth_km(), Some(29.0));
        assert_eq!(ev.properties.time, Some(1_756_391_820_000));
    }

    #[test]
    fn test_parse_minimal_feature() {
        // The feed may omit any optional field; the render must survive.
        let json = r#"{ "features": [{ "id": "ak0241" }] }"#;
        let feed: FeatureCollection = serde_json::from_str(json).unwrap();

        let ev = &feed.features[0];
        assert!((ev.magnitude() - 0.0).abs() < 1e-9);
        assert_eq!(ev.place_or_unknown(), "Unknown location");
        assert_eq!(ev.position(), None);
        assert_eq!(ev.depth_km(), None);
        assert_eq!(ev.properties.time, None);
        assert_eq!(ev.properties.url, None);
    }

    #[test]
    fn test_parse_null_magnitude() {
        let json = r#"{
            "features": [{
                "id": "nc100",
                "geometry": { "coordinates": [-122.4, 37.8] },
                "properties": { "mag": null, "place": "5 km SW of Oakland, CA" }
            }]
        }"#;
        let feed: FeatureCollection = serde_json::from_str(json).unwrap();

        let ev = &feed.features[0];
        assert_eq!(ev.properties.mag, None);
        assert!((ev.magnitude() - 0.0).abs() < 1e-9);
        assert_eq!(ev.position(), Some((-122.4, 37.8)));
        // No third coordinate means no depth, not depth zero.
        assert_eq!(ev.depth_km(), None);
    }

    #[test]
    fn test_position_requires_two_coordinates() {
        let ev = Feature {
            id: "x".into(),
            geometry: Some(Geometry {
                coordinates: vec![12.0],
            }),
            properties: Properties::default(),
        };
        assert_eq!(ev.position(), None);
    }

    #[test]
    fn test_empty_envelope() {
        let feed: FeatureCollection = serde_json::from_str(r#"{ "features": [] }"#).unwrap();
        assert!(feed.features.is_empty());
        let feed: FeatureCollection = serde_json::from_str("{}").unwrap();
        assert!(feed.features.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // Real feeds carry far more metadata than this model reads.
        let json = r#"{
            "type": "FeatureCollection",
            "metadata": { "generated": 1756391820000, "count": 1 },
            "features": [{
                "id": "us1",
                "properties": { "mag": 1.2, "tsunami": 0, "sig": 22 }
            }]
        }"#;
        let feed: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(feed.features[0].properties.mag, Some(1.2));
    }
}
