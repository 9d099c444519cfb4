//! World map projection and viewport math.
//!
//! The map renders an equirectangular world image at `width: 100%` of its
//! container with a CSS `translate(pan) scale(zoom)` transform on top.
//! Marker positions live in native image pixel space (2048x1024); all
//! functions here are pure so the viewport behavior is unit-testable.

/// Native world image dimensions in pixels (2:1 equirectangular).
pub const WORLD_WIDTH_PX: f64 = 2048.0;
pub const WORLD_HEIGHT_PX: f64 = 1024.0;

pub const ZOOM_MIN: f64 = 1.0;
pub const ZOOM_MAX: f64 = 12.0;

/// Screen-pixel margin kept around the fitted point set.
pub const FIT_PADDING_PX: f64 = 40.0;

/// Zoom applied when fitting a single point (or a degenerate cluster).
pub const FIT_SINGLE_ZOOM: f64 = 4.0;

/// Fixed zoom applied when flying to a selected event.
pub const SELECTION_ZOOM: f64 = 8.0;

/// Project geographic coordinates into world image pixels.
///
/// Longitude is clamped to [-180, 180] and latitude to [-90, 90] so that
/// slightly out-of-range feed values still land on the map edge.
#[must_use]
pub fn project(lon: f64, lat: f64) -> (f64, f64) {
    let lon = lon.clamp(-180.0, 180.0);
    let lat = lat.clamp(-90.0, 90.0);
    let x = (lon + 180.0) / 360.0 * WORLD_WIDTH_PX;
    let y = (90.0 - lat) / 180.0 * WORLD_HEIGHT_PX;
    (x, y)
}

/// Magnitude color band for markers and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeBand {
    /// magnitude < 4
    Low,
    /// 4 <= magnitude < 6
    Moderate,
    /// magnitude >= 6
    High,
}

impl MagnitudeBand {
    pub const ALL: [MagnitudeBand; 3] = [
        MagnitudeBand::Low,
        MagnitudeBand::Moderate,
        MagnitudeBand::High,
    ];

    #[must_use]
    pub fn from_magnitude(mag: f64) -> Self {
        if mag >= 6.0 {
            MagnitudeBand::High
        } else if mag >= 4.0 {
            MagnitudeBand::Moderate
        } else {
            MagnitudeBand::Low
        }
    }

    /// Marker fill color.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            MagnitudeBand::Low => "green",
            MagnitudeBand::Moderate => "gold",
            MagnitudeBand::High => "red",
        }
    }

    /// Legend row text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MagnitudeBand::Low => "< 4.0",
            MagnitudeBand::Moderate => "4.0 – 5.9",
            MagnitudeBand::High => "≥ 6.0",
        }
    }
}

/// Zoom/pan state of a mounted map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: ZOOM_MIN,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Compute new pan offsets so that `cursor` stays over the same content
/// point when zooming from `old_zoom` to `new_zoom`.
#[must_use]
pub fn zoom_pan_at_cursor(
    cursor_x: f64,
    cursor_y: f64,
    old_zoom: f64,
    new_zoom: f64,
    old_pan_x: f64,
    old_pan_y: f64,
) -> (f64, f64) {
    let content_x = (cursor_x - old_pan_x) / old_zoom;
    let content_y = (cursor_y - old_pan_y) / old_zoom;
    (
        cursor_x - content_x * new_zoom,
        cursor_y - content_y * new_zoom,
    )
}

/// Clamp pan values so the map can't be dragged off-screen.
///
/// The world image is rendered at `width: 100%` of the container, so its
/// rendered height is `container_w * (WORLD_HEIGHT_PX / WORLD_WIDTH_PX)`,
/// which may be smaller or larger than the container height.
#[must_use]
pub fn clamp_pan(
    pan_x: f64,
    pan_y: f64,
    zoom: f64,
    container_w: f64,
    container_h: f64,
) -> (f64, f64) {
    let content_w = container_w * zoom;
    let content_h = container_w * (WORLD_HEIGHT_PX / WORLD_WIDTH_PX) * zoom;
    let min_pan_x = -(content_w - container_w).max(0.0);
    let min_pan_y = -(content_h - container_h).max(0.0);
    (pan_x.clamp(min_pan_x, 0.0), pan_y.clamp(min_pan_y, 0.0))
}

/// Where an image-space point lands in container (screen) coordinates.
#[must_use]
pub fn screen_position(viewport: &Viewport, point: (f64, f64), container_w: f64) -> (f64, f64) {
    let k = container_w / WORLD_WIDTH_PX;
    (
        point.0 * k * viewport.zoom + viewport.pan_x,
        point.1 * k * viewport.zoom + viewport.pan_y,
    )
}

/// Viewport centered on `point` at `zoom`, clamped to the world edges.
#[must_use]
pub fn center_on(point: (f64, f64), zoom: f64, container_w: f64, container_h: f64) -> Viewport {
    let k = container_w / WORLD_WIDTH_PX;
    let pan_x = container_w / 2.0 - point.0 * k * zoom;
    let pan_y = container_h / 2.0 - point.1 * k * zoom;
    let (pan_x, pan_y) = clamp_pan(pan_x, pan_y, zoom, container_w, container_h);
    Viewport { zoom, pan_x, pan_y }
}

/// Viewport containing every point with a fixed padding margin.
///
/// Returns `None` for an empty point set (the viewport is left as-is);
/// a single point, or a degenerate cluster, centers at a fixed zoom.
#[must_use]
pub fn fit_points(points: &[(f64, f64)], container_w: f64, container_h: f64) -> Option<Viewport> {
    if points.is_empty() || container_w <= 0.0 || container_h <= 0.0 {
        return None;
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    let center = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    if span_x <= f64::EPSILON && span_y <= f64::EPSILON {
        return Some(center_on(center, FIT_SINGLE_ZOOM, container_w, container_h));
    }

    let k = container_w / WORLD_WIDTH_PX;
    let avail_w = (container_w - 2.0 * FIT_PADDING_PX).max(1.0);
    let avail_h = (container_h - 2.0 * FIT_PADDING_PX).max(1.0);
    let zoom_x = if span_x > 0.0 {
        avail_w / (span_x * k)
    } else {
        f64::INFINITY
    };
    let zoom_y = if span_y > 0.0 {
        avail_h / (span_y * k)
    } else {
        f64::INFINITY
    };
    let zoom = zoom_x.min(zoom_y).clamp(ZOOM_MIN, ZOOM_MAX);

    Some(center_on(center, zoom, container_w, container_h))
}

/// Viewport for the fly-to-selection animation: the selected event's
/// position centered at the fixed selection zoom.
#[must_use]
pub fn fly_to(point: (f64, f64), container_w: f64, container_h: f64) -> Viewport {
    center_on(point, SELECTION_ZOOM, container_w, container_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- projection ---

    #[test]
    fn test_project_origin_is_image_center() {
        let (x, y) = project(0.0, 0.0);
        assert!((x - WORLD_WIDTH_PX / 2.0).abs() < 1e-9);
        assert!((y - WORLD_HEIGHT_PX / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_corners() {
        assert_eq!(project(-180.0, 90.0), (0.0, 0.0));
        assert_eq!(project(180.0, -90.0), (WORLD_WIDTH_PX, WORLD_HEIGHT_PX));
    }

    #[test]
    fn test_project_clamps_out_of_range() {
        let (x, y) = project(200.0, -95.0);
        assert!((x - WORLD_WIDTH_PX).abs() < 1e-9);
        assert!((y - WORLD_HEIGHT_PX).abs() < 1e-9);
    }

    // --- magnitude bands ---

    #[test]
    fn test_band_boundaries() {
        assert_eq!(MagnitudeBand::from_magnitude(0.0), MagnitudeBand::Low);
        assert_eq!(MagnitudeBand::from_magnitude(3.999), MagnitudeBand::Low);
        assert_eq!(MagnitudeBand::from_magnitude(4.0), MagnitudeBand::Moderate);
        assert_eq!(MagnitudeBand::from_magnitude(5.999), MagnitudeBand::Moderate);
        assert_eq!(MagnitudeBand::from_magnitude(6.0), MagnitudeBand::High);
        assert_eq!(MagnitudeBand::from_magnitude(9.5), MagnitudeBand::High);
    }

    #[test]
    fn test_band_colors_are_distinct() {
        let colors: Vec<&str> = MagnitudeBand::ALL.iter().map(|b| b.color()).collect();
        assert_eq!(colors, vec!["green", "gold", "red"]);
    }

    // --- zoom/pan ---

    #[test]
    fn test_zoom_pan_at_cursor_keeps_point_fixed() {
        let (cursor_x, cursor_y) = (300.0, 200.0);
        let (old_zoom, new_zoom) = (2.0, 3.0);
        let (old_pan_x, old_pan_y) = (-150.0, -80.0);

        let content_x = (cursor_x - old_pan_x) / old_zoom;
        let content_y = (cursor_y - old_pan_y) / old_zoom;

        let (new_pan_x, new_pan_y) =
            zoom_pan_at_cursor(cursor_x, cursor_y, old_zoom, new_zoom, old_pan_x, old_pan_y);

        assert!((content_x * new_zoom + new_pan_x - cursor_x).abs() < 1e-9);
        assert!((content_y * new_zoom + new_pan_y - cursor_y).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_pan_world_smaller_than_container() {
        // Tall container: at zoom 1 the rendered map (half the width) fits,
        // so no vertical panning is allowed.
        let (px, py) = clamp_pan(-50.0, -50.0, 1.0, 800.0, 600.0);
        assert!((px - 0.0).abs() < 1e-9);
        assert!((py - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_pan_allows_panning_when_zoomed() {
        let (px, py) = clamp_pan(-300.0, -100.0, 2.0, 800.0, 600.0);
        // content 1600x800: min_pan_x = -800, min_pan_y = -200
        assert!((px - (-300.0)).abs() < 1e-9);
        assert!((py - (-100.0)).abs() < 1e-9);

        let (px, py) = clamp_pan(-2000.0, -500.0, 2.0, 800.0, 600.0);
        assert!((px - (-800.0)).abs() < 1e-9);
        assert!((py - (-200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_pan_prevents_positive_pan() {
        let (px, py) = clamp_pan(50.0, 50.0, 2.0, 800.0, 600.0);
        assert!((px - 0.0).abs() < 1e-9);
        assert!((py - 0.0).abs() < 1e-9);
    }

    // --- fit / fly ---

    #[test]
    fn test_fit_points_empty_is_none() {
        assert!(fit_points(&[], 1000.0, 600.0).is_none());
    }

    #[test]
    fn test_fit_points_single_point_centers() {
        let pt = (1024.0, 512.0);
        let vp = fit_points(&[pt], 1000.0, 600.0).unwrap();
        assert!((vp.zoom - FIT_SINGLE_ZOOM).abs() < 1e-9);
        let (sx, sy) = screen_position(&vp, pt, 1000.0);
        assert!((sx - 500.0).abs() < 0.01);
        assert!((sy - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_fit_points_identical_points_treated_as_single() {
        let pts = [(700.0, 400.0), (700.0, 400.0)];
        let vp = fit_points(&pts, 1000.0, 600.0).unwrap();
        assert!((vp.zoom - FIT_SINGLE_ZOOM).abs() < 1e-9);
    }

    #[test]
    fn test_fit_points_keeps_all_points_inside_padding() {
        let (cw, ch) = (1000.0, 600.0);
        let pts = [(400.0, 300.0), (600.0, 500.0)];
        let vp = fit_points(&pts, cw, ch).unwrap();

        for pt in pts {
            let (sx, sy) = screen_position(&vp, pt, cw);
            assert!(sx >= FIT_PADDING_PX - 0.5 && sx <= cw - FIT_PADDING_PX + 0.5);
            assert!(sy >= FIT_PADDING_PX - 0.5 && sy <= ch - FIT_PADDING_PX + 0.5);
        }
    }

    #[test]
    fn test_fit_points_world_spanning_set_clamps_to_min_zoom() {
        let pts = [(10.0, 10.0), (2040.0, 1010.0)];
        let vp = fit_points(&pts, 1000.0, 600.0).unwrap();
        assert!((vp.zoom - ZOOM_MIN).abs() < 1e-9);
        assert!((vp.pan_x - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_points_horizontal_line() {
        // Zero vertical span must not blow up the zoom computation.
        let pts = [(200.0, 512.0), (1800.0, 512.0)];
        let vp = fit_points(&pts, 1000.0, 600.0).unwrap();
        assert!(vp.zoom >= ZOOM_MIN && vp.zoom <= ZOOM_MAX);
    }

    #[test]
    fn test_fly_to_centers_at_selection_zoom() {
        let pt = (1024.0, 512.0);
        let vp = fly_to(pt, 1000.0, 600.0);
        assert!((vp.zoom - SELECTION_ZOOM).abs() < 1e-9);
        let (sx, sy) = screen_position(&vp, pt, 1000.0);
        assert!((sx - 500.0).abs() < 0.01);
        assert!((sy - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_fly_to_near_edge_is_clamped() {
        // A point at the top-left corner cannot be centered without showing
        // space beyond the world; the clamp wins.
        let vp = fly_to((0.0, 0.0), 1000.0, 600.0);
        assert!((vp.pan_x - 0.0).abs() < 1e-9);
        assert!((vp.pan_y - 0.0).abs() < 1e-9);
    }
}
