use std::collections::HashSet;

use super::{Coordinate, Polygon, Ring};

/// Separator between rings in a provider shape string
pub const RING_SEPARATOR: char = '@';
/// Separator between points within a ring
pub const POINT_SEPARATOR: char = ';';
/// Separator between longitude and latitude
pub const AXIS_SEPARATOR: char = ',';

/// Minimum number of distinct vertices a ring needs to enclose an area
pub const MIN_DISTINCT_POINTS: usize = 3;

fn parse_pair(pair: &str) -> Option<Coordinate> {
    let mut axes = pair.split(AXIS_SEPARATOR);
    let lon = axes.next()?.trim().parse::<f64>().ok()?;
    let lat = axes.next()?.trim().parse::<f64>().ok()?;
    if axes.next().is_some() || !lon.is_finite() || !lat.is_finite() {
        return None;
    }
    Some((lon, lat))
}

/// Parse a `lon,lat;lon,lat@lon,lat;...` shape string into normalized rings.
///
/// Malformed pairs are dropped silently; rings that end up degenerate are
/// discarded by [`normalize_ring`].
pub fn parse_shape_rings(shape: &str) -> Polygon {
    let raw: Polygon = shape
        .split(RING_SEPARATOR)
        .map(|raw_ring| {
            raw_ring
                .split(POINT_SEPARATOR)
                .map(str::trim)
                .filter(|pair| !pair.is_empty())
                .filter_map(parse_pair)
                .collect::<Ring>()
        })
        .collect();
    let parsed = raw.len();
    let polygon = normalize_polygon(raw);
    if polygon.len() < parsed {
        log::debug!(
            "Discarded {} degenerate ring(s) while parsing shape string",
            parsed - polygon.len()
        );
    }
    polygon
}

/// Deduplicate consecutive points and close the ring.
///
/// Returns `None` when fewer than three distinct points remain.
pub fn normalize_ring(mut ring: Ring) -> Option<Ring> {
    // Fold -0.0 into 0.0 so equality and the distinct count agree
    for (x, y) in ring.iter_mut() {
        *x += 0.0;
        *y += 0.0;
    }
    ring.dedup();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    let distinct: HashSet<(u64, u64)> = ring
        .iter()
        .map(|(x, y)| (x.to_bits(), y.to_bits()))
        .collect();
    if distinct.len() < MIN_DISTINCT_POINTS {
        return None;
    }

    let first = ring[0];
    ring.push(first);
    Some(ring)
}

/// Normalize every ring, dropping degenerate ones
pub fn normalize_polygon(polygon: Polygon) -> Polygon {
    polygon.into_iter().filter_map(normalize_ring).collect()
}
