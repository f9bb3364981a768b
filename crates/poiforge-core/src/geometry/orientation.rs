use geo::{Area, Coord, LineString};
// Trait providing `make_cw_winding` / `make_ccw_winding` on line strings
use geo::Winding as _;

use super::{Coordinate, Ring};

/// Ring winding order in the x/y plane (x east, y north)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

fn line_string(ring: &[Coordinate]) -> LineString<f64> {
    ring.iter().map(|&(x, y)| Coord { x, y }).collect()
}

/// Signed area of the ring; positive for counter-clockwise rings
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    geo::Polygon::new(line_string(ring), vec![]).signed_area()
}

/// Winding of a ring, `None` for zero-area rings
pub fn winding(ring: &[Coordinate]) -> Option<Winding> {
    let area = signed_area(ring);
    if area > 0.0 {
        Some(Winding::CounterClockwise)
    } else if area < 0.0 {
        Some(Winding::Clockwise)
    } else {
        None
    }
}

/// Return the ring reversed when needed so it winds as requested.
///
/// Closed rings stay closed; reversing keeps the first and last vertex.
pub fn oriented(ring: &[Coordinate], target: Winding) -> Ring {
    let mut line = line_string(ring);
    match target {
        Winding::Clockwise => line.make_cw_winding(),
        Winding::CounterClockwise => line.make_ccw_winding(),
    }
    line.0.into_iter().map(|c| (c.x, c.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccw_square() -> Ring {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
    }

    #[test]
    fn test_signed_area() {
        assert!((signed_area(&ccw_square()) - 1.0).abs() < 1e-12);
        let mut cw = ccw_square();
        cw.reverse();
        assert!((signed_area(&cw) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_oriented_reverses_only_when_needed() {
        let ccw = ccw_square();
        assert_eq!(oriented(&ccw, Winding::CounterClockwise), ccw);

        let cw = oriented(&ccw, Winding::Clockwise);
        assert_eq!(winding(&cw), Some(Winding::Clockwise));
        assert_eq!(cw.first(), cw.last());
        assert_eq!(cw[1], (0.0, 1.0));
    }

    #[test]
    fn test_flat_ring_has_no_winding() {
        assert_eq!(winding(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]), None);
    }
}
