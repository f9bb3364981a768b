use geo::{BoundingRect, LineString, Rect};
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Smallest span used when fitting a degenerate extent into a view
const MIN_SPAN: f64 = 1e-6;

/// Axis-aligned extent of a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

impl Bounds {
    /// Compute bounds of the points, `None` when there are none
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let line: LineString<f64> = points.into_iter().copied().collect();
        line.bounding_rect().map(Bounds::from)
    }

    /// Smallest bounds containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        let corners = [
            (self.min_x, self.min_y),
            (self.max_x, self.max_y),
            (other.min_x, other.min_y),
            (other.max_x, other.max_y),
        ];
        Bounds::from_points(&corners).unwrap_or(*self)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coordinate {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

/// Map coordinates into a `width` x `height` viewport with uniform scale.
///
/// The y axis is flipped so north points up in screen space. Returns an empty
/// vector when there are no points.
pub fn fit_to_view(points: &[Coordinate], width: f64, height: f64, padding: f64) -> Vec<Coordinate> {
    let Some(bounds) = Bounds::from_points(points) else {
        return Vec::new();
    };
    let span_x = bounds.width().max(MIN_SPAN);
    let span_y = bounds.height().max(MIN_SPAN);
    let scale = ((width - 2.0 * padding) / span_x).min((height - 2.0 * padding) / span_y);

    points
        .iter()
        .map(|&(x, y)| {
            let nx = padding + (x - bounds.min_x) * scale;
            let ny = height - (padding + (y - bounds.min_y) * scale);
            (nx, ny)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds, Bounds { min_x: -2.0, min_y: -1.0, max_x: 4.0, max_y: 5.0 });
        assert_eq!(bounds.center(), (1.0, 2.0));
        assert!(Bounds::from_points(&Vec::<Coordinate>::new()).is_none());
    }

    #[test]
    fn test_union() {
        let a = Bounds { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 };
        let b = Bounds { min_x: -1.0, min_y: 0.5, max_x: 0.5, max_y: 3.0 };
        assert_eq!(a.union(&b), Bounds { min_x: -1.0, min_y: 0.0, max_x: 1.0, max_y: 3.0 });
    }

    #[test]
    fn test_fit_to_view_flips_y() {
        let points = vec![(0.0, 0.0), (10.0, 10.0)];
        let fitted = fit_to_view(&points, 120.0, 120.0, 10.0);
        assert_eq!(fitted[0], (10.0, 110.0));
        assert_eq!(fitted[1], (110.0, 10.0));
    }

    #[test]
    fn test_fit_to_view_empty() {
        assert!(fit_to_view(&[], 100.0, 100.0, 10.0).is_empty());
    }
}
