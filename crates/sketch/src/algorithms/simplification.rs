use geo_types::{Coord, LineString};
use sketch_common::Point;
use crate::traits::ContourSimplifier;

/// Douglas-Peucker reduction of a closed contour using geo's implementation.
///
/// The tolerance is relative: `epsilon_ratio` times the closed perimeter of
/// the raw contour, so long nearly-straight strokes collapse to their end
/// vertices while real corners survive.
#[derive(Debug, Clone)]
pub struct DouglasPeuckerSimplifier {
    pub epsilon_ratio: f64,
}

impl Default for DouglasPeuckerSimplifier {
    fn default() -> Self {
        Self { epsilon_ratio: 0.02 }
    }
}

impl DouglasPeuckerSimplifier {
    /// Absolute tolerance for the given closed ring
    pub fn tolerance(&self, ring: &LineString<f64>) -> f64 {
        use geo::EuclideanLength;
        self.epsilon_ratio * ring.euclidean_length()
    }
}

impl ContourSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, contour: &[Point]) -> Vec<Point> {
        use geo::Simplify;

        let Some(&start) = contour.first() else {
            return Vec::new();
        };

        let mut coords: Vec<Coord<f64>> = contour
            .iter()
            .map(|p| Coord { x: f64::from(p.x), y: f64::from(p.y) })
            .collect();
        coords.push(Coord { x: f64::from(start.x), y: f64::from(start.y) });
        let ring = LineString::new(coords);

        let tolerance = self.tolerance(&ring);
        let simplified = ring.simplify(&tolerance);

        // geo keeps original vertices, so the casts are exact
        let mut points: Vec<Point> = simplified
            .coords()
            .map(|coord| Point::new(coord.x as i32, coord.y as i32))
            .collect();

        // drop the closing vertex added above
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.is_empty() {
            points.push(start);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_border(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
        let mut points = Vec::new();
        for x in x0..=x1 {
            points.push(Point::new(x, y0));
        }
        for y in (y0 + 1)..=y1 {
            points.push(Point::new(x1, y));
        }
        for x in (x0..x1).rev() {
            points.push(Point::new(x, y1));
        }
        for y in ((y0 + 1)..y1).rev() {
            points.push(Point::new(x0, y));
        }
        points
    }

    #[test]
    fn test_thin_stroke_collapses_to_endpoints() {
        let contour = rectangle_border(50, 49, 200, 51);
        let simplified = DouglasPeuckerSimplifier::default().simplify(&contour);
        assert_eq!(simplified, vec![Point::new(50, 49), Point::new(200, 51)]);
    }

    #[test]
    fn test_rectangle_keeps_corners() {
        let contour = rectangle_border(10, 10, 49, 29);
        let simplified = DouglasPeuckerSimplifier::default().simplify(&contour);
        assert_eq!(simplified.len(), 4);
        for corner in [Point::new(10, 10), Point::new(49, 10), Point::new(49, 29), Point::new(10, 29)] {
            assert!(simplified.contains(&corner), "missing corner {:?}", corner);
        }
    }

    #[test]
    fn test_single_point_contour() {
        let simplified = DouglasPeuckerSimplifier::default().simplify(&[Point::new(7, 8)]);
        assert_eq!(simplified, vec![Point::new(7, 8)]);
    }

    #[test]
    fn test_empty_contour() {
        assert!(DouglasPeuckerSimplifier::default().simplify(&[]).is_empty());
    }

    #[test]
    fn test_order_follows_traversal() {
        let contour = rectangle_border(10, 10, 49, 29);
        let simplified = DouglasPeuckerSimplifier::default().simplify(&contour);
        assert_eq!(simplified[0], Point::new(10, 10));
        let position = |p: &Point| contour.iter().position(|c| c == p).unwrap();
        let indices: Vec<usize> = simplified.iter().map(position).collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}
