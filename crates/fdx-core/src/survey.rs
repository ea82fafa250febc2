//! Property boundary measurements.
//!
//! Points are longitude/latitude pairs (`x`, `y`) in degrees. The perimeter is
//! a great-circle length in metres; the area is the planar Shoelace area of
//! the raw coordinates, in square degrees.

use geo::{Area, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Earth radius used for Haversine distances, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A boundary vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees.
    pub x: f64,
    /// Latitude in degrees.
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Perimeter and area of one or more boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Closed-ring perimeter in metres.
    pub perimeter_m: f64,
    /// Shoelace area of the raw coordinates.
    pub area: f64,
}

/// Great-circle distance between two points in metres.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.y.to_radians();
    let phi2 = b.y.to_radians();
    let d_phi = (b.y - a.y).to_radians();
    let d_lambda = (b.x - a.x).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Measure a single closed boundary. Fewer than three points measure zero.
pub fn boundary_measurements(points: &[Coordinate]) -> Measurement {
    if points.len() < 3 {
        return Measurement::default();
    }

    let perimeter_m = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| haversine_distance(*a, *b))
        .sum();

    let ring: LineString<f64> = points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into();
    let area = Polygon::new(ring, vec![]).unsigned_area();

    Measurement { perimeter_m, area }
}

/// Sum of the measurements of every boundary.
pub fn total_measurements<B: AsRef<[Coordinate]>>(boundaries: &[B]) -> Measurement {
    boundaries
        .iter()
        .map(|b| boundary_measurements(b.as_ref()))
        .fold(Measurement::default(), |acc, m| Measurement {
            perimeter_m: acc.perimeter_m + m.perimeter_m,
            area: acc.area + m.area,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(size, 0.0),
            Coordinate::new(size, size),
            Coordinate::new(0.0, size),
        ]
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_zero_distance() {
        let p = Coordinate::new(153.02, -27.47);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_square_area_and_perimeter() {
        let m = boundary_measurements(&square(0.001));
        assert!((m.area - 1e-6).abs() < 1e-12);

        // Four sides of roughly 111.19 m each near the equator.
        assert!((m.perimeter_m - 444.78).abs() < 0.1);
    }

    #[test]
    fn test_area_ignores_winding() {
        let mut points = square(2.0);
        points.reverse();
        assert!((boundary_measurements(&points).area - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_boundary() {
        let two = [Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)];
        assert_eq!(boundary_measurements(&two), Measurement::default());
        assert_eq!(boundary_measurements(&[]), Measurement::default());
    }

    #[test]
    fn test_total_over_boundaries() {
        let boundaries = vec![square(1.0), square(2.0), vec![Coordinate::new(5.0, 5.0)]];
        let total = total_measurements(&boundaries);
        assert!((total.area - 5.0).abs() < 1e-9);
        assert!(total.perimeter_m > 0.0);
    }

    #[test]
    fn test_coordinate_conversions() {
        assert_eq!(Coordinate::from((1.5, -2.0)), Coordinate::new(1.5, -2.0));
        assert_eq!(Coordinate::from([3.0, 4.0]), Coordinate::new(3.0, 4.0));
    }
}
