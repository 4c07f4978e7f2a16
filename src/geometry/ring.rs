use geo::{BoundingRect, LineString, Rect};
use serde::Serialize;

/// A geographic point as (lat, lng) in degrees
///
/// No range checks are made; out-of-range values pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Shift both coordinates by the same offset
    pub fn translate(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// A closed boundary: an ordered list of points whose first and last
/// entries are expected to coincide.
///
/// The ring is never closed on the caller's behalf. Containment on an
/// unclosed ring is undefined; use [`Ring::is_closed`] to detect it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the ring has at least one edge and ends where it starts
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() >= 2 && first == last,
            _ => false,
        }
    }

    /// Bounding box with x = lng and y = lat
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let line: LineString<f64> = self
            .points
            .iter()
            .map(|p| geo::coord! { x: p.lng, y: p.lat })
            .collect();
        line.bounding_rect()
    }

    pub fn translate(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| p.translate(d_lat, d_lng))
                .collect(),
        )
    }
}

impl From<Vec<(f64, f64)>> for Ring {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}
