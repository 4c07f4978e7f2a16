//! Winding-number point-in-ring test
//!
//! Latitude is the vertical axis and longitude the horizontal one. Edge
//! crossings are half-open (`<=` going up, `>=` going down) so a vertex
//! sitting exactly on the query latitude is counted once.

use super::{Point, Ring};

/// Signed area test for `p2` against the directed edge `p0 -> p1`
///
/// Positive when `p2` is strictly left of the edge, negative when strictly
/// right, zero when collinear.
pub fn is_left(p0: Point, p1: Point, p2: Point) -> f64 {
    (p1.lng - p0.lng) * (p2.lat - p0.lat) - (p2.lng - p0.lng) * (p1.lat - p0.lat)
}

/// Winding number of `ring` around `point`
///
/// The ring must already be closed. Rings with fewer than two points have
/// no edges and yield 0.
pub fn winding_number(point: Point, ring: &Ring) -> i32 {
    let mut wn = 0;

    for edge in ring.points().windows(2) {
        let (a, b) = (edge[0], edge[1]);

        if a.lat <= point.lat {
            if b.lat > point.lat && is_left(a, b, point) > 0.0 {
                wn += 1;
            }
        } else if b.lat <= point.lat && is_left(a, b, point) < 0.0 {
            wn -= 1;
        }
    }

    wn
}

/// Whether `point` lies inside `ring`
///
/// Points exactly on an edge may land on either side.
pub fn contains(point: Point, ring: &Ring) -> bool {
    winding_number(point, ring) != 0
}
