use geo::Rect;

use super::{Category, Interval};
use crate::geometry::{Point, Ring, contains};

/// One outlook polygon: an outer boundary with optional holes, tagged with
/// its validity window and hazard category
#[derive(Debug, Clone)]
pub struct HazardRegion {
    pub outer: Ring,
    pub holes: Vec<Ring>,
    /// `None` when the source timestamps could not be parsed
    pub validity: Option<Interval>,
    pub label: String,
    pub category: Category,
    bounds: Option<Rect<f64>>,
}

impl HazardRegion {
    pub fn new(
        outer: Ring,
        holes: Vec<Ring>,
        validity: Option<Interval>,
        label: impl Into<String>,
        category: Category,
    ) -> Self {
        let bounds = outer.bounds();
        Self {
            outer,
            holes,
            validity,
            label: label.into(),
            category,
            bounds,
        }
    }

    pub fn description(&self) -> &'static str {
        self.category.description()
    }

    /// True when the point is inside the outer ring and outside every hole
    ///
    /// Holes are checked in order and the first containing hole decides.
    pub fn matches(&self, point: Point) -> bool {
        if !self.may_contain(point) || !contains(point, &self.outer) {
            return false;
        }

        !self.holes.iter().any(|hole| contains(point, hole))
    }

    fn may_contain(&self, point: Point) -> bool {
        match self.bounds {
            Some(rect) => {
                point.lng >= rect.min().x
                    && point.lng <= rect.max().x
                    && point.lat >= rect.min().y
                    && point.lat <= rect.max().y
            }
            None => false,
        }
    }
}

/// Free-function form of [`HazardRegion::matches`]
pub fn matches(point: Point, region: &HazardRegion) -> bool {
    region.matches(point)
}
