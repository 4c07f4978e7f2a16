use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Validity window of a hazard region, inclusive at both ends
///
/// Equality compares instants, so the same window expressed in different
/// offsets is still the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub valid_from: DateTime<FixedOffset>,
    pub valid_until: DateTime<FixedOffset>,
}

impl Interval {
    pub fn new(valid_from: DateTime<FixedOffset>, valid_until: DateTime<FixedOffset>) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }

    /// Re-express both ends in `offset`
    pub fn with_offset(&self, offset: FixedOffset) -> Self {
        Self::new(
            self.valid_from.with_timezone(&offset),
            self.valid_until.with_timezone(&offset),
        )
    }
}
