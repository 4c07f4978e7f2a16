//! Catalog traversal and report rendering
//!
//! The reporter walks every region in catalog order, announcing a validity
//! window whenever it differs from the one announced just before. Dedup is
//! consecutive only: a window that comes back after a different one is
//! announced again.

pub mod render;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Category, HazardCatalog, Interval};
use crate::geometry::Point;

pub use render::{TIME_FORMAT, render_json, render_text};

/// A single line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportLine {
    /// Start of a new validity window
    Interval(Interval),
    /// A region whose window failed to parse
    UnknownInterval,
    Match {
        category: Category,
        description: &'static str,
        label: String,
    },
    NoThreat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub point: Point,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn has_threat(&self) -> bool {
        self.matches().next().is_some()
    }

    /// Only the match lines, as (category, label)
    pub fn matches(&self) -> impl Iterator<Item = (Category, &str)> {
        self.lines.iter().filter_map(|line| match line {
            ReportLine::Match {
                category, label, ..
            } => Some((*category, label.as_str())),
            _ => None,
        })
    }

    pub fn interval_announcements(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, ReportLine::Interval(_) | ReportLine::UnknownInterval))
            .count()
    }
}

/// Test `point` against every region of `catalog` and build the report
pub fn report(point: Point, catalog: &HazardCatalog) -> Report {
    let mut lines = Vec::new();
    // None is the sentinel: it never equals a parsed window
    let mut last: Option<Interval> = None;
    let mut matched = false;

    for (group, region) in catalog.regions() {
        match region.validity {
            Some(interval) if last != Some(interval) => {
                lines.push(ReportLine::Interval(interval));
                last = Some(interval);
            }
            Some(_) => {}
            None => {
                lines.push(ReportLine::UnknownInterval);
                last = None;
            }
        }

        if region.matches(point) {
            debug!(
                "({}, {}) inside {} region {:?}",
                point.lat, point.lng, group.name, region.label
            );
            lines.push(ReportLine::Match {
                category: region.category,
                description: region.description(),
                label: region.label.clone(),
            });
            matched = true;
        }
    }

    if !matched {
        lines.push(ReportLine::NoThreat);
    }

    Report { point, lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryGroup, HazardRegion};
    use crate::geometry::Ring;
    use chrono::DateTime;

    fn square(min: f64, max: f64) -> Ring {
        Ring::from(vec![(min, min), (min, max), (max, max), (max, min), (min, min)])
    }

    fn window(from: &str, until: &str) -> Interval {
        Interval::new(
            DateTime::parse_from_rfc3339(from).unwrap(),
            DateTime::parse_from_rfc3339(until).unwrap(),
        )
    }

    fn a() -> Interval {
        window("2024-05-01T13:00:00Z", "2024-05-02T12:00:00Z")
    }

    fn b() -> Interval {
        window("2024-05-02T12:00:00Z", "2024-05-03T12:00:00Z")
    }

    fn region(label: &str, validity: Option<Interval>, outer: Ring) -> HazardRegion {
        HazardRegion::new(outer, vec![], validity, label, Category::Categorical)
    }

    fn single_group(regions: Vec<HazardRegion>) -> HazardCatalog {
        HazardCatalog::new(vec![CategoryGroup::new(
            "day1otlk_cat",
            Category::Categorical,
            regions,
        )])
    }

    #[test]
    fn test_consecutive_windows_announced_once() {
        let catalog = single_group(vec![
            region("TSTM", Some(a()), square(0.0, 10.0)),
            region("MRGL", Some(a()), square(0.0, 4.0)),
            region("SLGT", Some(b()), square(0.0, 2.0)),
        ]);

        let report = report(Point::new(1.0, 1.0), &catalog);
        assert_eq!(report.interval_announcements(), 2);
        assert_eq!(
            report.lines[0],
            ReportLine::Interval(a()),
            "first line announces the first window"
        );
        assert_eq!(report.lines[3], ReportLine::Interval(b()));
        assert_eq!(report.matches().count(), 3);
    }

    #[test]
    fn test_interrupted_window_is_announced_again() {
        let catalog = single_group(vec![
            region("TSTM", Some(a()), square(0.0, 10.0)),
            region("MRGL", Some(b()), square(0.0, 4.0)),
            region("SLGT", Some(a()), square(0.0, 2.0)),
        ]);

        let report = report(Point::new(50.0, 50.0), &catalog);
        assert_eq!(
            report.lines,
            vec![
                ReportLine::Interval(a()),
                ReportLine::Interval(b()),
                ReportLine::Interval(a()),
                ReportLine::NoThreat,
            ]
        );
    }

    #[test]
    fn test_dedup_spans_groups() {
        let catalog = HazardCatalog::new(vec![
            CategoryGroup::new(
                "otlk_cat",
                Category::Categorical,
                vec![region("MRGL", Some(a()), square(0.0, 4.0))],
            ),
            CategoryGroup::new(
                "otlk_torn",
                Category::Tornado,
                vec![HazardRegion::new(
                    square(0.0, 4.0),
                    vec![],
                    Some(a()),
                    "2 %",
                    Category::Tornado,
                )],
            ),
        ]);

        let report = report(Point::new(2.0, 2.0), &catalog);
        assert_eq!(report.interval_announcements(), 1);
        let matched: Vec<_> = report.matches().collect();
        assert_eq!(
            matched,
            vec![(Category::Categorical, "MRGL"), (Category::Tornado, "2 %")]
        );
    }

    #[test]
    fn test_no_match_fallback() {
        let catalog = single_group(vec![
            region("MRGL", Some(a()), square(0.0, 4.0)),
            region("SLGT", Some(a()), square(0.0, 2.0)),
        ]);

        let report = report(Point::new(5.0, 5.0), &catalog);
        assert!(!report.has_threat());
        assert_eq!(report.matches().count(), 0);
        assert_eq!(
            report.lines.iter().filter(|l| **l == ReportLine::NoThreat).count(),
            1
        );
        assert_eq!(report.lines.last(), Some(&ReportLine::NoThreat));
    }

    #[test]
    fn test_empty_catalog() {
        let report = report(Point::new(0.0, 0.0), &HazardCatalog::default());
        assert_eq!(report.lines, vec![ReportLine::NoThreat]);
    }

    #[test]
    fn test_no_threat_absent_when_matched() {
        let catalog = single_group(vec![region("MRGL", Some(a()), square(0.0, 4.0))]);
        let report = report(Point::new(2.0, 2.0), &catalog);
        assert!(report.has_threat());
        assert!(!report.lines.contains(&ReportLine::NoThreat));
    }

    #[test]
    fn test_hole_excludes_match() {
        let catalog = HazardCatalog::new(vec![CategoryGroup::new(
            "otlk_hail",
            Category::Hail,
            vec![HazardRegion::new(
                square(0.0, 4.0),
                vec![square(1.0, 3.0)],
                Some(a()),
                "15 %",
                Category::Hail,
            )],
        )]);

        assert!(!report(Point::new(2.0, 2.0), &catalog).has_threat());
        assert!(report(Point::new(0.5, 0.5), &catalog).has_threat());
    }

    #[test]
    fn test_unknown_window_does_not_corrupt_dedup() {
        let catalog = single_group(vec![
            region("TSTM", Some(a()), square(0.0, 10.0)),
            region("MRGL", None, square(0.0, 4.0)),
            region("SLGT", Some(a()), square(0.0, 2.0)),
        ]);

        let report = report(Point::new(1.0, 1.0), &catalog);
        assert_eq!(
            report.lines,
            vec![
                ReportLine::Interval(a()),
                ReportLine::Match {
                    category: Category::Categorical,
                    description: Category::Categorical.description(),
                    label: "TSTM".to_string(),
                },
                ReportLine::UnknownInterval,
                ReportLine::Match {
                    category: Category::Categorical,
                    description: Category::Categorical.description(),
                    label: "MRGL".to_string(),
                },
                ReportLine::Interval(a()),
                ReportLine::Match {
                    category: Category::Categorical,
                    description: Category::Categorical.description(),
                    label: "SLGT".to_string(),
                },
            ]
        );
    }
}
