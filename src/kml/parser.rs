use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use tracing::{debug, warn};

use super::document::{KmlBoundary, KmlDocument, KmlPlacemark, KmlPolygon};
use super::error::{IngestIssue, ParseError};
use crate::domain::{Category, CategoryGroup, HazardCatalog, HazardRegion, Interval};
use crate::geometry::{Point, Ring};

/// Settings for turning raw KML values into domain values
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Offset every parsed instant is re-expressed in
    pub offset: FixedOffset,
}

impl ParseOptions {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }
}

/// A parsed catalog plus everything that went wrong on the way
#[derive(Debug)]
pub struct Ingest {
    pub catalog: HazardCatalog,
    pub issues: Vec<IngestIssue>,
}

/// Parse a KML `coordinates` body into a ring
///
/// Tuples are whitespace separated `lng,lat[,alt]`. Any malformed tuple
/// fails the whole ring. The ring is returned as written, closed or not.
pub fn parse_coordinates(text: &str) -> Result<Ring, ParseError> {
    let mut points = Vec::new();

    for tuple in text.split_whitespace() {
        let mut parts = tuple.split(',');
        let lng = parse_component(tuple, parts.next().unwrap_or_default())?;
        let lat = match parts.next() {
            Some(value) => parse_component(tuple, value)?,
            None => return Err(ParseError::MissingLatitude(tuple.to_string())),
        };
        points.push(Point::new(lat, lng));
    }

    Ok(Ring::new(points))
}

fn parse_component(tuple: &str, value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| ParseError::Coordinate {
            tuple: tuple.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Parse an RFC 3339 instant and re-express it in `offset`
pub fn parse_timestamp(value: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&offset))
        .map_err(|source| ParseError::Timestamp {
            value: value.to_string(),
            source,
        })
}

fn parse_validity(
    placemark: &KmlPlacemark,
    opts: &ParseOptions,
) -> Result<Interval, ParseError> {
    let span = placemark
        .time_span
        .as_ref()
        .ok_or(ParseError::MissingTimeSpan)?;
    let from = parse_timestamp(&span.begin, opts.offset)?;
    let until = parse_timestamp(&span.end, opts.offset)?;
    Ok(Interval::new(from, until))
}

fn boundary_coordinates(boundary: &KmlBoundary) -> &str {
    boundary
        .ring
        .as_ref()
        .map(|ring| ring.coordinates.as_str())
        .unwrap_or_default()
}

fn parse_polygon(polygon: &KmlPolygon) -> Result<(Ring, Vec<Ring>), ParseError> {
    let outer = polygon
        .outer
        .as_ref()
        .map(boundary_coordinates)
        .ok_or(ParseError::MissingOuterRing)?;
    let outer = parse_coordinates(outer)?;
    if outer.is_empty() {
        return Err(ParseError::MissingOuterRing);
    }

    let holes = polygon
        .inner
        .iter()
        .map(|boundary| parse_coordinates(boundary_coordinates(boundary)))
        .filter(|hole| !matches!(hole, Ok(ring) if ring.is_empty()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((outer, holes))
}

/// UTC offset in hours for the zone abbreviations outlooks are issued in
fn zone_abbreviation_offset(abbr: &str) -> Option<i32> {
    let hours = match abbr.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "Z" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        "AKST" => -9,
        "AKDT" => -8,
        "HST" => -10,
        _ => return None,
    };
    Some(hours)
}

/// Parse an outlook issue line
///
/// Two layouts are accepted:
/// `Issue Time 1251 PM CDT Wed May 01 2024<br />` and
/// `Issue Time 20240501 202405011751Z<br />`.
/// An unknown zone abbreviation is read in `fallback`.
pub fn parse_issue_time(line: &str, fallback: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let body = line.trim().strip_prefix("Issue Time")?;
    let body = body.trim().trim_end_matches("<br />").trim_end_matches("<br/>");
    let fields: Vec<&str> = body.split_whitespace().collect();

    match fields.as_slice() {
        [hhmm, meridiem, zone, weekday, month, day, year] => {
            let local = format!("{} {} {} {} {} {}", hhmm, meridiem, weekday, month, day, year);
            let naive = NaiveDateTime::parse_from_str(&local, "%I%M %p %a %b %d %Y").ok()?;
            let offset = match zone_abbreviation_offset(zone) {
                Some(hours) => FixedOffset::east_opt(hours * 3600)?,
                None => {
                    debug!("Unknown zone abbreviation {:?}, using {}", zone, fallback);
                    fallback
                }
            };
            offset.from_local_datetime(&naive).single()
        }
        [_date, stamp] => {
            let naive = NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%MZ").ok()?;
            Some(Utc.from_utc_datetime(&naive).fixed_offset())
        }
        _ => None,
    }
}

/// Find and parse the issue line of a document description
pub fn document_issued(description: &str, opts: &ParseOptions) -> Option<DateTime<FixedOffset>> {
    let line = description
        .lines()
        .find(|line| line.trim_start().starts_with("Issue Time"))?;

    let issued = parse_issue_time(line, opts.offset);
    if issued.is_none() {
        warn!("Could not parse issue time from {:?}", line.trim());
    }
    issued.map(|t| t.with_timezone(&opts.offset))
}

/// Turn a deserialized document into a catalog
///
/// Polygons whose rings fail to parse, or that have no outer ring, are
/// dropped; placemarks whose time span fails are kept without a validity
/// window. Both are reported as issues rather than aborting.
pub fn build_catalog(document: KmlDocument, opts: &ParseOptions) -> Ingest {
    let mut issues = Vec::new();
    let mut groups = Vec::with_capacity(document.folders.len());

    for folder in document.folders {
        let category = Category::from_layer_name(&folder.name);
        let mut regions = Vec::new();

        for placemark in &folder.placemarks {
            let validity = match parse_validity(placemark, opts) {
                Ok(interval) => Some(interval),
                Err(error) => {
                    issues.push(IngestIssue {
                        layer: folder.name.clone(),
                        placemark: placemark.name.clone(),
                        dropped: false,
                        error,
                    });
                    None
                }
            };

            let polygons = placemark.polygons();
            if polygons.is_empty() {
                issues.push(IngestIssue {
                    layer: folder.name.clone(),
                    placemark: placemark.name.clone(),
                    dropped: true,
                    error: ParseError::MissingPolygon,
                });
                continue;
            }

            for polygon in polygons {
                match parse_polygon(polygon) {
                    Ok((outer, holes)) => {
                        if !outer.is_closed() || holes.iter().any(|h| !h.is_closed()) {
                            warn!(
                                "{} / {:?}: ring is not closed, containment is undefined",
                                folder.name, placemark.name
                            );
                        }
                        regions.push(HazardRegion::new(
                            outer,
                            holes,
                            validity,
                            placemark.name.clone(),
                            category,
                        ));
                    }
                    Err(error) => issues.push(IngestIssue {
                        layer: folder.name.clone(),
                        placemark: placemark.name.clone(),
                        dropped: true,
                        error,
                    }),
                }
            }
        }

        debug!(
            "Layer {} ({:?}): {} regions",
            folder.name,
            category,
            regions.len()
        );
        groups.push(CategoryGroup::new(folder.name, category, regions));
    }

    for issue in &issues {
        warn!("{}", issue);
    }

    let issued = document_issued(&document.description, opts);
    let catalog = HazardCatalog::new(groups)
        .with_issued(issued)
        .with_name(document.name);

    Ingest { catalog, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn central() -> FixedOffset {
        FixedOffset::west_opt(6 * 3600).unwrap()
    }

    #[test]
    fn test_parse_coordinates() {
        let ring = parse_coordinates("-97.5,35.0,0 -97.0,35.0 -97.0,35.5\n\t-97.5,35.0").unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.points()[0], Point::new(35.0, -97.5));
        assert_eq!(ring.points()[2], Point::new(35.5, -97.0));
        assert!(ring.is_closed());
    }

    #[test]
    fn test_parse_coordinates_does_not_close_ring() {
        let ring = parse_coordinates("0,0 1,0 1,1").unwrap();
        assert_eq!(ring.len(), 3);
        assert!(!ring.is_closed());
    }

    #[test]
    fn test_parse_coordinates_rejects_bad_tuple() {
        let err = parse_coordinates("0,0 1,abc 1,1 0,0").unwrap_err();
        assert!(matches!(err, ParseError::Coordinate { ref value, .. } if value == "abc"));

        let err = parse_coordinates("0,0 1 1,1").unwrap_err();
        assert!(matches!(err, ParseError::MissingLatitude(ref t) if t == "1"));

        assert!(parse_coordinates("0,0 ,1").is_err());
    }

    #[test]
    fn test_parse_coordinates_empty() {
        assert!(parse_coordinates("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_timestamp_uses_offset() {
        let t = parse_timestamp("2024-05-01T13:00:00Z", central()).unwrap();
        assert_eq!(t.offset(), &central());
        assert_eq!(t.format("%H:%M").to_string(), "07:00");

        assert!(matches!(
            parse_timestamp("yesterday", central()),
            Err(ParseError::Timestamp { .. })
        ));
    }

    #[test]
    fn test_parse_issue_time_local_layout() {
        let t = parse_issue_time("Issue Time 1251 PM CDT Wed May 01 2024<br />", central()).unwrap();
        let utc = t.with_timezone(&Utc);
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 17:51");
    }

    #[test]
    fn test_parse_issue_time_unknown_zone_uses_fallback() {
        let t = parse_issue_time("Issue Time 0300 AM XYZ Thu May 02 2024", central()).unwrap();
        let utc = t.with_timezone(&Utc);
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-05-02 09:00");
    }

    #[test]
    fn test_parse_issue_time_utc_layout() {
        let t = parse_issue_time("Issue Time 20240501 202405011751Z<br />", central()).unwrap();
        let utc = t.with_timezone(&Utc);
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 17:51");
    }

    #[test]
    fn test_parse_issue_time_garbage() {
        assert!(parse_issue_time("Issue Time sometime soon", central()).is_none());
        assert!(parse_issue_time("Valid 1300Z", central()).is_none());
    }

    #[test]
    fn test_document_issued_scans_lines() {
        let description = "SPC Day 1 Outlook\nValid 1300Z\nIssue Time 20240501 202405011251Z<br />\n";
        let issued = document_issued(description, &ParseOptions::new(central())).unwrap();
        assert_eq!(issued.offset(), &central());
        assert_eq!(issued.format("%H:%M").to_string(), "06:51");

        assert!(document_issued("nothing here", &ParseOptions::default()).is_none());
    }
}
