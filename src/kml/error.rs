use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one raw KML value into a validated point or instant
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid coordinate {value:?} in tuple {tuple:?}")]
    Coordinate {
        tuple: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("coordinate tuple {0:?} has no latitude")]
    MissingLatitude(String),

    #[error("invalid timestamp {value:?}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("placemark has no time span")]
    MissingTimeSpan,

    #[error("placemark has no polygon")]
    MissingPolygon,

    #[error("polygon has no outer boundary")]
    MissingOuterRing,
}

/// Failure to read a whole KML document
#[derive(Debug, Error)]
pub enum KmlError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed KML document")]
    Xml(#[from] quick_xml::DeError),
}

/// What went wrong with one placemark during ingestion
///
/// `dropped` placemarks never reach the catalog. The others are kept but
/// carry no validity window.
#[derive(Debug)]
pub struct IngestIssue {
    pub layer: String,
    pub placemark: String,
    pub dropped: bool,
    pub error: ParseError,
}

impl fmt::Display for IngestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {:?}: {}{}",
            self.layer,
            self.placemark,
            self.error,
            if self.dropped { " (dropped)" } else { "" }
        )
    }
}
