//! Outlook KML ingestion
//!
//! Raw strings from the document are validated here, once, into points,
//! rings and instants. Nothing downstream parses again.

pub mod document;
pub mod error;
pub mod parser;

use std::path::Path;

use tracing::info;

pub use document::KmlRoot;
pub use error::{IngestIssue, KmlError, ParseError};
pub use parser::{
    Ingest, ParseOptions, build_catalog, parse_coordinates, parse_issue_time, parse_timestamp,
};

/// Parse a KML document held in memory
pub fn parse_kml(text: &str, opts: &ParseOptions) -> Result<Ingest, KmlError> {
    let root: KmlRoot = quick_xml::de::from_str(text)?;
    let ingest = build_catalog(root.document, opts);
    info!(
        "Parsed {} layers, {} regions, {} issues",
        ingest.catalog.groups.len(),
        ingest.catalog.region_count(),
        ingest.issues.len()
    );
    Ok(ingest)
}

/// Read and parse a KML file
pub fn load_kml(path: &Path, opts: &ParseOptions) -> Result<Ingest, KmlError> {
    let text = std::fs::read_to_string(path).map_err(|source| KmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_kml(&text, opts)
}
