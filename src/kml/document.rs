use serde::Deserialize;

/// Root `<kml>` element
#[derive(Debug, Deserialize)]
pub struct KmlRoot {
    #[serde(rename = "Document")]
    pub document: KmlDocument,
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "Folder", default)]
    pub folders: Vec<KmlFolder>,
}

/// One outlook layer, e.g. `day1otlk_20240501_1300_torn`
#[derive(Debug, Deserialize, Default)]
pub struct KmlFolder {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Placemark", default)]
    pub placemarks: Vec<KmlPlacemark>,
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlPlacemark {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "TimeSpan", default)]
    pub time_span: Option<KmlTimeSpan>,
    #[serde(rename = "Polygon", default)]
    pub polygon: Option<KmlPolygon>,
    #[serde(rename = "MultiGeometry", default)]
    pub multi_geometry: Option<KmlMultiGeometry>,
}

impl KmlPlacemark {
    /// All polygons of the placemark, plain or nested in a MultiGeometry
    pub fn polygons(&self) -> Vec<&KmlPolygon> {
        let nested = self
            .multi_geometry
            .iter()
            .flat_map(|multi| multi.polygons.iter());
        self.polygon.iter().chain(nested).collect()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlTimeSpan {
    #[serde(default)]
    pub begin: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlMultiGeometry {
    #[serde(rename = "Polygon", default)]
    pub polygons: Vec<KmlPolygon>,
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlPolygon {
    #[serde(rename = "outerBoundaryIs", default)]
    pub outer: Option<KmlBoundary>,
    #[serde(rename = "innerBoundaryIs", default)]
    pub inner: Vec<KmlBoundary>,
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlBoundary {
    #[serde(rename = "LinearRing", default)]
    pub ring: Option<KmlLinearRing>,
}

#[derive(Debug, Deserialize, Default)]
pub struct KmlLinearRing {
    #[serde(default)]
    pub coordinates: String,
}
