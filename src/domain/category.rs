use serde::Serialize;

/// Hazard kind of an outlook layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Categorical,
    Wind,
    Hail,
    Tornado,
    SignificantWind,
    SignificantHail,
    SignificantTornado,
    /// General thunderstorm risk, also the fallback for unrecognised layers
    Convective,
}

impl Category {
    /// Fixed sentence shown next to every match in this category
    pub fn description(self) -> &'static str {
        match self {
            Category::Categorical => "Categorical Risk for severe weather",
            Category::Wind => "Risk of >57 mph gusts within 25 miles",
            Category::Hail => "Risk of 1\" hail within 25 miles",
            Category::Tornado => "Risk of tornado within 25 miles",
            Category::SignificantWind => "Significant wind (>75 mph gusts) within 25 miles",
            Category::SignificantHail => "Significant hail (>2\") within 25 miles",
            Category::SignificantTornado => "Significant tornado (EF2 or greater) within 25 miles",
            Category::Convective => "Risk of T'Strm within 12 miles",
        }
    }

    /// Classify an outlook layer suffix such as `torn` or `sighail`
    pub fn from_suffix(suffix: &str) -> Category {
        match suffix.to_ascii_lowercase().as_str() {
            "cat" => Category::Categorical,
            "wind" => Category::Wind,
            "hail" => Category::Hail,
            "torn" => Category::Tornado,
            "sigwind" => Category::SignificantWind,
            "sighail" => Category::SignificantHail,
            "sigtorn" => Category::SignificantTornado,
            _ => Category::Convective,
        }
    }

    /// Classify a layer name like `day1otlk_20240501_1300_sigtorn` by its last
    /// underscore-separated word
    pub fn from_layer_name(name: &str) -> Category {
        let suffix = name.trim().rsplit('_').next().unwrap_or_default();
        Category::from_suffix(suffix)
    }
}
