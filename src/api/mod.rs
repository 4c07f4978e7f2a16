pub mod fetch;

pub use fetch::fetch_kml;
