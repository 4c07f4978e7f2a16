pub mod catalog;
pub mod category;
pub mod interval;
pub mod region;

pub use catalog::{CategoryGroup, HazardCatalog};
pub use category::Category;
pub use interval::Interval;
pub use region::{HazardRegion, matches};
