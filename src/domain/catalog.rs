use chrono::{DateTime, FixedOffset};

use super::{Category, HazardRegion};

/// All regions of one outlook layer, in document order
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub name: String,
    pub category: Category,
    pub regions: Vec<HazardRegion>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>, category: Category, regions: Vec<HazardRegion>) -> Self {
        Self {
            name: name.into(),
            category,
            regions,
        }
    }
}

/// Ordered outlook layers; reporting follows this order, never a sorted one
#[derive(Debug, Clone, Default)]
pub struct HazardCatalog {
    pub name: Option<String>,
    pub issued: Option<DateTime<FixedOffset>>,
    pub groups: Vec<CategoryGroup>,
}

impl HazardCatalog {
    pub fn new(groups: Vec<CategoryGroup>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    pub fn with_issued(mut self, issued: Option<DateTime<FixedOffset>>) -> Self {
        self.issued = issued;
        self
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Every region paired with its group, groups first then regions
    pub fn regions(&self) -> impl Iterator<Item = (&CategoryGroup, &HazardRegion)> {
        self.groups
            .iter()
            .flat_map(|group| group.regions.iter().map(move |region| (group, region)))
    }

    pub fn region_count(&self) -> usize {
        self.groups.iter().map(|g| g.regions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.region_count() == 0
    }
}
