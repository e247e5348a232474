use strum::{Display, EnumIter};

use super::*;

pub use strum::IntoEnumIterator;

/// The three kinds of repositories taking part in the program.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepoCategory {
    Web,
    Python,
    NonCode,
}

impl RepoCategory {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|category| category.to_string().eq_ignore_ascii_case(name))
    }
}

/// Points ("Dinos") awarded per qualifying merge in each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsTable {
    pub web: u32,
    pub python: u32,
    pub noncode: u32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            web: 25,
            python: 20,
            noncode: 5,
        }
    }
}

impl PointsTable {
    pub const fn weight(&self, category: RepoCategory) -> u32 {
        match category {
            RepoCategory::Web => self.web,
            RepoCategory::Python => self.python,
            RepoCategory::NonCode => self.noncode,
        }
    }
}

/// Merged PR counts of a single user broken down by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub web: u32,
    pub python: u32,
    pub noncode: u32,
}

impl CategoryCounts {
    pub const fn get(&self, category: RepoCategory) -> u32 {
        match category {
            RepoCategory::Web => self.web,
            RepoCategory::Python => self.python,
            RepoCategory::NonCode => self.noncode,
        }
    }

    pub fn set(&mut self, category: RepoCategory, count: u32) {
        match category {
            RepoCategory::Web => self.web = count,
            RepoCategory::Python => self.python = count,
            RepoCategory::NonCode => self.noncode = count,
        }
    }
}
