//! Advice keyed on utilization and pipeline health.
//!
//! Two independent tables live here: the detailed 20-entry
//! [`matrix`] and the coarser 12-entry [`severity`] table feed different panels.

pub mod matrix;
pub mod severity;

use crate::domain::units::Percentage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use matrix::{get_recommendation, recommend, RecommendationEntry, RenderedRecommendation};
pub use severity::{assess, Advice, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilizationCategory {
    VeryLow,
    Acceptable,
    Good,
    Great,
    Excellent,
}

impl UtilizationCategory {
    pub const ALL: [UtilizationCategory; 5] = [
        UtilizationCategory::VeryLow,
        UtilizationCategory::Acceptable,
        UtilizationCategory::Good,
        UtilizationCategory::Great,
        UtilizationCategory::Excellent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UtilizationCategory::VeryLow => "very-low",
            UtilizationCategory::Acceptable => "acceptable",
            UtilizationCategory::Good => "good",
            UtilizationCategory::Great => "great",
            UtilizationCategory::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineHealth {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl PipelineHealth {
    pub const ALL: [PipelineHealth; 4] = [
        PipelineHealth::Poor,
        PipelineHealth::Fair,
        PipelineHealth::Good,
        PipelineHealth::Excellent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineHealth::Poor => "poor",
            PipelineHealth::Fair => "fair",
            PipelineHealth::Good => "good",
            PipelineHealth::Excellent => "excellent",
        }
    }
}

/// Step function over the 0–100 scale. Each boundary belongs to the higher bucket.
pub fn classify_utilization(rate: Percentage) -> UtilizationCategory {
    let rate = rate.get();
    if rate.is_nan() || rate < 40.0 {
        UtilizationCategory::VeryLow
    } else if rate < 60.0 {
        UtilizationCategory::Acceptable
    } else if rate < 70.0 {
        UtilizationCategory::Good
    } else if rate < 85.0 {
        UtilizationCategory::Great
    } else {
        UtilizationCategory::Excellent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    pub kind: &'static str,
    pub input: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.input)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for UtilizationCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| ParseCategoryError {
                kind: "utilization category",
                input: s.to_string(),
            })
    }
}

impl FromStr for PipelineHealth {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| ParseCategoryError {
                kind: "pipeline health",
                input: s.to_string(),
            })
    }
}

impl fmt::Display for UtilizationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PipelineHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
