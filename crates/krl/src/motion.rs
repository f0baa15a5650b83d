use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use crate::error::{KrlError, Result};

/// Kind of robot move emitted for one path.
///
/// Wire form is the upper-case KRL keyword; parsing ignores case.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum MotionSpec {
    /// Point-to-point move to a single target
    #[default]
    #[serde(alias = "ptp")]
    Ptp,
    /// Linear move to a single target at constant velocity
    #[serde(alias = "lin")]
    Lin,
    /// Circular move through an auxiliary point to an end point
    #[serde(alias = "circ")]
    Circ,
    /// Smooth path through up to five targets
    #[serde(alias = "spline")]
    Spline,
}

impl MotionSpec {
    /// Most targets a single block of this kind carries
    pub fn max_targets(&self) -> usize {
        match self {
            Self::Ptp | Self::Lin => 1,
            Self::Circ => 2,
            Self::Spline => 5,
        }
    }

    /// Parse a wire tag such as `"LIN"` or `"spline"`
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim().parse().map_err(|_| KrlError::UnknownTag {
            kind: "motion type",
            value: tag.to_string(),
        })
    }

    /// Get a list of all wire tags
    pub fn tags() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }
}

/// Where the program starts and ends
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StartPosition {
    /// Move to the home pose before the body and return afterwards
    #[default]
    #[serde(alias = "home", alias = "Home")]
    Home,
    /// Start from wherever the robot currently is
    #[serde(alias = "anywhere", alias = "Anywhere")]
    Anywhere,
}

impl StartPosition {
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim().parse().map_err(|_| KrlError::UnknownTag {
            kind: "start position",
            value: tag.to_string(),
        })
    }
}

/// Whether targets come from sketch geometry or placeholders
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Interpretation {
    /// Placeholder targets; path geometry is not used
    #[default]
    #[serde(alias = "direct", alias = "Direct")]
    Direct,
    /// Path vertices mapped into the workspace
    #[serde(alias = "coordinates", alias = "Coordinates")]
    Coordinates,
}

impl Interpretation {
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim().parse().map_err(|_| KrlError::UnknownTag {
            kind: "interpretation",
            value: tag.to_string(),
        })
    }
}

/// Accepted for compatibility; has no effect on the generated program
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Clarifications {
    #[default]
    #[serde(alias = "yes", alias = "Yes")]
    Yes,
    #[serde(alias = "no", alias = "No")]
    No,
}

impl Clarifications {
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim().parse().map_err(|_| KrlError::UnknownTag {
            kind: "clarifications",
            value: tag.to_string(),
        })
    }
}
