use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunables for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Binarization level; pixels at or below it become stroke foreground
    pub threshold: u8,
    /// Gaussian smoothing before binarization, off unless set. Sigmas
    /// around 1 wash 1 px strokes out above the threshold.
    #[schemars(range(min = 0.1, max = 10.0))]
    pub blur_sigma: Option<f32>,
    /// Radius of the closing pass after binarization, `None` to skip
    pub closing_radius: Option<u8>,
    /// Simplification tolerance as a fraction of each contour's perimeter
    #[schemars(range(min = 0.0, max = 1.0))]
    pub epsilon_ratio: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            threshold: 127,
            blur_sigma: None,
            closing_radius: Some(1),
            epsilon_ratio: 0.02,
        }
    }
}

impl ExtractionConfig {
    /// Binarize and trace only, without closing
    pub fn crisp() -> Self {
        Self {
            closing_radius: None,
            ..Self::default()
        }
    }

    /// Default pipeline plus a 5x5-equivalent blur for noisy scans
    pub fn smoothed() -> Self {
        Self {
            blur_sigma: Some(1.1),
            ..Self::default()
        }
    }
}
