use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::motion::{Clarifications, Interpretation, MotionSpec, StartPosition};

/// Motion used for any path without a matching entry in `motion_specs`
pub const FALLBACK_MOTION: MotionSpec = MotionSpec::Ptp;

/// Everything the user chose for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationRequest {
    #[serde(default)]
    pub start_position: StartPosition,

    /// One entry per detected path, in path order. With no paths, one
    /// sample block is emitted per entry.
    #[serde(default = "default_motion_specs")]
    pub motion_specs: Vec<MotionSpec>,

    #[serde(default)]
    pub interpretation: Interpretation,

    /// Carried for compatibility, ignored by the generator
    #[serde(default)]
    pub clarifications: Clarifications,
}

fn default_motion_specs() -> Vec<MotionSpec> {
    vec![FALLBACK_MOTION]
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            start_position: StartPosition::default(),
            motion_specs: default_motion_specs(),
            interpretation: Interpretation::default(),
            clarifications: Clarifications::default(),
        }
    }
}

impl GenerationRequest {
    pub fn new(
        start_position: StartPosition,
        motion_specs: Vec<MotionSpec>,
        interpretation: Interpretation,
        clarifications: Clarifications,
    ) -> Self {
        Self {
            start_position,
            motion_specs,
            interpretation,
            clarifications,
        }
    }

    /// Motion for the path at `index`, falling back to PTP past the end
    pub fn motion_spec_for(&self, index: usize) -> MotionSpec {
        self.motion_specs.get(index).copied().unwrap_or(FALLBACK_MOTION)
    }

    /// Get the JSON schema of a request
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(GenerationRequest)
    }
}
