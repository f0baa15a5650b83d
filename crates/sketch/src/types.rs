use serde::{Deserialize, Serialize};
use sketch_common::{Path, Point};

/// Result of running a sketch through the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// Simplified paths, indexed by contour discovery order
    pub paths: Vec<Path>,
    /// Raw external contours the paths were simplified from.
    /// Only used for visualization.
    pub contours: Vec<Vec<Point>>,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl Extraction {
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Total number of simplified vertices
    pub fn total_points(&self) -> usize {
        sketch_common::utils::total_points(&self.paths)
    }

    /// Give up the visualization data and keep only the paths
    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}
