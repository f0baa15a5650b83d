//! # Sketch Common - Shared Path Types
//!
//! The data shapes passed between path extraction and program generation.
//! Neither side needs the other's dependencies: the extractor produces
//! [`Path`]s, the generator consumes them.
//!
//! ## Example
//!
//! ```rust
//! use sketch_common::{Path, Point};
//!
//! let path = Path::new(0, vec![Point::new(50, 50), Point::new(200, 50)]).unwrap();
//! assert_eq!(path.length(), 2);
//! assert_eq!(path.first(), Point::new(50, 50));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for path construction
pub type Result<T> = std::result::Result<T, PathError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path {id} has no points")]
    Empty { id: usize },

    #[error("Invalid paths document: {0}")]
    Parse(String),

    #[error("Failed to serialize paths: {0}")]
    Serialize(String),
}

/// Integer pixel coordinate in image space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An ordered, non-empty polyline detected in a sketch.
///
/// `id` is the 0-based discovery order of the contour it came from. `length`
/// always equals the number of points; it is carried so serialized paths stay
/// self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PathRecord")]
pub struct Path {
    id: usize,
    points: Vec<Point>,
    length: usize,
}

impl Path {
    /// Create a path, rejecting an empty point list
    pub fn new(id: usize, points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(PathError::Empty { id });
        }
        let length = points.len();
        Ok(Self { id, points, length })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// First vertex in traversal order
    pub fn first(&self) -> Point {
        // non-empty by construction
        self.points[0]
    }
}

/// Wire form of a path. `length` is accepted but recomputed.
#[derive(Deserialize)]
struct PathRecord {
    id: usize,
    points: Vec<Point>,
    #[serde(default, rename = "length")]
    _length: Option<usize>,
}

impl TryFrom<PathRecord> for Path {
    type Error = PathError;

    fn try_from(record: PathRecord) -> Result<Self> {
        Path::new(record.id, record.points)
    }
}

/// Utility functions shared by the extractor and the CLI
pub mod utils {
    use super::*;

    /// Image extensions a sketch may be supplied in
    pub const SKETCH_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

    /// Check if a file extension indicates a supported sketch image
    pub fn is_sketch_file<P: AsRef<std::path::Path>>(filename: P) -> bool {
        get_file_extension(filename)
            .map(|ext| SKETCH_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Lower-cased file extension, if any
    pub fn get_file_extension<P: AsRef<std::path::Path>>(filename: P) -> Option<String> {
        filename
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Parse a JSON array of paths, as written by `paths_to_json`
    pub fn paths_from_json(content: &str) -> Result<Vec<Path>> {
        serde_json::from_str(content).map_err(|e| PathError::Parse(e.to_string()))
    }

    /// Serialize paths to pretty JSON
    pub fn paths_to_json(paths: &[Path]) -> Result<String> {
        serde_json::to_string_pretty(paths).map_err(|e| PathError::Serialize(e.to_string()))
    }

    /// Total number of vertices across all paths
    pub fn total_points(paths: &[Path]) -> usize {
        paths.iter().map(Path::length).sum()
    }
}
