//! Image-space to robot-workspace coordinate mapping.
//!
//! The whole canvas is stretched onto an 800 x 800 mm square whose corner
//! sits at (100, 100) mm, on a fixed plane 300 mm high. There is no aspect
//! ratio correction.

use serde::{Deserialize, Serialize};
use sketch_common::Point;
use crate::error::{KrlError, Result};

pub const WORKSPACE_SPAN_MM: f64 = 800.0;
pub const WORKSPACE_OFFSET_MM: f64 = 100.0;
pub const PLANE_HEIGHT_MM: f64 = 300.0;

/// A target in robot workspace, millimetres, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Pixel dimensions of the frame being mapped; never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CanvasSize")]
pub struct Canvas {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct CanvasSize {
    width: u32,
    height: u32,
}

impl TryFrom<CanvasSize> for Canvas {
    type Error = KrlError;

    fn try_from(size: CanvasSize) -> Result<Self> {
        Canvas::new(size.width, size.height)
    }
}

impl Canvas {
    /// Mapping frame used for every generated program; it is not derived
    /// from the uploaded image's dimensions
    pub const DEFAULT: Canvas = Canvas { width: 400, height: 300 };

    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(KrlError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn map(&self, point: Point) -> WorkspaceCoordinate {
        let x = (f64::from(point.x) / f64::from(self.width)) * WORKSPACE_SPAN_MM + WORKSPACE_OFFSET_MM;
        let y = (f64::from(point.y) / f64::from(self.height)) * WORKSPACE_SPAN_MM + WORKSPACE_OFFSET_MM;
        WorkspaceCoordinate {
            x: round_mm(x),
            y: round_mm(y),
            z: round_mm(PLANE_HEIGHT_MM),
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Map a pixel onto the workspace for a canvas of the given size
pub fn to_workspace(point: Point, canvas_width: u32, canvas_height: u32) -> Result<WorkspaceCoordinate> {
    Ok(Canvas::new(canvas_width, canvas_height)?.map(point))
}

/// Round to 2 decimals, halves away from zero
pub fn round_mm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_maps_to_workspace_corner() {
        let mapped = to_workspace(Point::new(0, 0), 400, 300).unwrap();
        assert_eq!(mapped, WorkspaceCoordinate { x: 100.0, y: 100.0, z: 300.0 });
    }

    #[test]
    fn test_bottom_right_maps_to_far_corner() {
        let mapped = to_workspace(Point::new(400, 300), 400, 300).unwrap();
        assert_eq!(mapped, WorkspaceCoordinate { x: 900.0, y: 900.0, z: 300.0 });
    }

    #[test]
    fn test_repeating_fraction_is_rounded() {
        let mapped = to_workspace(Point::new(50, 50), 400, 300).unwrap();
        assert_eq!(mapped.x, 200.0);
        assert_eq!(mapped.y, 233.33);
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        // 1/6400 of the span is exactly 0.125 mm
        let mapped = to_workspace(Point::new(1, 1), 6400, 6400).unwrap();
        assert_eq!(mapped.x, 100.13);
        assert_eq!(round_mm(-0.125), -0.13);
    }

    #[test]
    fn test_non_square_canvas_is_stretched() {
        let mapped = to_workspace(Point::new(200, 50), 400, 100).unwrap();
        assert_eq!(mapped.x, 500.0);
        assert_eq!(mapped.y, 500.0);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert_eq!(
            to_workspace(Point::new(1, 1), 0, 300),
            Err(KrlError::InvalidDimension { width: 0, height: 300 })
        );
        assert!(to_workspace(Point::new(1, 1), 400, 0).is_err());
    }

    #[test]
    fn test_canvas_deserialize_validates() {
        let canvas: Canvas = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (640, 480));
        assert!(serde_json::from_str::<Canvas>(r#"{"width": 0, "height": 480}"#).is_err());
    }
}
