use image::GrayImage;
use imageproc::contours::BorderType;
use sketch_common::Point;
use crate::{error::Result, traits::ContourExtractor};

/// Imageproc border following, keeping outermost borders only.
///
/// Holes and any shapes nested inside holes are discarded, so a filled
/// or ring-shaped stroke yields a single contour. Contours come back in
/// raster-scan order of their first pixel.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor;

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Vec<Point>>> {
        let contours = imageproc::contours::find_contours::<i32>(binary_image);
        let total = contours.len();

        let result: Vec<Vec<Point>> = contours
            .into_iter()
            .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
            .map(|contour| {
                contour.points
                    .iter()
                    .map(|p| Point::new(p.x, p.y))
                    .collect()
            })
            .collect();

        tracing::debug!("kept {} external contours of {} borders", result.len(), total);
        Ok(result)
    }
}
