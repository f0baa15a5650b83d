use image::GrayImage;
use sketch_common::Point;
use crate::error::Result;

/// Trait for image preprocessing stages (blur, binarization, morphology)
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;

    /// Short name used in pipeline descriptions and logs
    fn name(&self) -> &'static str;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from a binary image, in a stable discovery order
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Vec<Point>>>;
}

/// Trait for polyline reduction algorithms
pub trait ContourSimplifier: Send + Sync {
    /// Reduce a closed contour to its significant vertices
    fn simplify(&self, contour: &[Point]) -> Vec<Point>;
}
