use crate::{
    config::ExtractionConfig,
    pipeline::Pipeline,
    traits::{ImagePreprocessor, ContourExtractor, ContourSimplifier},
    algorithms::{
        ClosingPreprocessor,
        DouglasPeuckerSimplifier,
        ExternalContourExtractor,
        GaussianBlurPreprocessor,
        InvertedThresholdPreprocessor,
    },
};

/// Builder for creating extraction pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    simplifier: Option<Box<dyn ContourSimplifier>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
            simplifier: None,
        }
    }

    /// Add a preprocessor; stages run in insertion order
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: ContourSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    pub fn with_blur(self, sigma: f32) -> Self {
        self.add_preprocessor(GaussianBlurPreprocessor { sigma })
    }

    pub fn with_threshold(self, threshold: u8) -> Self {
        self.add_preprocessor(InvertedThresholdPreprocessor { threshold })
    }

    pub fn with_closing(self, radius: u8) -> Self {
        self.add_preprocessor(ClosingPreprocessor { radius })
    }

    /// Douglas-Peucker with tolerance relative to contour perimeter
    pub fn with_simplification(self, epsilon_ratio: f64) -> Self {
        self.set_simplifier(DouglasPeuckerSimplifier { epsilon_ratio })
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor));

        let simplifier = self.simplifier
            .unwrap_or_else(|| Box::new(DouglasPeuckerSimplifier::default()));

        Pipeline::new(self.preprocessors, contour_extractor, simplifier)
    }

    /// Build the full sketch pipeline described by a config:
    /// optional blur, inverted threshold, closing, external contours, simplification
    pub fn from_config(config: &ExtractionConfig) -> Pipeline {
        let mut builder = Self::new();
        if let Some(sigma) = config.blur_sigma {
            builder = builder.with_blur(sigma);
        }
        builder = builder.with_threshold(config.threshold);
        if let Some(radius) = config.closing_radius {
            builder = builder.with_closing(radius);
        }
        builder.with_simplification(config.epsilon_ratio).build()
    }

    /// Build the pipeline with default sketch settings
    pub fn build_sketch() -> Pipeline {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use image::{GrayImage, Luma};
    use sketch_common::Point;

    struct FixedContours(Vec<Vec<Point>>);

    impl ContourExtractor for FixedContours {
        fn extract_contours(&self, _binary_image: &GrayImage) -> Result<Vec<Vec<Point>>> {
            Ok(self.0.clone())
        }
    }

    struct KeepEverything;

    impl ContourSimplifier for KeepEverything {
        fn simplify(&self, contour: &[Point]) -> Vec<Point> {
            contour.to_vec()
        }
    }

    #[test]
    fn test_custom_stages_replace_defaults() {
        let contour = vec![Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)];
        let pipeline = PipelineBuilder::new()
            .set_contour_extractor(FixedContours(vec![contour.clone()]))
            .set_simplifier(KeepEverything)
            .build();

        let extraction = pipeline.process(&GrayImage::new(8, 8)).unwrap();
        assert_eq!(extraction.path_count(), 1);
        assert_eq!(extraction.paths[0].points(), contour.as_slice());
        assert_eq!(extraction.total_points(), 3);
    }

    #[test]
    fn test_empty_contour_from_custom_stage_is_an_error() {
        let pipeline = PipelineBuilder::new()
            .set_contour_extractor(FixedContours(vec![Vec::new()]))
            .set_simplifier(KeepEverything)
            .build();
        assert!(pipeline.process(&GrayImage::new(4, 4)).is_err());
    }

    #[test]
    fn test_stages_run_in_insertion_order() {
        let pipeline = PipelineBuilder::new().with_threshold(127).with_closing(1).build();
        assert!(pipeline.info().contains("Inverted Threshold -> Closing"));

        let mut img = GrayImage::from_pixel(20, 20, Luma([255u8]));
        img.put_pixel(5, 5, Luma([0u8]));
        let extraction = pipeline.process(&img).unwrap();
        assert_eq!(extraction.path_count(), 1);
    }
}
