pub mod builder;

use image::GrayImage;
use sketch_common::Path;
use crate::{
    error::Result,
    types::Extraction,
    traits::{ImagePreprocessor, ContourExtractor, ContourSimplifier},
};

/// Extraction pipeline: preprocessing stages, contour tracing, simplification
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
    simplifier: Box<dyn ContourSimplifier>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn from_config(config: &crate::config::ExtractionConfig) -> Self {
        builder::PipelineBuilder::from_config(config)
    }

    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
        simplifier: Box<dyn ContourSimplifier>,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
            simplifier,
        }
    }

    /// Process a grayscale sketch through the entire pipeline
    pub fn process(&self, image: &GrayImage) -> Result<Extraction> {
        // Step 1: Apply all preprocessors in sequence
        let mut processed_image = image.clone();
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
            tracing::debug!("applied {}", preprocessor.name());
        }

        // Step 2: Trace contours
        let contours = self.contour_extractor.extract_contours(&processed_image)?;

        // Step 3: Simplify each contour into a path, keeping discovery order
        let paths = contours
            .iter()
            .enumerate()
            .map(|(id, contour)| Path::new(id, self.simplifier.simplify(contour)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            "simplified {} contours to {} vertices",
            paths.len(),
            sketch_common::utils::total_points(&paths)
        );

        Ok(Extraction {
            paths,
            contours,
            image_width: image.width(),
            image_height: image.height(),
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        let stages: Vec<&str> = self.preprocessors.iter().map(|p| p.name()).collect();
        format!(
            "Pipeline: [{}] -> contour tracing -> simplification",
            stages.join(" -> ")
        )
    }
}
