use std::sync::Arc;

use image::{DynamicImage, GrayImage};
use crate::{
    config::ExtractionConfig,
    error::Result,
    types::Extraction,
    pipeline::{Pipeline, builder::PipelineBuilder},
};

/// Turns sketch images into simplified paths.
///
/// Holds no per-image state: every call decodes, processes and returns its
/// own [`Extraction`], so one extractor can serve any number of callers.
#[derive(Clone)]
pub struct PathExtractor {
    pipeline: Arc<Pipeline>,
}

impl PathExtractor {
    pub fn new() -> Self {
        Self::with_pipeline(PipelineBuilder::build_sketch())
    }

    /// Create an extractor with a custom pipeline
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_pipeline(Pipeline::from_config(config))
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Extract paths from an already decoded image of any color type
    pub fn extract(&self, image: &DynamicImage) -> Result<Extraction> {
        self.extract_gray(&image.to_luma8())
    }

    pub fn extract_gray(&self, image: &GrayImage) -> Result<Extraction> {
        let extraction = self.pipeline.process(image)?;
        tracing::info!(
            "extracted {} path(s), {} vertices, from {}x{} sketch",
            extraction.path_count(),
            extraction.total_points(),
            extraction.image_width,
            extraction.image_height
        );
        Ok(extraction)
    }

    /// Decode an encoded image (PNG, JPEG) and extract paths from it
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<Extraction> {
        let image = image::load_from_memory(bytes)?;
        self.extract(&image)
    }

    /// Read a sketch from disk and extract paths from it
    pub fn extract_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<Extraction> {
        let image = image::open(path.as_ref())?;
        self.extract(&image)
    }
}

impl Default for PathExtractor {
    fn default() -> Self {
        Self::new()
    }
}
