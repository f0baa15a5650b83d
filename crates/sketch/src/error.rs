use thiserror::Error;

#[derive(Error, Debug)]
pub enum SketchError {
    #[error("Failed to read image: {0}")]
    InvalidImage(#[from] image::ImageError),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Path construction error: {0}")]
    Path(#[from] sketch_common::PathError),
}

pub type Result<T> = std::result::Result<T, SketchError>;
