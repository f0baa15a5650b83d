//! # Sketch Path Extraction Library
//!
//! Turns a scanned or hand-drawn sketch into a short, ordered list of
//! simplified polylines ready for motion-program generation.
//!
//! ## Core Features
//!
//! - **Trait-based Architecture**: preprocessing, contour tracing and
//!   simplification are swappable stages
//! - **Pipeline System**: compose stages with a fluent builder or from an
//!   [`ExtractionConfig`]
//! - **External Contours Only**: filled shapes and rings yield one path each
//! - **Preview Rendering**: optional contour overlay for display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sketch::PathExtractor;
//!
//! let extractor = PathExtractor::new();
//! let extraction = extractor.extract_file("sketch.png")?;
//! for path in &extraction.paths {
//!     println!("path {} has {} points", path.id(), path.length());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use sketch::{Pipeline, PathExtractor};
//!
//! let pipeline = Pipeline::builder()
//!     .with_blur(1.5)
//!     .with_threshold(100)
//!     .with_closing(2)
//!     .with_simplification(0.01)
//!     .build();
//! let extractor = PathExtractor::with_pipeline(pipeline);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod config;
pub mod extractor;
pub mod render;

pub use error::{SketchError, Result};
pub use types::Extraction;
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use config::ExtractionConfig;
pub use extractor::PathExtractor;
pub use sketch_common::{Path, Point};
