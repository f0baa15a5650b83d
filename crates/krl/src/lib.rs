//! # KRL Program Generation
//!
//! Renders simplified sketch paths plus the user's motion choices into a
//! KUKA Robot Language program.
//!
//! Generation is a pure function of its inputs and never fails once the
//! request has been parsed: a missing motion type falls back to PTP, paths
//! too short for a CIRC get a placeholder arc, and an empty path list
//! produces sample motions.
//!
//! ```rust
//! use krl::{GenerationRequest, Interpretation, MotionSpec, StartPosition};
//! use sketch_common::{Path, Point};
//!
//! let request = GenerationRequest {
//!     start_position: StartPosition::Anywhere,
//!     motion_specs: vec![MotionSpec::Lin],
//!     interpretation: Interpretation::Coordinates,
//!     ..GenerationRequest::default()
//! };
//! let path = Path::new(0, vec![Point::new(50, 50), Point::new(200, 50)])?;
//! let program = krl::generate(&request, &[path]);
//! assert!(program.contains("LIN {X 200.0, Y 233.33, Z 300, A 0, B 0, C 0, S 6, T 27} C_VEL"));
//! # Ok::<(), sketch_common::PathError>(())
//! ```

pub mod error;
pub mod mapper;
pub mod motion;
pub mod request;
pub mod program;
pub mod generator;

pub use error::{KrlError, Result};
pub use mapper::{Canvas, WorkspaceCoordinate, to_workspace};
pub use motion::{Clarifications, Interpretation, MotionSpec, StartPosition};
pub use request::GenerationRequest;
pub use program::{Program, PROGRAM_FILE_EXTENSION};
pub use generator::{GeneratorOptions, ProgramGenerator, generate};
