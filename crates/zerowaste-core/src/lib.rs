//! # Zero-waste core
//!
//! Shared building blocks for the pattern engine and the drawing exporter:
//! - 2D/3D points, bounds, arc-length resampling, plane projection
//! - Unit conversion between scene units, centimetres, and drawing units
//! - The workspace-wide error taxonomy

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, GeometryError, ParameterError, Result};
pub use geometry::{Bounds2, Point2, Point3, ProjectionPlane, EPSILON};
pub use units::{DocumentUnit, FontUnit, CM_TO_SCENE, SCENE_TO_CM};
