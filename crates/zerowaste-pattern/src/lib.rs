//! # Zero-waste pattern engine
//!
//! Parametric remapping of a garment panel outline. A fixed [`BasePolygon`]
//! with a sleeve cutout and a neckline region is deformed by a
//! [`TransformParameters`] record into a [`TransformedPolygon`], which can be
//! measured with a [`MeasurementProbe`] or welded into a [`PatternMesh`].
//!
//! [`PatternSession`] wraps the engine for interactive use: staged edits,
//! a single recompute per batch, and parameter files.

pub mod base_polygon;
pub mod measure;
pub mod params;
pub mod polygon;
pub mod serialization;
pub mod session;
pub mod transform;

pub use base_polygon::{BasePolygon, BaseVariant, ControlPoints, RegionRange, DESIGN_UNIT};
pub use measure::{KeyMeasurements, LateralEdge, Measurement, MeasurementProbe};
pub use params::{
    GlobalParams, ManualOverride, NeckOverrides, NeckParams, ParameterRange, Placement,
    SleeveOverrides, SleeveParams, TransformParameters,
};
pub use polygon::{PatternMesh, TransformedPolygon, ViewPlane, WELD_TOLERANCE};
pub use serialization::ParameterDocument;
pub use session::{BatchEdit, PatternSession};
pub use transform::TransformEngine;
