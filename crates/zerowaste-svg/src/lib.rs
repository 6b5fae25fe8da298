//! # Zero-waste SVG export
//!
//! Dimensioned technical drawings of flat pattern pieces. A mesh outline is
//! projected onto a plane, scaled 1:1 to centimetres and annotated with
//! edge lengths, optional ordinates, vertex IDs and a title block. Labels
//! are positioned by a greedy spatial-hash placer so they avoid each other.
//!
//! Output groups keep fixed layer ids so cutting and plotting tools can
//! toggle them.

pub mod config;
pub mod document;
pub mod error;
pub mod label_placer;
pub mod layout;

pub use config::{
    CanvasConfig, DimensionConfig, FontConfig, FontSizeStrategy, IdConfig, OrdinateConfig,
    ProjectionMode, SvgExportConfig, TitleBlockConfig,
};
pub use document::{Element, Layer, LayerKind, SvgDocument};
pub use error::{ExportError, ExportResult};
pub use label_placer::{LabelPlacer, LabelReservation, PlacementRequest};
pub use layout::{select_dimension_edges, FontSizes, PlacementStats, SvgLayoutEngine};
