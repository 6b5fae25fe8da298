//! Error handling for the zero-waste pattern tools
//!
//! Provides the error types shared by every crate in the workspace:
//! - Geometry errors (malformed base polygons, bad vertex indices)
//! - Parameter errors (non-finite or out-of-range transform inputs)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a polygon or one of its named regions is structurally
/// invalid. Constraint conflicts are never reported here; they are clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Polygon has too few points to form an outline
    #[error("Polygon needs at least {min} points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
        /// Minimum number of points required.
        min: usize,
    },

    /// A named region contains no points
    #[error("Region '{region}' is empty")]
    EmptyRegion {
        /// The region name.
        region: String,
    },

    /// A named region extends past the end of the polygon
    #[error("Region '{region}' ({start}..{end}) is out of bounds for {len} points")]
    RegionOutOfBounds {
        /// The region name.
        region: String,
        /// First index of the region.
        start: usize,
        /// One past the last index of the region.
        end: usize,
        /// Number of points in the polygon.
        len: usize,
    },

    /// The two curve regions share indices
    #[error("Regions '{first}' and '{second}' overlap")]
    OverlappingRegions {
        /// The first region name.
        first: String,
        /// The second region name.
        second: String,
    },

    /// A control point is not where its role requires
    #[error("Control point '{name}' (index {index}) must lie in {expected}")]
    MisplacedControlPoint {
        /// The control point name.
        name: String,
        /// The offending index.
        index: usize,
        /// Where the point was expected.
        expected: String,
    },

    /// A coordinate is NaN or infinite
    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The offending point index.
        index: usize,
    },

    /// The polygon has zero width or height
    #[error("Degenerate bounds: width {width}, height {height}")]
    DegenerateBounds {
        /// Bounding-box width.
        width: f64,
        /// Bounding-box height.
        height: f64,
    },

    /// A vertex index does not exist
    #[error("Vertex index {index} out of range for {len} vertices")]
    VertexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of vertices available.
        len: usize,
    },
}

impl GeometryError {
    /// Shorthand for a region error keyed by name
    pub fn empty_region(region: impl Into<String>) -> Self {
        GeometryError::EmptyRegion {
            region: region.into(),
        }
    }
}

/// Parameter error type
///
/// Raised before any output is produced when a transform input cannot be
/// used at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A numeric parameter is NaN or infinite
    #[error("Parameter '{name}' is not a finite number")]
    NotFinite {
        /// The parameter name.
        name: String,
    },

    /// A parameter lies outside its declared range
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The supplied value.
        value: f64,
        /// Lower bound of the declared range.
        min: f64,
        /// Upper bound of the declared range.
        max: f64,
    },
}

/// Main error type
///
/// Aggregates all error kinds into a single type for use across the
/// workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Parameter error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a parameter error
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Error::Parameter(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
