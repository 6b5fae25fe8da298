//! Export error types

use thiserror::Error;

/// Errors raised while laying out or writing a drawing
///
/// Labels that cannot be placed are not errors; they are dropped and
/// counted in the layout statistics.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to draw
    #[error("No vertices to export")]
    EmptyGeometry,

    /// A vertex has a NaN or infinite coordinate
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the offending vertex.
        index: usize,
    },

    /// An edge references a vertex that does not exist
    #[error("Edge {edge} references vertex {vertex}, but only {len} vertices exist")]
    EdgeOutOfRange {
        /// Index of the edge in the edge list.
        edge: usize,
        /// The missing vertex index.
        vertex: usize,
        /// Number of vertices.
        len: usize,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The temporary file could not be moved into place
    #[error("Failed to persist {path}: {source}")]
    Persist {
        /// Destination path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
