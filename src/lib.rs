//! # Zerowaste
//!
//! Parametric generator for a zero-waste T-shirt panel with a dimensioned
//! SVG drawing exporter.
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **zerowaste-core** - Geometry helpers, units, error types
//! 2. **zerowaste-pattern** - Base outlines, transform engine, measurements, parameter files
//! 3. **zerowaste-svg** - Label placement and drawing layout
//! 4. **zerowaste-settings** - JSON/TOML settings files
//! 5. **zerowaste** - Command-line front end tying the crates together

pub mod cli;
pub mod pipeline;

pub use zerowaste_core::{Error, Point2, Point3, Result};
pub use zerowaste_pattern::{
    BasePolygon, BaseVariant, KeyMeasurements, PatternMesh, PatternSession, TransformEngine,
    TransformParameters, TransformedPolygon,
};
pub use zerowaste_settings::Config;
pub use zerowaste_svg::{SvgExportConfig, SvgLayoutEngine};

pub use cli::{Cli, Command};
pub use pipeline::Pipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Log lines go to stderr so command output on stdout stays clean. The
/// level defaults to `warn` and follows `RUST_LOG` when it is set.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
