//! End-to-end runs: settings, parameters, pattern, outputs.

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use zerowaste_pattern::serialization::write_atomic;
use zerowaste_pattern::{BaseVariant, KeyMeasurements, PatternMesh, PatternSession};
use zerowaste_settings::Config;
use zerowaste_svg::{PlacementStats, SvgLayoutEngine};

/// A loaded configuration with a live pattern session
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    session: PatternSession,
}

impl Pipeline {
    /// Build the session from `config`, optionally switching the base
    /// outline and overlaying a parameter file.
    pub fn new(
        mut config: Config,
        variant: Option<BaseVariant>,
        params: Option<&Path>,
    ) -> anyhow::Result<Self> {
        if let Some(variant) = variant {
            config.pattern.variant = variant;
        }
        let mut session = PatternSession::new(
            config.pattern.base_polygon(),
            config.pattern.parameters.clone(),
        )
        .with_context(|| format!("failed to build the {} pattern", config.pattern.variant))?;

        if let Some(path) = params {
            let applied = session
                .load_parameters(path)
                .with_context(|| format!("failed to load parameters from {}", path.display()))?;
            tracing::info!("applied {} parameters from {}", applied, path.display());
            config.pattern.parameters = session.params().clone();
        }

        Ok(Self { config, session })
    }

    /// Load settings from `config_path` (or the platform default) and build.
    pub fn load(
        config_path: Option<&Path>,
        variant: Option<BaseVariant>,
        params: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let config = Config::load_or_default(config_path).with_context(|| match config_path {
            Some(path) => format!("failed to load settings from {}", path.display()),
            None => "failed to load default settings".to_string(),
        })?;
        Self::new(config, variant, params)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &PatternSession {
        &self.session
    }

    pub fn mesh(&self) -> PatternMesh {
        PatternMesh::from_polygon(self.session.polygon())
    }

    /// Welded mesh as pretty JSON
    pub fn mesh_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.mesh()).context("failed to serialize the mesh")
    }

    /// Write the mesh JSON to `out`
    pub fn write_mesh(&self, out: &Path) -> anyhow::Result<()> {
        let json = self.mesh_json()?;
        write_atomic(out, json.as_bytes())
            .with_context(|| format!("failed to write {}", out.display()))?;
        tracing::info!("wrote mesh to {}", out.display());
        Ok(())
    }

    pub fn measurements(&self) -> anyhow::Result<KeyMeasurements> {
        self.session
            .key_measurements()
            .context("failed to measure the pattern")
    }

    /// Lay out and write the drawing. Returns the written path.
    pub fn export_svg(&self, out: Option<&Path>) -> anyhow::Result<(PathBuf, PlacementStats)> {
        let path = out.map_or_else(|| self.config.svg_path(), Path::to_path_buf);
        let mesh = self.mesh();
        let engine = SvgLayoutEngine::new(self.config.export.clone());
        let (document, stats) = engine
            .layout_with_stats(&mesh.vertices, &mesh.edges)
            .context("failed to lay out the drawing")?;
        document
            .write_to_file(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok((path, stats))
    }

    /// Write the current parameters. Returns the written path.
    pub fn save_params(&self, out: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = out.map_or_else(|| self.config.params_path(), Path::to_path_buf);
        self.session
            .save_parameters(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Write a settings file holding every default. Existing files are kept.
pub fn init_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Config::default()
        .save_to_file(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Text report of the key measurements
pub fn format_measurements(m: &KeyMeasurements) -> String {
    let rows = [
        ("Armhole from left edge", m.armhole_from_left_cm),
        ("Armhole height", m.armhole_height_cm),
        ("Back seam height", m.back_seam_height_cm),
        ("Armhole span", m.armhole_span_cm),
        ("Neck base from right edge", m.neck_base_from_right_cm),
        ("Neck base total width", m.neck_base_total_cm),
        ("Neck base height", m.neck_base_height_cm),
        ("Neck start height", m.neck_start_height_cm),
    ];
    rows.iter()
        .map(|(label, value)| format!("{:<26}{:>8.1} cm\n", label, value))
        .collect()
}
