//! Settings file handling
//!
//! One file holds everything a run needs:
//! - Pattern section (base outline variant, transform parameters)
//! - Export section (drawing options)
//! - Output section (where files go)
//!
//! Files are JSON or TOML, chosen by extension. Every section has defaults,
//! so a file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zerowaste_core::{Error, Result};
use zerowaste_pattern::serialization::write_atomic;
use zerowaste_pattern::{BasePolygon, BaseVariant, TransformParameters};
use zerowaste_svg::SvgExportConfig;

/// Directory name under the platform config directory
pub const APP_DIR: &str = "zerowaste";

/// Settings file name inside [`APP_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Base outline and transform parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSettings {
    pub variant: BaseVariant,
    pub parameters: TransformParameters,
}

impl PatternSettings {
    pub fn base_polygon(&self) -> BasePolygon {
        self.variant.polygon()
    }
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for drawings and parameter files
    pub directory: PathBuf,
    /// File name used by `save-params`
    pub params_file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            params_file_name: "zerowaste_params.json".to_string(),
        }
    }
}

/// Home directory, or the working directory when there is none
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Complete settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pattern: PatternSettings,
    pub export: SvgExportConfig,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            _ => Err(Error::other(format!(
                "Config file must be .json or .toml: {}",
                path.display()
            ))),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform settings path, e.g. `~/.config/zerowaste/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?,
            Format::Toml => toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, else the platform file when it exists, else
    /// defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), replacing it atomically
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?,
        };

        write_atomic(path, content.as_bytes())?;
        tracing::info!("saved settings to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.pattern.parameters.validate_ranges()?;
        self.export.validate().map_err(Error::other)?;

        if self.output.params_file_name.trim().is_empty() {
            return Err(Error::other("Parameter file name must not be empty"));
        }
        Ok(())
    }

    /// Where the drawing is written
    pub fn svg_path(&self) -> PathBuf {
        self.output.directory.join(self.export.file_name())
    }

    /// Where `save-params` writes
    pub fn params_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.params_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.pattern.variant, BaseVariant::V3);
        assert_eq!(config.pattern.base_polygon().len(), 46);
        assert!(config.svg_path().ends_with("patron.svg"));
        assert!(config.params_path().ends_with("zerowaste_params.json"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::of(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::of(Path::new("a.TOML")).unwrap(), Format::Toml);
        assert!(Format::of(Path::new("a.yaml")).is_err());
        assert!(Format::of(Path::new("config")).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_parameter() {
        let mut config = Config::new();
        config.pattern.parameters.sleeve.scale_x = 9.0;
        let err = config.validate().unwrap_err();
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_validate_rejects_export_option() {
        let mut config = Config::new();
        config.export.fonts.relative_pct = 0.9;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fonts.relative_pct"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [pattern]
            variant = "classic"

            [export.title]
            project = "Tee"
            "#,
        )
        .unwrap();
        assert_eq!(config.pattern.variant, BaseVariant::Classic);
        assert_eq!(config.export.title.project, "Tee");
        assert_eq!(config.export.canvas.margin_cm, 1.5);
        assert_eq!(config.pattern.parameters, TransformParameters::default());
    }
}
