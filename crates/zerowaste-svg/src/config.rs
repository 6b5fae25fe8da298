//! Export configuration
//!
//! Every option of the drawing exporter, grouped by concern. All sections
//! deserialize with defaults, so a settings file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};
use zerowaste_core::{DocumentUnit, FontUnit, ProjectionPlane};

/// Projection used to flatten the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Drop the axis with the smallest extent
    #[default]
    Auto,
    Xy,
    Xz,
    Yz,
}

impl ProjectionMode {
    /// The forced plane, if any
    pub fn plane(&self) -> Option<ProjectionPlane> {
        match self {
            ProjectionMode::Auto => None,
            ProjectionMode::Xy => Some(ProjectionPlane::Xy),
            ProjectionMode::Xz => Some(ProjectionPlane::Xz),
            ProjectionMode::Yz => Some(ProjectionPlane::Yz),
        }
    }
}

/// How base font sizes are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSizeStrategy {
    /// Fixed physical sizes
    Absolute,
    /// Percentage of the smaller canvas side
    #[default]
    RelativeMin,
    /// Percentage of the larger canvas side
    RelativeMax,
}

/// Title block fields; empty fields are not printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBlockConfig {
    pub enabled: bool,
    pub project: String,
    pub piece: String,
    pub size: String,
    pub client: String,
    pub author: String,
    pub fabric: String,
    pub color: String,
    pub notes: String,
}

impl Default for TitleBlockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            project: "Pattern".to_string(),
            piece: String::new(),
            size: String::new(),
            client: String::new(),
            author: String::new(),
            fabric: String::new(),
            color: String::new(),
            notes: String::new(),
        }
    }
}

impl TitleBlockConfig {
    /// (label, value, bold) rows in print order
    pub fn rows(&self) -> [(&'static str, &str, bool); 8] {
        [
            ("Project", &self.project, true),
            ("Piece", &self.piece, false),
            ("Size", &self.size, false),
            ("Client", &self.client, false),
            ("Author", &self.author, false),
            ("Fabric", &self.fabric, false),
            ("Color", &self.color, false),
            ("Notes", &self.notes, false),
        ]
    }
}

/// Projection, margins and document units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub projection: ProjectionMode,
    /// Blank border around the drawing (cm)
    pub margin_cm: f64,
    /// Centimetres per scene unit of the input points
    pub scene_unit_cm: f64,
    pub document_unit: DocumentUnit,
    pub file_name: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Auto,
            margin_cm: 1.5,
            scene_unit_cm: 100.0,
            document_unit: DocumentUnit::Cm,
            file_name: "patron.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub strategy: FontSizeStrategy,
    /// Main text size as a percentage of the reference side
    pub relative_pct: f64,
    /// Dimension text size relative to the main size
    pub dim_ratio: f64,
    /// ID text size relative to the main size
    pub id_ratio: f64,
    pub unit: FontUnit,
    pub main_cm: f64,
    pub dim_cm: f64,
    pub id_cm: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            strategy: FontSizeStrategy::RelativeMin,
            relative_pct: 0.05,
            dim_ratio: 0.90,
            id_ratio: 0.80,
            unit: FontUnit::Cm,
            main_cm: 0.10,
            dim_cm: 0.09,
            id_cm: 0.08,
        }
    }
}

/// Edge length labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionConfig {
    pub enabled: bool,
    pub max_labels: usize,
    /// Shorter edges are not labelled (cm)
    pub min_edge_len_cm: f64,
    /// Label distance for edges facing the inside of the outline (cm)
    pub internal_offset_cm: f64,
    /// Label distance for edges facing outwards (cm)
    pub external_offset_cm: f64,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_labels: 18,
            min_edge_len_cm: 1.0,
            internal_offset_cm: 1.5,
            external_offset_cm: 2.5,
        }
    }
}

/// Vertex markers and index labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    pub enabled: bool,
    pub max_labels: usize,
    pub show_vertex_dots: bool,
    /// Label edges as `i-j` at their midpoints instead of labelling vertices
    pub center_on_edges: bool,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_labels: 60,
            show_vertex_dots: true,
            center_on_edges: true,
        }
    }
}

/// Distances from the left and bottom reference edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdinateConfig {
    pub enabled: bool,
    pub from_left: bool,
    pub from_bottom: bool,
    pub max_labels: usize,
}

impl Default for OrdinateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            from_left: true,
            from_bottom: true,
            max_labels: 10,
        }
    }
}

/// Complete exporter configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgExportConfig {
    pub title: TitleBlockConfig,
    pub canvas: CanvasConfig,
    pub fonts: FontConfig,
    pub dimensions: DimensionConfig,
    pub ids: IdConfig,
    pub ordinates: OrdinateConfig,
}

impl SvgExportConfig {
    /// File name with an `.svg` extension
    pub fn file_name(&self) -> String {
        let name = self.canvas.file_name.trim();
        let name = if name.is_empty() { "patron.svg" } else { name };
        if name.to_lowercase().ends_with(".svg") {
            name.to_string()
        } else {
            format!("{}.svg", name)
        }
    }

    /// Check the option ranges accepted by the exporter.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("canvas.margin_cm", self.canvas.margin_cm, 0.5, 10.0),
            ("canvas.scene_unit_cm", self.canvas.scene_unit_cm, f64::MIN_POSITIVE, f64::MAX),
            ("fonts.relative_pct", self.fonts.relative_pct, 0.01, 0.50),
            ("fonts.dim_ratio", self.fonts.dim_ratio, 0.40, 1.50),
            ("fonts.id_ratio", self.fonts.id_ratio, 0.40, 1.50),
            ("fonts.main_cm", self.fonts.main_cm, 0.04, 1.5),
            ("fonts.dim_cm", self.fonts.dim_cm, 0.04, 1.5),
            ("fonts.id_cm", self.fonts.id_cm, 0.04, 1.5),
            ("dimensions.min_edge_len_cm", self.dimensions.min_edge_len_cm, 0.0, 100.0),
            ("dimensions.internal_offset_cm", self.dimensions.internal_offset_cm, 0.3, 5.0),
            ("dimensions.external_offset_cm", self.dimensions.external_offset_cm, 0.5, 8.0),
        ];
        for (name, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(format!(
                    "{} must be between {} and {}, got {}",
                    name, min, max, value
                ));
            }
        }
        if self.ids.max_labels > 500 {
            return Err(format!(
                "ids.max_labels must be at most 500, got {}",
                self.ids.max_labels
            ));
        }
        Ok(())
    }
}
