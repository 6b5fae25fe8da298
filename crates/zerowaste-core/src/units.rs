//! Unit conversion utilities
//!
//! Pattern geometry lives in scene units (metres) while every user-facing
//! length is in centimetres. Drawings can be emitted in several document and
//! font units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scene units per centimetre
pub const CM_TO_SCENE: f64 = 0.01;

/// Centimetres per scene unit
pub const SCENE_TO_CM: f64 = 100.0;

/// CSS pixels per centimetre (96 dpi)
pub const PX_PER_CM: f64 = 37.795_275_590_6;

/// Typographic points per centimetre
pub const PT_PER_CM: f64 = 28.346_456_692_9;

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Round half up to `decimals` places.
///
/// Matches `floor(v * 10^d + 0.5) / 10^d`, not banker's rounding.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Unit of the SVG document width and height attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentUnit {
    /// Centimetres
    Cm,
    /// Millimetres
    Mm,
    /// Inches
    In,
    /// CSS pixels
    Px,
}

impl Default for DocumentUnit {
    fn default() -> Self {
        Self::Cm
    }
}

impl fmt::Display for DocumentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cm => write!(f, "cm"),
            Self::Mm => write!(f, "mm"),
            Self::In => write!(f, "in"),
            Self::Px => write!(f, "px"),
        }
    }
}

impl FromStr for DocumentUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" => Ok(Self::Cm),
            "mm" => Ok(Self::Mm),
            "in" | "inch" => Ok(Self::In),
            "px" => Ok(Self::Px),
            _ => Err(format!("Unknown document unit: {}", s)),
        }
    }
}

/// Unit used for CSS font sizes in the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontUnit {
    /// Absolute centimetres
    Cm,
    /// Absolute millimetres
    Mm,
    /// CSS pixels
    Px,
    /// Typographic points
    Pt,
    /// Percentage of the main text size
    Percent,
}

impl Default for FontUnit {
    fn default() -> Self {
        Self::Cm
    }
}

impl fmt::Display for FontUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cm => write!(f, "cm"),
            Self::Mm => write!(f, "mm"),
            Self::Px => write!(f, "px"),
            Self::Pt => write!(f, "pt"),
            Self::Percent => write!(f, "%"),
        }
    }
}

impl FromStr for FontUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" => Ok(Self::Cm),
            "mm" => Ok(Self::Mm),
            "px" => Ok(Self::Px),
            "pt" => Ok(Self::Pt),
            "%" | "percent" | "pct" => Ok(Self::Percent),
            _ => Err(format!("Unknown font unit: {}", s)),
        }
    }
}

/// Format a length for the document width/height attributes
///
/// * `value_cm` - Length in centimetres
/// * `unit` - Target document unit
pub fn format_document_length(value_cm: f64, unit: DocumentUnit) -> String {
    match unit {
        DocumentUnit::Cm => format!("{:.3}cm", value_cm),
        DocumentUnit::Mm => format!("{:.3}mm", value_cm * 10.0),
        DocumentUnit::In => format!("{:.4}in", value_cm / CM_PER_INCH),
        DocumentUnit::Px => format!("{:.1}px", value_cm * PX_PER_CM),
    }
}

/// Format a CSS font size
///
/// * `size_cm` - Font size in centimetres
/// * `main_cm` - Main text size, the reference for percentages
/// * `unit` - Target font unit
pub fn format_font_size(size_cm: f64, main_cm: f64, unit: FontUnit) -> String {
    match unit {
        FontUnit::Cm => format!("{:.4}cm", size_cm),
        FontUnit::Mm => format!("{:.4}mm", size_cm * 10.0),
        FontUnit::Px => format!("{:.3}px", size_cm * PX_PER_CM),
        FontUnit::Pt => format!("{:.3}pt", size_cm * PT_PER_CM),
        FontUnit::Percent => {
            let pct = if main_cm > 0.0 {
                size_cm / main_cm * 100.0
            } else {
                100.0
            };
            format!("{:.1}%", pct)
        }
    }
}
