//! Transform parameters
//!
//! The full input record of the curve transform engine. All lengths are in
//! centimetres. Every numeric field has a declared range; the engine itself
//! never rejects an in-range combination and only clamps geometrically, so
//! range validation is left to the callers that read raw user input.

use serde::{Deserialize, Serialize};
use zerowaste_core::ParameterError;

/// A manual absolute-length override
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub enabled: bool,
    pub value_cm: f64,
}

impl ManualOverride {
    pub const fn disabled(value_cm: f64) -> Self {
        Self {
            enabled: false,
            value_cm,
        }
    }

    pub const fn enabled(value_cm: f64) -> Self {
        Self {
            enabled: true,
            value_cm,
        }
    }

    /// The value when the override is switched on
    pub fn active(&self) -> Option<f64> {
        self.enabled.then_some(self.value_cm)
    }
}

/// Overall target size of the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalParams {
    /// Target panel width (cm)
    pub target_width_cm: f64,
    /// Target panel height (cm)
    pub target_height_cm: f64,
    /// Derive the vertical scale from the horizontal one
    pub preserve_aspect_ratio: bool,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            target_width_cm: 67.5,
            target_height_cm: 80.0,
            preserve_aspect_ratio: false,
        }
    }
}

/// Manual overrides of the sleeve region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeveOverrides {
    /// Armhole point distance from the left fabric edge
    pub armhole_lateral: ManualOverride,
    /// Armhole point height above the bottom edge
    pub armhole_height: ManualOverride,
    /// Back seam point height above the bottom edge
    pub back_seam_height: ManualOverride,
    /// Armhole-to-armhole span of the assembled garment (twice the
    /// distance from the right edge)
    pub armhole_span: ManualOverride,
}

impl Default for SleeveOverrides {
    fn default() -> Self {
        Self {
            armhole_lateral: ManualOverride::disabled(20.0),
            armhole_height: ManualOverride::disabled(25.0),
            back_seam_height: ManualOverride::disabled(25.0),
            armhole_span: ManualOverride::disabled(40.0),
        }
    }
}

/// Sleeve cutout (region A) parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeveParams {
    /// Use half the target width as the horizontal depth
    pub auto_half_width_depth: bool,
    /// Horizontal depth when not automatic (cm)
    pub depth_cm: f64,
    /// Use `scale_x` instead of the depth
    pub use_scale_x: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Keep the horizontal excursion within half the target width
    pub clamp_x_to_half_width: bool,
    /// Free vertical offset when no height override is active (cm)
    pub vertical_offset_cm: f64,
    /// Resample the region at equal arc-length spacing
    pub equidistant: bool,
    /// Move both heights together instead of scaling between them
    pub lock_lengths: bool,
    pub overrides: SleeveOverrides,
}

impl Default for SleeveParams {
    fn default() -> Self {
        Self {
            auto_half_width_depth: true,
            depth_cm: 30.0,
            use_scale_x: false,
            scale_x: 1.0,
            scale_y: 1.0,
            clamp_x_to_half_width: true,
            vertical_offset_cm: 0.0,
            equidistant: false,
            lock_lengths: false,
            overrides: SleeveOverrides::default(),
        }
    }
}

/// Manual overrides of the neckline region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeckOverrides {
    /// Neck base distance from the right fabric edge
    pub base_half_width: ManualOverride,
    /// Full neck base width of the assembled garment
    pub base_total_width: ManualOverride,
    /// Neck base height above the bottom edge
    pub base_height: ManualOverride,
    /// Neck start height above the bottom edge
    pub start_height: ManualOverride,
}

impl Default for NeckOverrides {
    fn default() -> Self {
        Self {
            base_half_width: ManualOverride::disabled(8.0),
            base_total_width: ManualOverride::disabled(16.0),
            base_height: ManualOverride::disabled(20.0),
            start_height: ManualOverride::disabled(20.0),
        }
    }
}

/// Neckline (region B) parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeckParams {
    /// Inherit the global scale; otherwise keep the base proportions
    pub follows_global_scale: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Horizontal depth of the neckline; zero keeps the scaled depth (cm)
    pub depth_cm: f64,
    /// Keep the neckline clear of the top margin
    pub limit_height: bool,
    /// Free vertical offset when no height override is active (cm)
    pub vertical_offset_cm: f64,
    pub equidistant: bool,
    pub lock_lengths: bool,
    pub overrides: NeckOverrides,
}

impl Default for NeckParams {
    fn default() -> Self {
        Self {
            follows_global_scale: true,
            scale_x: 1.0,
            scale_y: 1.0,
            depth_cm: 0.0,
            limit_height: true,
            vertical_offset_cm: 0.0,
            equidistant: false,
            lock_lengths: false,
            overrides: NeckOverrides::default(),
        }
    }
}

/// Object placement and view orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub position_x_cm: f64,
    pub position_y_cm: f64,
    pub position_z_cm: f64,
    /// Embed in the XZ plane instead of XY
    pub frontal_view: bool,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position_x_cm: 0.0,
            position_y_cm: 0.0,
            position_z_cm: 0.0,
            frontal_view: true,
        }
    }
}

/// Complete transform input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TransformParameters {
    pub global: GlobalParams,
    pub sleeve: SleeveParams,
    pub neck: NeckParams,
    pub placement: Placement,
}

/// Declared range of one numeric parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }

    pub fn check(&self, value: f64) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NotFinite {
                name: self.name.to_string(),
            });
        }
        if value < self.min || value > self.max {
            return Err(ParameterError::OutOfRange {
                name: self.name.to_string(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

const UNBOUNDED: f64 = f64::MAX;

impl TransformParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every numeric field with its name and declared range.
    fn numeric_fields_mut(&mut self) -> [(ParameterRange, &mut f64); 21] {
        let s = &mut self.sleeve;
        let so = &mut s.overrides;
        let n = &mut self.neck;
        let no = &mut n.overrides;
        let p = &mut self.placement;
        [
            (ParameterRange::new("target_width_cm", 10.0, 400.0), &mut self.global.target_width_cm),
            (ParameterRange::new("target_height_cm", 10.0, 400.0), &mut self.global.target_height_cm),
            (ParameterRange::new("sleeve.depth_cm", 0.1, 400.0), &mut s.depth_cm),
            (ParameterRange::new("sleeve.scale_x", 0.1, 5.0), &mut s.scale_x),
            (ParameterRange::new("sleeve.scale_y", 0.1, 5.0), &mut s.scale_y),
            (ParameterRange::new("sleeve.vertical_offset_cm", -20.0, 20.0), &mut s.vertical_offset_cm),
            (ParameterRange::new("sleeve.armhole_lateral", 0.0, 1000.0), &mut so.armhole_lateral.value_cm),
            (ParameterRange::new("sleeve.armhole_height", 0.0, 1000.0), &mut so.armhole_height.value_cm),
            (ParameterRange::new("sleeve.back_seam_height", 0.0, 1000.0), &mut so.back_seam_height.value_cm),
            (ParameterRange::new("sleeve.armhole_span", 0.0, 4000.0), &mut so.armhole_span.value_cm),
            (ParameterRange::new("neck.scale_x", 0.1, 5.0), &mut n.scale_x),
            (ParameterRange::new("neck.scale_y", 0.1, 5.0), &mut n.scale_y),
            (ParameterRange::new("neck.depth_cm", 0.0, 200.0), &mut n.depth_cm),
            (ParameterRange::new("neck.vertical_offset_cm", -15.0, 15.0), &mut n.vertical_offset_cm),
            (ParameterRange::new("neck.base_half_width", 0.0, 1000.0), &mut no.base_half_width.value_cm),
            (ParameterRange::new("neck.base_total_width", 0.0, 2000.0), &mut no.base_total_width.value_cm),
            (ParameterRange::new("neck.base_height", 0.0, 2000.0), &mut no.base_height.value_cm),
            (ParameterRange::new("neck.start_height", 0.0, 2000.0), &mut no.start_height.value_cm),
            (ParameterRange::new("placement.position_x_cm", -UNBOUNDED, UNBOUNDED), &mut p.position_x_cm),
            (ParameterRange::new("placement.position_y_cm", -UNBOUNDED, UNBOUNDED), &mut p.position_y_cm),
            (ParameterRange::new("placement.position_z_cm", -UNBOUNDED, UNBOUNDED), &mut p.position_z_cm),
        ]
    }

    fn numeric_fields(&self) -> Vec<(ParameterRange, f64)> {
        let mut copy = self.clone();
        copy.numeric_fields_mut()
            .into_iter()
            .map(|(range, value)| (range, *value))
            .collect()
    }

    /// Reject NaN and infinite values; the only input the engine refuses.
    pub fn check_finite(&self) -> Result<(), ParameterError> {
        for (range, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite {
                    name: range.name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check every field against its declared range.
    pub fn validate_ranges(&self) -> Result<(), ParameterError> {
        for (range, value) in self.numeric_fields() {
            range.check(value)?;
        }
        Ok(())
    }

    /// Clamp every finite field into its declared range.
    pub fn clamp_to_ranges(&mut self) {
        for (range, value) in self.numeric_fields_mut() {
            if value.is_finite() {
                *value = range.clamp(*value);
            }
        }
    }
}
