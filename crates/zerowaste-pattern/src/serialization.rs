//! Parameter persistence
//!
//! Saved measurements are a flat JSON object. The key names are kept
//! compatible with files written by earlier releases of the pattern tool,
//! so the schema is spelled out field by field instead of serializing the
//! nested [`TransformParameters`] directly.
//!
//! Loading overlays the known keys of a document onto the current
//! parameters: unknown keys are ignored and missing keys keep their value.

use crate::params::{ManualOverride, TransformParameters};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use zerowaste_core::{Error, Result};

/// Flat parameter document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDocument {
    #[serde(rename = "pattern_width")]
    pub target_width_cm: f64,
    #[serde(rename = "pattern_height")]
    pub target_height_cm: f64,
    #[serde(rename = "mantener_proporcion")]
    pub preserve_aspect_ratio: bool,

    #[serde(rename = "usar_mitad_auto")]
    pub sleeve_auto_half_width_depth: bool,
    #[serde(rename = "curve_upper_depth_cm")]
    pub sleeve_depth_cm: f64,
    #[serde(rename = "manga_usar_escala_x")]
    pub sleeve_use_scale_x: bool,
    #[serde(rename = "manga_limitar_x_a_mitad")]
    pub sleeve_clamp_x_to_half_width: bool,
    #[serde(rename = "curve_upper_scale_x")]
    pub sleeve_scale_x: f64,
    #[serde(rename = "curve_upper_scale_y")]
    pub sleeve_scale_y: f64,
    #[serde(rename = "curve_upper_position_y")]
    pub sleeve_vertical_offset_cm: f64,
    #[serde(rename = "manga_equidistante")]
    pub sleeve_equidistant: bool,
    #[serde(rename = "lock_manga_lengths")]
    pub sleeve_lock_lengths: bool,

    #[serde(rename = "cuello_seguir_patron")]
    pub neck_follows_global_scale: bool,
    #[serde(rename = "cuello_scale_x")]
    pub neck_scale_x: f64,
    #[serde(rename = "cuello_scale_y")]
    pub neck_scale_y: f64,
    #[serde(rename = "cuello_profundidad_cm")]
    pub neck_depth_cm: f64,
    #[serde(rename = "curve_internal_position_y")]
    pub neck_vertical_offset_cm: f64,
    #[serde(rename = "cuello_equidistante")]
    pub neck_equidistant: bool,
    #[serde(rename = "cuello_limitar_altura")]
    pub neck_limit_height: bool,
    #[serde(rename = "lock_neck_lengths")]
    pub neck_lock_lengths: bool,

    #[serde(rename = "pattern_position_x")]
    pub position_x_cm: f64,
    #[serde(rename = "pattern_position_y")]
    pub position_y_cm: f64,
    #[serde(rename = "pattern_position_z")]
    pub position_z_cm: f64,
    #[serde(rename = "vista_frontal_xz")]
    pub frontal_view: bool,

    #[serde(rename = "man_enable_v8_left")]
    pub armhole_lateral_enabled: bool,
    #[serde(rename = "man_v8_left_cm")]
    pub armhole_lateral_cm: f64,
    #[serde(rename = "man_enable_v8_bottom")]
    pub armhole_height_enabled: bool,
    #[serde(rename = "man_v8_bottom_cm")]
    pub armhole_height_cm: f64,
    #[serde(rename = "man_enable_v14_bottom")]
    pub back_seam_height_enabled: bool,
    #[serde(rename = "man_v14_bottom_cm")]
    pub back_seam_height_cm: f64,
    #[serde(rename = "man_enable_sisa_sisa")]
    pub armhole_span_enabled: bool,
    #[serde(rename = "man_sisa_sisa_cm")]
    pub armhole_span_cm: f64,

    #[serde(rename = "man_enable_base")]
    pub neck_base_half_enabled: bool,
    #[serde(rename = "man_base_cm")]
    pub neck_base_half_cm: f64,
    #[serde(rename = "man_enable_base_total")]
    pub neck_base_total_enabled: bool,
    #[serde(rename = "man_base_total_cm")]
    pub neck_base_total_cm: f64,
    #[serde(rename = "man_enable_len_base")]
    pub neck_base_height_enabled: bool,
    #[serde(rename = "man_len_base_cm")]
    pub neck_base_height_cm: f64,
    #[serde(rename = "man_enable_len_17")]
    pub neck_start_height_enabled: bool,
    #[serde(rename = "man_len_17_cm")]
    pub neck_start_height_cm: f64,
}

impl From<&TransformParameters> for ParameterDocument {
    fn from(p: &TransformParameters) -> Self {
        let so = &p.sleeve.overrides;
        let no = &p.neck.overrides;
        Self {
            target_width_cm: p.global.target_width_cm,
            target_height_cm: p.global.target_height_cm,
            preserve_aspect_ratio: p.global.preserve_aspect_ratio,
            sleeve_auto_half_width_depth: p.sleeve.auto_half_width_depth,
            sleeve_depth_cm: p.sleeve.depth_cm,
            sleeve_use_scale_x: p.sleeve.use_scale_x,
            sleeve_clamp_x_to_half_width: p.sleeve.clamp_x_to_half_width,
            sleeve_scale_x: p.sleeve.scale_x,
            sleeve_scale_y: p.sleeve.scale_y,
            sleeve_vertical_offset_cm: p.sleeve.vertical_offset_cm,
            sleeve_equidistant: p.sleeve.equidistant,
            sleeve_lock_lengths: p.sleeve.lock_lengths,
            neck_follows_global_scale: p.neck.follows_global_scale,
            neck_scale_x: p.neck.scale_x,
            neck_scale_y: p.neck.scale_y,
            neck_depth_cm: p.neck.depth_cm,
            neck_vertical_offset_cm: p.neck.vertical_offset_cm,
            neck_equidistant: p.neck.equidistant,
            neck_limit_height: p.neck.limit_height,
            neck_lock_lengths: p.neck.lock_lengths,
            position_x_cm: p.placement.position_x_cm,
            position_y_cm: p.placement.position_y_cm,
            position_z_cm: p.placement.position_z_cm,
            frontal_view: p.placement.frontal_view,
            armhole_lateral_enabled: so.armhole_lateral.enabled,
            armhole_lateral_cm: so.armhole_lateral.value_cm,
            armhole_height_enabled: so.armhole_height.enabled,
            armhole_height_cm: so.armhole_height.value_cm,
            back_seam_height_enabled: so.back_seam_height.enabled,
            back_seam_height_cm: so.back_seam_height.value_cm,
            armhole_span_enabled: so.armhole_span.enabled,
            armhole_span_cm: so.armhole_span.value_cm,
            neck_base_half_enabled: no.base_half_width.enabled,
            neck_base_half_cm: no.base_half_width.value_cm,
            neck_base_total_enabled: no.base_total_width.enabled,
            neck_base_total_cm: no.base_total_width.value_cm,
            neck_base_height_enabled: no.base_height.enabled,
            neck_base_height_cm: no.base_height.value_cm,
            neck_start_height_enabled: no.start_height.enabled,
            neck_start_height_cm: no.start_height.value_cm,
        }
    }
}

impl From<ParameterDocument> for TransformParameters {
    fn from(d: ParameterDocument) -> Self {
        let mut p = TransformParameters::default();
        p.global.target_width_cm = d.target_width_cm;
        p.global.target_height_cm = d.target_height_cm;
        p.global.preserve_aspect_ratio = d.preserve_aspect_ratio;

        p.sleeve.auto_half_width_depth = d.sleeve_auto_half_width_depth;
        p.sleeve.depth_cm = d.sleeve_depth_cm;
        p.sleeve.use_scale_x = d.sleeve_use_scale_x;
        p.sleeve.clamp_x_to_half_width = d.sleeve_clamp_x_to_half_width;
        p.sleeve.scale_x = d.sleeve_scale_x;
        p.sleeve.scale_y = d.sleeve_scale_y;
        p.sleeve.vertical_offset_cm = d.sleeve_vertical_offset_cm;
        p.sleeve.equidistant = d.sleeve_equidistant;
        p.sleeve.lock_lengths = d.sleeve_lock_lengths;

        p.neck.follows_global_scale = d.neck_follows_global_scale;
        p.neck.scale_x = d.neck_scale_x;
        p.neck.scale_y = d.neck_scale_y;
        p.neck.depth_cm = d.neck_depth_cm;
        p.neck.vertical_offset_cm = d.neck_vertical_offset_cm;
        p.neck.equidistant = d.neck_equidistant;
        p.neck.limit_height = d.neck_limit_height;
        p.neck.lock_lengths = d.neck_lock_lengths;

        p.placement.position_x_cm = d.position_x_cm;
        p.placement.position_y_cm = d.position_y_cm;
        p.placement.position_z_cm = d.position_z_cm;
        p.placement.frontal_view = d.frontal_view;

        let so = &mut p.sleeve.overrides;
        so.armhole_lateral = toggle(d.armhole_lateral_enabled, d.armhole_lateral_cm);
        so.armhole_height = toggle(d.armhole_height_enabled, d.armhole_height_cm);
        so.back_seam_height = toggle(d.back_seam_height_enabled, d.back_seam_height_cm);
        so.armhole_span = toggle(d.armhole_span_enabled, d.armhole_span_cm);

        let no = &mut p.neck.overrides;
        no.base_half_width = toggle(d.neck_base_half_enabled, d.neck_base_half_cm);
        no.base_total_width = toggle(d.neck_base_total_enabled, d.neck_base_total_cm);
        no.base_height = toggle(d.neck_base_height_enabled, d.neck_base_height_cm);
        no.start_height = toggle(d.neck_start_height_enabled, d.neck_start_height_cm);
        p
    }
}

fn toggle(enabled: bool, value_cm: f64) -> ManualOverride {
    ManualOverride { enabled, value_cm }
}

impl ParameterDocument {
    /// Overlay the known keys of `incoming` onto `current`.
    ///
    /// Returns the merged parameters and the number of keys applied. Fails
    /// without partial effect when a known key has the wrong type.
    pub fn merge(
        current: &TransformParameters,
        incoming: &Map<String, Value>,
    ) -> Result<(TransformParameters, usize)> {
        let mut merged = match serde_json::to_value(ParameterDocument::from(current))? {
            Value::Object(map) => map,
            _ => return Err(Error::other("Parameter document is not a JSON object")),
        };

        let mut applied = 0;
        for (key, value) in incoming {
            if let Some(slot) = merged.get_mut(key) {
                *slot = value.clone();
                applied += 1;
            } else {
                tracing::debug!("ignoring unknown parameter key '{}'", key);
            }
        }

        let document: ParameterDocument = serde_json::from_value(Value::Object(merged))?;
        Ok((document.into(), applied))
    }

    /// Save parameters to a JSON file, replacing it atomically.
    pub fn save_to_file(params: &TransformParameters, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&ParameterDocument::from(params))?;
        write_atomic(path, json.as_bytes())?;
        tracing::info!("saved parameters to {}", path.display());
        Ok(())
    }

    /// Read a JSON object of parameter keys.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::other(format!(
                "Parameter file {} must contain a JSON object",
                path.as_ref().display()
            ))),
        }
    }

    /// Load parameters from a file, overlaying them onto `current`.
    pub fn load_from_file(
        current: &TransformParameters,
        path: impl AsRef<Path>,
    ) -> Result<(TransformParameters, usize)> {
        let incoming = Self::read_file(path)?;
        Self::merge(current, &incoming)
    }
}

/// Write through a temporary file in the destination directory, then rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let mut params = TransformParameters::default();
        params.global.target_width_cm = 70.0;
        params.sleeve.overrides.armhole_span = ManualOverride::enabled(42.0);
        params.neck.limit_height = false;

        let doc = ParameterDocument::from(&params);
        let back: TransformParameters = doc.into();
        assert_eq!(back, params);
    }

    #[test]
    fn test_keys_are_flat() {
        let value = serde_json::to_value(ParameterDocument::from(&TransformParameters::default()))
            .unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 40);
        assert_eq!(map["pattern_width"], json!(67.5));
        assert_eq!(map["man_enable_sisa_sisa"], json!(false));
        assert_eq!(map["vista_frontal_xz"], json!(true));
    }

    #[test]
    fn test_merge_ignores_unknown_and_keeps_missing() {
        let current = TransformParameters::default();
        let incoming = json!({
            "pattern_width": 72.0,
            "man_enable_sisa_sisa": true,
            "man_sisa_sisa_cm": 40.0,
            "auto_update": false,
            "something_else": [1, 2, 3]
        });
        let (merged, applied) =
            ParameterDocument::merge(&current, incoming.as_object().unwrap()).unwrap();
        assert_eq!(applied, 3);
        assert_eq!(merged.global.target_width_cm, 72.0);
        assert_eq!(merged.global.target_height_cm, 80.0);
        assert_eq!(
            merged.sleeve.overrides.armhole_span,
            ManualOverride::enabled(40.0)
        );
    }

    #[test]
    fn test_merge_rejects_wrong_type() {
        let current = TransformParameters::default();
        let incoming = json!({ "pattern_width": "wide" });
        assert!(ParameterDocument::merge(&current, incoming.as_object().unwrap()).is_err());
    }
}
