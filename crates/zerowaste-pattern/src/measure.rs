//! Measurement probes
//!
//! Distances of a vertex from the fabric edges, in centimetres. The bottom
//! edge is the live minimum of the outline's height coordinate; the right
//! edge is the anchor (x = 0) and the left edge sits one panel width to its
//! left.

use crate::base_polygon::BasePolygon;
use crate::polygon::TransformedPolygon;
use serde::{Deserialize, Serialize};
use zerowaste_core::units::round_half_up;
use zerowaste_core::{GeometryError, SCENE_TO_CM};

/// Fabric edge a lateral distance is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LateralEdge {
    Left,
    Right,
}

/// Rounded distances of one vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub lateral_cm: f64,
    pub from_bottom_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementProbe {
    decimals: u32,
}

impl MeasurementProbe {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn measure(
        &self,
        polygon: &TransformedPolygon,
        index: usize,
        edge: LateralEdge,
    ) -> Result<Measurement, GeometryError> {
        let view = polygon.view();
        let point = polygon.point(index)?;
        let bottom = polygon
            .points()
            .iter()
            .map(|p| view.vertical(p))
            .fold(f64::INFINITY, f64::min);

        let from_bottom = ((view.vertical(&point) - bottom) * SCENE_TO_CM).max(0.0);
        let lateral = match edge {
            LateralEdge::Right => (0.0 - point.x) * SCENE_TO_CM,
            LateralEdge::Left => (point.x + polygon.fabric_width()) * SCENE_TO_CM,
        }
        .max(0.0);

        Ok(Measurement {
            lateral_cm: round_half_up(lateral, self.decimals),
            from_bottom_cm: round_half_up(from_bottom, self.decimals),
        })
    }
}

impl Default for MeasurementProbe {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Live readouts of the named control points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyMeasurements {
    pub armhole_from_left_cm: f64,
    pub armhole_height_cm: f64,
    pub back_seam_height_cm: f64,
    /// Armhole-to-armhole span of the assembled garment
    pub armhole_span_cm: f64,
    pub neck_base_from_right_cm: f64,
    pub neck_base_total_cm: f64,
    pub neck_base_height_cm: f64,
    pub neck_start_height_cm: f64,
}

impl KeyMeasurements {
    pub fn read(
        polygon: &TransformedPolygon,
        base: &BasePolygon,
        probe: &MeasurementProbe,
    ) -> Result<Self, GeometryError> {
        let control = base.control();
        let armhole_left = probe.measure(polygon, control.armhole, LateralEdge::Left)?;
        let armhole_right = probe.measure(polygon, control.armhole, LateralEdge::Right)?;
        let back_seam = probe.measure(polygon, control.back_seam, LateralEdge::Left)?;
        let neck_base = probe.measure(polygon, control.neck_base, LateralEdge::Right)?;
        let neck_start = probe.measure(polygon, control.neck_start, LateralEdge::Right)?;

        Ok(Self {
            armhole_from_left_cm: armhole_left.lateral_cm,
            armhole_height_cm: armhole_left.from_bottom_cm,
            back_seam_height_cm: back_seam.from_bottom_cm,
            armhole_span_cm: armhole_right.lateral_cm * 2.0,
            neck_base_from_right_cm: neck_base.lateral_cm,
            neck_base_total_cm: neck_base.lateral_cm * 2.0,
            neck_base_height_cm: neck_base.from_bottom_cm,
            neck_start_height_cm: neck_start.from_bottom_cm,
        })
    }
}
