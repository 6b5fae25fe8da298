//! Parametric curve transform engine
//!
//! Deforms a [`BasePolygon`] under a [`TransformParameters`] record:
//!
//! 1. Global scale to the target width and height
//! 2. Optional equidistant resampling of each curve region
//! 3. Sleeve solve: horizontal factor, width overrides, vertical stretch
//!    and offset, minimum gap, margin clamp
//! 4. Neckline solve: multipliers, width overrides, armhole frontier,
//!    vertical placement, final containment
//! 5. Anchor at the bottom-right corner and embed in the view plane
//!
//! The engine is a pure function of its inputs. Conflicting constraints are
//! resolved by clamping, never by failing; only non-finite parameters are
//! rejected.

pub mod global;
pub mod neckline;
pub mod rules;
pub mod sleeve;

pub use global::GlobalScale;
pub use neckline::NeckScale;
pub use rules::{FabricFrame, HeightPair, HeightRule, PairPoint, WidthRule, WidthTarget};
pub use sleeve::SleeveSolution;

use crate::base_polygon::BasePolygon;
use crate::params::TransformParameters;
use crate::polygon::{TransformedPolygon, ViewPlane};
use zerowaste_core::geometry::resample_equidistant;
use zerowaste_core::{Point2, Point3, Result, CM_TO_SCENE};

/// Clearance kept between curves and the fabric edges (2 cm)
pub const MARGIN: f64 = 0.02;

/// Smallest vertical distance between armhole and back seam (0.5 cm)
pub const MIN_GAP: f64 = 0.005;

/// Horizontal clearance between the neck base and the armhole (2 cm)
pub const NECK_CLEARANCE: f64 = 0.02;

/// Limit of the free sleeve offset (20 cm)
pub const SLEEVE_FREE_OFFSET_LIMIT: f64 = 0.20;

/// Limit of the free neckline offset (15 cm)
pub const NECK_FREE_OFFSET_LIMIT: f64 = 0.15;

/// Curve transform engine bound to one base polygon
#[derive(Debug, Clone)]
pub struct TransformEngine {
    base: BasePolygon,
}

impl TransformEngine {
    pub fn new(base: BasePolygon) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &BasePolygon {
        &self.base
    }

    pub fn global_scale(&self, params: &TransformParameters) -> GlobalScale {
        GlobalScale::compute(&self.base, &params.global)
    }

    /// Globally scaled and optionally resampled points, before any region
    /// solve.
    pub fn working_copy(&self, params: &TransformParameters) -> Vec<Point2> {
        let scale = self.global_scale(params);
        let mut work: Vec<Point2> = self.base.points().iter().map(|&p| scale.apply(p)).collect();

        let regions = [
            (self.base.sleeve(), params.sleeve.equidistant),
            (self.base.neckline(), params.neck.equidistant),
        ];
        for (region, equidistant) in regions {
            if equidistant {
                let resampled = resample_equidistant(&work[region.indices()]);
                work[region.indices()].copy_from_slice(&resampled);
            }
        }
        work
    }

    /// Fabric edges of a working copy
    pub fn fabric_frame(&self, work: &[Point2], params: &TransformParameters) -> FabricFrame {
        let control = self.base.control();
        FabricFrame {
            right_x: work[control.anchor].x,
            width: params.global.target_width_cm * CM_TO_SCENE,
            top: work[control.top_left].y.max(work[control.top_right].y),
            bottom: work[control.bottom_left].y.min(work[control.anchor].y),
        }
    }

    /// Run the full transform.
    pub fn transform(&self, params: &TransformParameters) -> Result<TransformedPolygon> {
        params.check_finite()?;

        let scale = self.global_scale(params);
        let work = self.working_copy(params);
        let frame = self.fabric_frame(&work, params);

        let sleeve = sleeve::solve(&self.base, &work, &params.sleeve, &frame);
        let neck = NeckScale::solve(&self.base, &work, &params.neck, &frame, &scale, &sleeve);

        let mut out = work.clone();
        for i in self.base.sleeve().indices() {
            out[i] = sleeve.apply(work[i]);
        }
        neck.apply(&self.base, &mut out);
        neckline::place_vertically(&self.base, &mut out, &params.neck, neck.pivot.y);
        neckline::contain(&self.base, &mut out);

        tracing::debug!(
            "transformed '{}': sleeve factors ({:.4}, {:.4}), neck multipliers ({:.4}, {:.4})",
            self.base.name(),
            sleeve.factor_x,
            sleeve.factor_y,
            neck.mult_x,
            neck.mult_y
        );

        let placement = &params.placement;
        let view = if placement.frontal_view {
            ViewPlane::Frontal
        } else {
            ViewPlane::Top
        };
        let location = Point3::new(
            placement.position_x_cm * CM_TO_SCENE,
            placement.position_y_cm * CM_TO_SCENE,
            placement.position_z_cm * CM_TO_SCENE,
        );

        Ok(TransformedPolygon::anchored(
            &out,
            self.base.control().anchor,
            view,
            frame.width,
            location,
        ))
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(BasePolygon::default())
    }
}
