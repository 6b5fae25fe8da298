//! Global scaling of the base outline to the target panel size.

use crate::base_polygon::BasePolygon;
use crate::params::GlobalParams;
use zerowaste_core::geometry::safe_div;
use zerowaste_core::{Point2, CM_TO_SCENE};

/// Horizontal and vertical factors mapping design units to scene units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalScale {
    pub sx: f64,
    pub sy: f64,
    design_unit: f64,
}

impl GlobalScale {
    /// Factors that stretch the base bounding box to the target size.
    ///
    /// With `preserve_aspect_ratio` the vertical factor follows the
    /// horizontal one and the target height is ignored.
    pub fn compute(base: &BasePolygon, global: &GlobalParams) -> Self {
        let bounds = base.bounds();
        let unit = base.design_unit();
        let sx = safe_div(
            global.target_width_cm * CM_TO_SCENE,
            bounds.width() * unit,
        );
        let sy = if global.preserve_aspect_ratio {
            sx
        } else {
            safe_div(
                global.target_height_cm * CM_TO_SCENE,
                bounds.height() * unit,
            )
        };
        Self {
            sx,
            sy,
            design_unit: unit,
        }
    }

    /// Map one base point into scene units.
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new(
            p.x * self.design_unit * self.sx,
            p.y * self.design_unit * self.sy,
        )
    }

    /// Undo the global factors on a scene-space delta.
    pub fn unscale_delta(&self, d: Point2) -> Point2 {
        Point2::new(safe_div(d.x, self.sx), safe_div(d.y, self.sy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outline_scale() {
        let base = BasePolygon::tee_v3();
        let scale = GlobalScale::compute(&base, &GlobalParams::default());
        let width = base.bounds().width() * base.design_unit() * scale.sx;
        let height = base.bounds().height() * base.design_unit() * scale.sy;
        assert!((width - 0.675).abs() < 1e-12);
        assert!((height - 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_preserve_aspect_ratio() {
        let base = BasePolygon::tee_v3();
        let global = GlobalParams {
            preserve_aspect_ratio: true,
            target_height_cm: 300.0,
            ..GlobalParams::default()
        };
        let scale = GlobalScale::compute(&base, &global);
        assert_eq!(scale.sx, scale.sy);
    }

    #[test]
    fn test_unscale_delta() {
        let base = BasePolygon::tee_v3();
        let scale = GlobalScale::compute(&base, &GlobalParams::default());
        let d = Point2::new(scale.sx * 2.0, scale.sy * 3.0);
        let back = scale.unscale_delta(d);
        assert!((back.x - 2.0).abs() < 1e-12);
        assert!((back.y - 3.0).abs() < 1e-12);
    }
}
