//! Sleeve cutout (region A) solver.

use super::rules::{sleeve_width_target, FabricFrame, HeightPair, HeightRule, PairPoint, WidthRule};
use super::{MARGIN, MIN_GAP, SLEEVE_FREE_OFFSET_LIMIT};
use crate::base_polygon::BasePolygon;
use crate::params::SleeveParams;
use zerowaste_core::geometry::safe_div;
use zerowaste_core::{Point2, CM_TO_SCENE, EPSILON};

/// Resolved mapping of the sleeve region
///
/// A point maps as `x' = cx + (x - cx) * factor_x` and
/// `y' = cy + stretch * (cy + (y - cy) * factor_y - cy) + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleeveSolution {
    pub pivot: Point2,
    pub factor_x: f64,
    pub factor_y: f64,
    pub stretch: f64,
    pub offset: f64,
    pub width_rule: Option<WidthRule>,
}

impl SleeveSolution {
    /// Height after the vertical factor, before stretch and offset
    fn scaled_y(&self, y: f64) -> f64 {
        self.pivot.y + (y - self.pivot.y) * self.factor_y
    }

    /// Height after the stretch, before the offset
    fn stretched_y(&self, y_scaled: f64) -> f64 {
        self.pivot.y + self.stretch * (y_scaled - self.pivot.y)
    }

    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new(
            self.pivot.x + (p.x - self.pivot.x) * self.factor_x,
            self.stretched_y(self.scaled_y(p.y)) + self.offset,
        )
    }
}

/// Solve the sleeve mapping on the globally scaled working copy.
pub fn solve(
    base: &BasePolygon,
    work: &[Point2],
    params: &SleeveParams,
    frame: &FabricFrame,
) -> SleeveSolution {
    let control = base.control();
    let pivot = work[control.sleeve_start];
    let armhole = work[control.armhole];
    let back_seam = work[control.back_seam];
    let region = &work[base.sleeve().indices()];

    let max_x_off = nonzero_extent(region.iter().map(|p| (p.x - pivot.x).abs()));
    let max_y_off = nonzero_extent(region.iter().map(|p| (p.y - pivot.y).abs()));
    let half_width = frame.half_width();
    let half_width_cap = half_width / max_x_off;

    let mut factor_x = if params.use_scale_x {
        if params.clamp_x_to_half_width {
            params.scale_x.min(half_width_cap)
        } else {
            params.scale_x
        }
    } else {
        let half_width_cm = half_width / CM_TO_SCENE;
        let depth_cm = if params.auto_half_width_depth {
            half_width_cm
        } else {
            params.depth_cm.min(half_width_cm)
        };
        depth_cm * CM_TO_SCENE / max_x_off
    };
    let factor_y = params.scale_y.min(half_width / max_y_off);

    let width_target = sleeve_width_target(&params.overrides, frame);
    match width_target {
        Some(target) => {
            factor_x = safe_div(target.x - pivot.x, armhole.x - pivot.x);
            let full_width_cap = frame.width / max_x_off;
            if factor_x > full_width_cap || factor_x < 0.0 {
                tracing::debug!(
                    "sleeve width override {:?} clamped from factor {:.4}",
                    target.rule,
                    factor_x
                );
            }
            factor_x = factor_x.min(full_width_cap).max(0.0);
        }
        None if params.clamp_x_to_half_width => {
            factor_x = factor_x.min(half_width_cap);
        }
        None => {}
    }

    let mut solution = SleeveSolution {
        pivot,
        factor_x,
        factor_y,
        stretch: 1.0,
        offset: 0.0,
        width_rule: width_target.map(|t| t.rule),
    };

    let y_armhole = solution.scaled_y(armhole.y);
    let y_back = solution.scaled_y(back_seam.y);
    let rule = HeightPair::sleeve(&params.overrides, params.lock_lengths).rule();

    solution.stretch = match rule {
        HeightRule::Paired {
            scaled_cm,
            anchor_cm,
        } => {
            let denom = y_armhole - y_back;
            if denom.abs() > EPSILON {
                (scaled_cm - anchor_cm) * CM_TO_SCENE / denom
            } else {
                1.0
            }
        }
        _ => 1.0,
    };

    let free_offset = (params.vertical_offset_cm * CM_TO_SCENE)
        .clamp(-SLEEVE_FREE_OFFSET_LIMIT, SLEEVE_FREE_OFFSET_LIMIT);
    let solve_offset = |s: &SleeveSolution| -> f64 {
        match rule {
            HeightRule::Paired { anchor_cm, .. } => {
                frame.bottom + anchor_cm * CM_TO_SCENE - s.stretched_y(y_back)
            }
            HeightRule::Single {
                point: PairPoint::Scaled,
                height_cm,
            } => frame.bottom + height_cm * CM_TO_SCENE - s.stretched_y(y_armhole),
            HeightRule::Single {
                point: PairPoint::Anchor,
                height_cm,
            } => frame.bottom + height_cm * CM_TO_SCENE - s.stretched_y(y_back),
            HeightRule::Free => free_offset,
        }
    };
    solution.offset = solve_offset(&solution);

    // minimum gap between armhole and back seam, before the margin clamp
    let min_stretch = MIN_GAP / (y_armhole - y_back).abs().max(EPSILON);
    if solution.stretch < min_stretch {
        tracing::debug!(
            "sleeve stretch {:.4} raised to {:.4} to keep the minimum gap",
            solution.stretch,
            min_stretch
        );
        solution.stretch = min_stretch;
        solution.offset = solve_offset(&solution);
    }

    let y_start = solution.scaled_y(pivot.y);
    let offset_max = [y_start, y_armhole, y_back]
        .iter()
        .map(|&y| frame.top - MARGIN - solution.stretched_y(y))
        .fold(f64::INFINITY, f64::min);
    let offset_min = [y_armhole, y_back]
        .iter()
        .map(|&y| frame.bottom + MARGIN - solution.stretched_y(y))
        .fold(f64::NEG_INFINITY, f64::max);

    let clamped = if offset_min > offset_max {
        solution.offset.min(offset_max)
    } else {
        solution.offset.clamp(offset_min, offset_max)
    };
    if clamped != solution.offset {
        tracing::debug!(
            "sleeve offset {:.4} clamped to {:.4} by the fabric margin",
            solution.offset,
            clamped
        );
    }
    solution.offset = clamped;

    solution
}

fn nonzero_extent(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        EPSILON
    }
}
