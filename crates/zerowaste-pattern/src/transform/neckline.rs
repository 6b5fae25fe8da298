//! Neckline (region B) solver.
//!
//! The neckline is solved after the sleeve because its horizontal extent is
//! limited by where the armhole ended up. Vertical placement happens on the
//! assembled outline so the margin checks see the final sleeve.

use super::global::GlobalScale;
use super::rules::{neck_width_target, FabricFrame, HeightPair, HeightRule, PairPoint};
use super::sleeve::SleeveSolution;
use super::{MARGIN, NECK_CLEARANCE, NECK_FREE_OFFSET_LIMIT};
use crate::base_polygon::BasePolygon;
use crate::params::NeckParams;
use zerowaste_core::geometry::safe_div;
use zerowaste_core::{Point2, CM_TO_SCENE, EPSILON};

/// Horizontal and vertical multipliers of the neckline around its pivot
#[derive(Debug, Clone, PartialEq)]
pub struct NeckScale {
    pub pivot: Point2,
    pub mult_x: f64,
    pub mult_y: f64,
    deltas: Vec<Point2>,
}

impl NeckScale {
    pub fn solve(
        base: &BasePolygon,
        work: &[Point2],
        params: &NeckParams,
        frame: &FabricFrame,
        scale: &GlobalScale,
        sleeve: &SleeveSolution,
    ) -> Self {
        let control = base.control();
        let region = base.neckline();
        let pivot = work[control.neck_start];

        let delta_of = |p: Point2| {
            let d = p - pivot;
            if params.follows_global_scale {
                d
            } else {
                scale.unscale_delta(d)
            }
        };
        let deltas: Vec<Point2> = region.indices().map(|i| delta_of(work[i])).collect();
        let local = |index: usize| deltas[index - region.start];

        let max_x_off = deltas.iter().map(|d| d.x.abs()).fold(0.0, f64::max);
        let max_x_off = if max_x_off > 0.0 { max_x_off } else { EPSILON };
        let half_width_cap = frame.half_width() / max_x_off;

        let depth_cm = params.depth_cm.min(frame.half_width() / CM_TO_SCENE);
        let depth_mult = if depth_cm > 0.0 {
            depth_cm * CM_TO_SCENE / max_x_off
        } else {
            1.0
        };
        let mut mult_x = (params.scale_x * depth_mult).min(half_width_cap);

        let mut mult_y = params.scale_y;
        if params.limit_height {
            let (low, high) = y_span(work.iter().map(|p| p.y));
            let allowed_gap = (high - MARGIN) - (low + MARGIN);
            let (d_low, d_high) = y_span(deltas.iter().map(|d| d.y));
            let neck_height = (d_high - d_low).max(EPSILON);
            mult_y = mult_y.min((allowed_gap / neck_height).max(0.0));
        }

        let dx_base = local(control.neck_base).x;
        if let Some(target) = neck_width_target(&params.overrides, frame) {
            mult_x = safe_div(target.x - pivot.x, dx_base);
            tracing::debug!(
                "neck width override {:?} gives multiplier {:.4}",
                target.rule,
                mult_x
            );
        }
        mult_x = mult_x.min(half_width_cap);

        // keep the neck base clear of the armhole when the neck starts lower
        let armhole = work[control.armhole];
        let armhole_placed = sleeve.apply(armhole);
        let start_y = pivot.y + local(control.neck_start).y * mult_y;
        if start_y < armhole_placed.y && dx_base.abs() > EPSILON {
            let frontier = (armhole_placed.x + NECK_CLEARANCE - pivot.x) / dx_base;
            if frontier > 0.0 && mult_x > frontier {
                tracing::debug!(
                    "neck multiplier {:.4} capped at {:.4} by the armhole",
                    mult_x,
                    frontier
                );
                mult_x = frontier;
            }
        }
        mult_x = mult_x.min(half_width_cap);

        Self {
            pivot,
            mult_x,
            mult_y,
            deltas,
        }
    }

    /// Write the scaled neckline, without vertical offset, into `out`.
    pub fn apply(&self, base: &BasePolygon, out: &mut [Point2]) {
        for (i, d) in base.neckline().indices().zip(&self.deltas) {
            out[i] = Point2::new(
                self.pivot.x + d.x * self.mult_x,
                self.pivot.y + d.y * self.mult_y,
            );
        }
    }
}

/// Solve the neckline's vertical placement on the assembled outline.
///
/// `limit_height` also caps the neck base below the top-left corner.
pub fn place_vertically(base: &BasePolygon, out: &mut [Point2], params: &NeckParams, pivot_y: f64) {
    let control = base.control();
    let region = base.neckline();
    let rule = HeightPair::neck(&params.overrides, params.lock_lengths).rule();

    let (bottom_edge, top_edge) = y_span(out.iter().map(|p| p.y));
    let y_base = out[control.neck_base].y;
    let y_start = out[control.neck_start].y;
    let top_left_limit = out[control.top_left].y - MARGIN;

    match rule {
        HeightRule::Paired {
            scaled_cm,
            anchor_cm,
        } => {
            let denom = y_base - y_start;
            let mut stretch = if denom.abs() > EPSILON {
                (scaled_cm - anchor_cm) * CM_TO_SCENE / denom
            } else {
                1.0
            };
            let mut offset =
                bottom_edge + anchor_cm * CM_TO_SCENE - (pivot_y + stretch * (y_start - pivot_y));

            let (neck_low, neck_high) = y_span(region.indices().map(|i| out[i].y));
            let dy_high = neck_high - pivot_y;
            let dy_low = neck_low - pivot_y;
            let dy_high = if dy_high.abs() > EPSILON { dy_high } else { EPSILON };
            let dy_low = if dy_low.abs() > EPSILON { dy_low } else { -EPSILON };
            let limit_top = (top_edge - MARGIN - (pivot_y + offset)) / dy_high;
            let limit_bottom = (bottom_edge + MARGIN - (pivot_y + offset)) / dy_low;
            let allowed = [limit_top, limit_bottom]
                .into_iter()
                .filter(|&s| s > 0.0)
                .fold(f64::INFINITY, f64::min);
            if stretch > allowed {
                tracing::debug!(
                    "neck stretch {:.4} limited to {:.4} by the margins",
                    stretch,
                    allowed
                );
            }
            stretch = stretch.min(allowed).max(0.0);

            if params.limit_height {
                let base_after = pivot_y + stretch * (y_base - pivot_y) + offset;
                if base_after > top_left_limit {
                    offset = top_left_limit - (pivot_y + stretch * (y_base - pivot_y));
                }
            }

            for i in region.indices() {
                out[i].y = pivot_y + stretch * (out[i].y - pivot_y) + offset;
            }
        }
        _ => {
            let mut delta = match rule {
                HeightRule::Single {
                    point: PairPoint::Scaled,
                    height_cm,
                } => bottom_edge + height_cm * CM_TO_SCENE - y_base,
                HeightRule::Single {
                    point: PairPoint::Anchor,
                    height_cm,
                } => bottom_edge + height_cm * CM_TO_SCENE - y_start,
                _ => (params.vertical_offset_cm * CM_TO_SCENE)
                    .clamp(-NECK_FREE_OFFSET_LIMIT, NECK_FREE_OFFSET_LIMIT),
            };

            let (neck_low, neck_high) = y_span(region.indices().map(|i| out[i].y));
            let delta_up = top_edge - MARGIN - neck_high;
            let delta_down = bottom_edge + MARGIN - neck_low;
            delta = delta_down.max(delta.min(delta_up));

            if params.limit_height && y_base + delta > top_left_limit {
                delta = top_left_limit - y_base;
            }

            for i in region.indices() {
                out[i].y += delta;
            }
        }
    }
}

/// Shift the neckline back inside the outline's margin band.
pub fn contain(base: &BasePolygon, out: &mut [Point2]) {
    let region = base.neckline();
    let (bottom, top) = y_span(out.iter().map(|p| p.y));
    let (neck_low, neck_high) = y_span(region.indices().map(|i| out[i].y));
    let allowed_max = top - MARGIN;
    let allowed_min = bottom + MARGIN;

    let correction = if neck_high > allowed_max {
        allowed_max - neck_high
    } else if neck_low < allowed_min {
        allowed_min - neck_low
    } else {
        0.0
    };

    if correction != 0.0 {
        tracing::debug!("neckline shifted by {:.4} to stay inside the margins", correction);
        for i in region.indices() {
            out[i].y += correction;
        }
    }
}

fn y_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    })
}
