//! Override precedence
//!
//! Manual overrides are resolved through ordered rule lists: the first
//! active rule wins and later ones are ignored. Width rules position one
//! reference vertex horizontally; height rules decide how a region's two
//! vertical reference points are solved.

use crate::params::{ManualOverride, NeckOverrides, SleeveOverrides};
use zerowaste_core::CM_TO_SCENE;

/// Horizontal frame of the fabric in working coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FabricFrame {
    /// x of the right fabric edge (the anchor corner)
    pub right_x: f64,
    /// Target panel width in scene units
    pub width: f64,
    /// y of the top fabric edge
    pub top: f64,
    /// y of the bottom fabric edge
    pub bottom: f64,
}

impl FabricFrame {
    pub fn left_x(&self) -> f64 {
        self.right_x - self.width
    }

    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }
}

/// A width override that places a reference vertex at an absolute x
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthRule {
    /// Armhole at half the armhole-to-armhole span from the right edge
    ArmholeSpan,
    /// Armhole at a distance from the left edge
    ArmholeLateral,
    /// Neck base at half the total neck width from the right edge
    NeckBaseTotal,
    /// Neck base at a distance from the right edge
    NeckBaseHalf,
}

impl WidthRule {
    fn accepts(&self, value_cm: f64) -> bool {
        match self {
            WidthRule::ArmholeSpan | WidthRule::NeckBaseTotal => value_cm > 0.0,
            WidthRule::ArmholeLateral | WidthRule::NeckBaseHalf => value_cm >= 0.0,
        }
    }

    /// Absolute target x for an override value.
    pub fn target_x(&self, value_cm: f64, frame: &FabricFrame) -> f64 {
        let value = value_cm * CM_TO_SCENE;
        match self {
            WidthRule::ArmholeSpan | WidthRule::NeckBaseTotal => frame.right_x - value * 0.5,
            WidthRule::ArmholeLateral => frame.left_x() + value,
            WidthRule::NeckBaseHalf => frame.right_x - value,
        }
    }
}

/// Resolved width rule and its target x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthTarget {
    pub rule: WidthRule,
    pub x: f64,
}

/// First active sleeve width rule
pub fn sleeve_width_target(
    overrides: &SleeveOverrides,
    frame: &FabricFrame,
) -> Option<WidthTarget> {
    first_width_target(
        &[
            (WidthRule::ArmholeSpan, overrides.armhole_span),
            (WidthRule::ArmholeLateral, overrides.armhole_lateral),
        ],
        frame,
    )
}

/// First active neckline width rule
pub fn neck_width_target(overrides: &NeckOverrides, frame: &FabricFrame) -> Option<WidthTarget> {
    first_width_target(
        &[
            (WidthRule::NeckBaseTotal, overrides.base_total_width),
            (WidthRule::NeckBaseHalf, overrides.base_half_width),
        ],
        frame,
    )
}

fn first_width_target(
    rules: &[(WidthRule, ManualOverride)],
    frame: &FabricFrame,
) -> Option<WidthTarget> {
    rules.iter().find_map(|(rule, source)| {
        source
            .active()
            .filter(|&value| rule.accepts(value))
            .map(|value| WidthTarget {
                rule: *rule,
                x: rule.target_x(value, frame),
            })
    })
}

/// One of the two vertical reference points of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairPoint {
    /// The point whose height drives the vertical stretch
    Scaled,
    /// The point the offset is solved against
    Anchor,
}

/// How a region's vertical placement is solved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    /// Both heights honoured: stretch between the points, offset from the
    /// anchor point
    Paired { scaled_cm: f64, anchor_cm: f64 },
    /// Uniform shift that places one point at a height
    Single { point: PairPoint, height_cm: f64 },
    /// No height override; the free offset applies
    Free,
}

/// Height overrides of a region's two reference points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightPair {
    pub scaled: ManualOverride,
    pub anchor: ManualOverride,
    pub locked: bool,
    /// Point honoured when both overrides are on and locked together
    pub locked_prefers: PairPoint,
}

impl HeightPair {
    /// Sleeve pair: armhole stretches, back seam anchors, the armhole wins
    /// when locked.
    pub fn sleeve(overrides: &SleeveOverrides, locked: bool) -> Self {
        Self {
            scaled: overrides.armhole_height,
            anchor: overrides.back_seam_height,
            locked,
            locked_prefers: PairPoint::Scaled,
        }
    }

    /// Neckline pair: neck base stretches, neck start anchors and wins when
    /// locked.
    pub fn neck(overrides: &NeckOverrides, locked: bool) -> Self {
        Self {
            scaled: overrides.base_height,
            anchor: overrides.start_height,
            locked,
            locked_prefers: PairPoint::Anchor,
        }
    }

    /// Resolve the pair into a rule. Locked beats paired; a single enabled
    /// override beats the free offset.
    pub fn rule(&self) -> HeightRule {
        match (self.scaled.active(), self.anchor.active()) {
            (Some(scaled_cm), Some(anchor_cm)) if !self.locked => HeightRule::Paired {
                scaled_cm,
                anchor_cm,
            },
            (Some(scaled_cm), Some(anchor_cm)) => HeightRule::Single {
                point: self.locked_prefers,
                height_cm: match self.locked_prefers {
                    PairPoint::Scaled => scaled_cm,
                    PairPoint::Anchor => anchor_cm,
                },
            },
            (Some(height_cm), None) => HeightRule::Single {
                point: PairPoint::Scaled,
                height_cm,
            },
            (None, Some(height_cm)) => HeightRule::Single {
                point: PairPoint::Anchor,
                height_cm,
            },
            (None, None) => HeightRule::Free,
        }
    }
}
