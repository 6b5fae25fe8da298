//! Base polygon definitions
//!
//! A base polygon is the fixed outline the engine deforms: an ordered ring of
//! points in design units, two curve regions (the sleeve cutout and the
//! neckline), and the named vertices every constraint refers to. Regions and
//! control points are configuration; the engine never hard-codes indices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use zerowaste_core::{Bounds2, GeometryError, Point2};

/// Half-open index range of a curve region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRange {
    pub start: usize,
    pub end: usize,
}

impl RegionRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    fn overlaps(&self, other: &RegionRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Named vertices the transform constraints are expressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPoints {
    /// Top-left corner of the outline
    pub top_left: usize,
    /// First sleeve vertex; pivot of the sleeve region
    pub sleeve_start: usize,
    /// Innermost sleeve vertex, next to the armhole seam
    pub armhole: usize,
    /// Last sleeve vertex, on the back seam
    pub back_seam: usize,
    /// Bottom-left corner
    pub bottom_left: usize,
    /// Bottom-right corner; becomes the origin of the output
    pub anchor: usize,
    /// Lowest neckline vertex; pivot of the neckline region
    pub neck_start: usize,
    /// Turnaround vertex at the base of the neckline
    pub neck_base: usize,
    /// Top-right corner
    pub top_right: usize,
}

/// Shipped base polygon variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BaseVariant {
    /// Current outline (46 points)
    #[default]
    V3,
    /// Earlier outline with denser curve breakpoints (53 points)
    Classic,
}

impl BaseVariant {
    pub fn polygon(&self) -> BasePolygon {
        match self {
            BaseVariant::V3 => BasePolygon::tee_v3(),
            BaseVariant::Classic => BasePolygon::tee_classic(),
        }
    }
}

impl fmt::Display for BaseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3 => write!(f, "v3"),
            Self::Classic => write!(f, "classic"),
        }
    }
}

impl FromStr for BaseVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v3" => Ok(Self::V3),
            "classic" => Ok(Self::Classic),
            _ => Err(format!("Unknown base variant: {}", s)),
        }
    }
}

/// Immutable base outline
#[derive(Debug, Clone, PartialEq)]
pub struct BasePolygon {
    name: String,
    points: Vec<Point2>,
    design_unit: f64,
    sleeve: RegionRange,
    neckline: RegionRange,
    control: ControlPoints,
    bounds: Bounds2,
}

impl BasePolygon {
    /// Build and validate a base polygon.
    ///
    /// `design_unit` is the number of scene units per design unit at scale 1.
    pub fn new(
        name: impl Into<String>,
        points: Vec<Point2>,
        design_unit: f64,
        sleeve: RegionRange,
        neckline: RegionRange,
        control: ControlPoints,
    ) -> Result<Self, GeometryError> {
        let len = points.len();
        if len < 3 {
            return Err(GeometryError::TooFewPoints { count: len, min: 3 });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { index });
        }

        for (region_name, region) in [("sleeve", &sleeve), ("neckline", &neckline)] {
            if region.is_empty() {
                return Err(GeometryError::empty_region(region_name));
            }
            if region.end > len {
                return Err(GeometryError::RegionOutOfBounds {
                    region: region_name.to_string(),
                    start: region.start,
                    end: region.end,
                    len,
                });
            }
        }
        if sleeve.overlaps(&neckline) {
            return Err(GeometryError::OverlappingRegions {
                first: "sleeve".to_string(),
                second: "neckline".to_string(),
            });
        }

        let in_sleeve = [
            ("sleeve_start", control.sleeve_start),
            ("armhole", control.armhole),
            ("back_seam", control.back_seam),
        ];
        for (name, index) in in_sleeve {
            if !sleeve.contains(index) {
                return Err(misplaced(name, index, "the sleeve region"));
            }
        }

        let in_neckline = [
            ("neck_start", control.neck_start),
            ("neck_base", control.neck_base),
        ];
        for (name, index) in in_neckline {
            if !neckline.contains(index) {
                return Err(misplaced(name, index, "the neckline region"));
            }
        }

        let outer = [
            ("top_left", control.top_left),
            ("bottom_left", control.bottom_left),
            ("anchor", control.anchor),
            ("top_right", control.top_right),
        ];
        for (name, index) in outer {
            if index >= len || sleeve.contains(index) || neckline.contains(index) {
                return Err(misplaced(name, index, "the outer contour"));
            }
        }

        let bounds = Bounds2::from_points(&points).ok_or(GeometryError::TooFewPoints {
            count: 0,
            min: 3,
        })?;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(GeometryError::DegenerateBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }

        Ok(Self {
            name: name.into(),
            points,
            design_unit,
            sleeve,
            neckline,
            control,
            bounds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn design_unit(&self) -> f64 {
        self.design_unit
    }

    pub fn sleeve(&self) -> RegionRange {
        self.sleeve
    }

    pub fn neckline(&self) -> RegionRange {
        self.neckline
    }

    pub fn control(&self) -> &ControlPoints {
        &self.control
    }

    /// Bounding box in design units
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Indices belonging to neither curve region
    pub fn outer_indices(&self) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&i| !self.sleeve.contains(i) && !self.neckline.contains(i))
            .collect()
    }

    /// Current outline: 46 points, sleeve 1..15, neckline 17..45.
    pub fn tee_v3() -> Self {
        Self::preset(
            "tee-v3",
            &TEE_V3_POINTS,
            RegionRange::new(1, 15),
            RegionRange::new(17, 45),
            ControlPoints {
                top_left: 0,
                sleeve_start: 1,
                armhole: 8,
                back_seam: 14,
                bottom_left: 15,
                anchor: 16,
                neck_start: 17,
                neck_base: 31,
                top_right: 45,
            },
        )
    }

    /// Earlier outline: 53 points, sleeve 1..16, neckline 18..52.
    pub fn tee_classic() -> Self {
        Self::preset(
            "tee-classic",
            &TEE_CLASSIC_POINTS,
            RegionRange::new(1, 16),
            RegionRange::new(18, 52),
            ControlPoints {
                top_left: 0,
                sleeve_start: 1,
                armhole: 7,
                back_seam: 15,
                bottom_left: 16,
                anchor: 17,
                neck_start: 18,
                neck_base: 35,
                top_right: 52,
            },
        )
    }

    fn preset(
        name: &str,
        raw: &[(f64, f64)],
        sleeve: RegionRange,
        neckline: RegionRange,
        control: ControlPoints,
    ) -> Self {
        let points: Vec<Point2> = raw.iter().copied().map(Point2::from).collect();
        let bounds = Bounds2::from_points(&points).unwrap_or(Bounds2 {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        });
        Self {
            name: name.to_string(),
            points,
            design_unit: DESIGN_UNIT,
            sleeve,
            neckline,
            control,
            bounds,
        }
    }
}

impl Default for BasePolygon {
    fn default() -> Self {
        Self::tee_v3()
    }
}

fn misplaced(name: &str, index: usize, expected: &str) -> GeometryError {
    GeometryError::MisplacedControlPoint {
        name: name.to_string(),
        index,
        expected: expected.to_string(),
    }
}

/// Scene units per design unit for the shipped outlines
pub const DESIGN_UNIT: f64 = 0.05;

const TEE_V3_POINTS: [(f64, f64); 46] = [
    (-89.4295674999999, 108.368099999),
    (-89.4295674999999, 46.210293973832),
    (-85.4717625, 45.924545373832),
    (-79.56484300000002, 45.106066473832),
    (-70.62415600000001, 43.590944473832),
    (-60.612256, 41.706009473832),
    (-50.739038, 39.683699973832),
    (-45.912316, 38.499673973832),
    (-45.912316, 38.40),
    (-50.739038, 39.60),
    (-60.612256, 41.60),
    (-70.62415600000001, 43.50),
    (-79.56484300000002, 45.00),
    (-85.4717625, 45.80),
    (-89.4295674999999, 46.10),
    (-89.4295674999999, 0.0),
    (0.0, 0.0),
    (0.0, 48.81875597),
    (-1.61574627, 48.94363393),
    (-3.22292108, 49.25368203),
    (-5.19177542, 50.00156821),
    (-7.36759500, 51.29351360),
    (-9.19916964, 52.97313001),
    (-10.69661122, 54.96572999),
    (-11.87160416, 57.19749147),
    (-12.73489788, 59.59486630),
    (-13.30018230, 62.08450426),
    (-13.57806829, 64.59372045),
    (-13.52570075, 67.38230419),
    (-13.04997109, 70.42167816),
    (-12.40017228, 72.64027494),
    (-12.32340131, 72.65777902),
    (-12.97174391, 70.44492978),
    (-13.44602725, 67.41508375),
    (-13.49814071, 64.63712349),
    (-13.22129670, 62.13781068),
    (-12.65811112, 59.65731164),
    (-11.79838684, 57.26972847),
    (-10.62900278, 55.04849795),
    (-9.13989736, 53.06685893),
    (-7.31994600, 51.39777534),
    (-5.15645058, 50.11334673),
    (-3.20022792, 49.37039591),
    (-1.60529273, 49.06294801),
    (0.0, 48.94875597),
    (0.0, 108.368099999),
];

const TEE_CLASSIC_POINTS: [(f64, f64); 53] = [
    (-89.4295674999999, 108.368099999),
    (-89.4295674999999, 46.210293973832),
    (-85.4717625, 45.924545373832),
    (-79.56484300000002, 45.106066473832),
    (-70.62415600000001, 43.590944473832),
    (-60.612256, 41.706009473832),
    (-50.739038, 39.683699973832),
    (-45.912316, 38.499673973832),
    (-47.107314, 38.651774473832),
    (-49.425109, 39.163684473832),
    (-55.756944, 40.445362973832),
    (-65.0186505, 42.308007973832),
    (-73.2384505, 43.799537973832),
    (-80.8596695, 44.999889473832),
    (-86.12117, 45.686910973832),
    (-89.4295674999999, 45.959114473832),
    (-89.4295674999999, 0.0),
    (0.0, 0.0),
    (0.0, 48.722702373832),
    (-3.264354, 49.071118373832),
    (-5.339551, 49.799168373832),
    (-7.22611, 50.888833373832),
    (-8.8699315, 52.270691973832),
    (-10.273327, 53.897164973832),
    (-11.4386075, 55.720674473832),
    (-12.3680845, 57.693641473832),
    (-13.064069, 59.768486473832),
    (-13.5288725, 61.897631473832),
    (-13.7756, 63.995550473832),
    (-13.833717, 66.036640473832),
    (-13.717288, 68.062136973832),
    (-13.4194095, 70.082241973832),
    (-12.8864, 72.071916973832),
    (-12.4818445, 73.232615473832),
    (-12.3089495, 73.563895973832),
    (-12.1568235, 73.727955473832),
    (-12.068287, 73.669141473832),
    (-12.046337, 73.491286973832),
    (-12.361732, 72.669213973832),
    (-13.0108575, 70.453303973832),
    (-13.485864, 67.418693973832),
    (-13.5381045, 64.635421973832),
    (-13.2607395, 62.131157473832),
    (-12.6965045, 59.646088973832),
    (-11.8349955, 57.253609973832),
    (-10.662807, 55.027113973832),
    (-9.1695335, 53.039994473832),
    (-7.3437705, 51.365644473832),
    (-5.174113, 50.077457473832),
    (-3.2115745, 49.332038973832),
    (-1.6105195, 49.023290973832),
    (0.0, 48.908755973832),
    (0.0, 108.368099999),
];
