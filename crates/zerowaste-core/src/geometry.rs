//! Geometry primitives and polyline utilities
//!
//! Points in 2D and 3D, bounding boxes, arc-length helpers, equidistant
//! resampling of open polylines, and projection of 3D outlines onto the
//! coordinate plane that best fits them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Tolerance used to guard divisions and degenerate extents.
pub const EPSILON: f64 = 1e-9;

/// 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        (*other - *self).length()
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Left-hand normal `(-y, x)`, not normalized.
    pub fn perp(&self) -> Point2 {
        Point2::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(&self) -> Option<Point2> {
        let len = self.length();
        if len <= EPSILON {
            None
        } else {
            Some(Point2::new(self.x / len, self.y / len))
        }
    }

    pub fn midpoint(&self, other: &Point2) -> Point2 {
        Point2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

/// 3D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Axis-aligned 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2 {
    /// Bounding box of a point set, `None` when empty.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds2 {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}

/// Divide, replacing a vanishing denominator with a signed epsilon.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den.abs() > EPSILON {
        num / den
    } else if den < 0.0 {
        num / -EPSILON
    } else {
        num / EPSILON
    }
}

/// Running arc length at every vertex; the first entry is always zero.
pub fn cumulative_lengths(points: &[Point2]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += points[i - 1].distance_to(p);
        }
        lengths.push(total);
    }
    lengths
}

pub fn polyline_length(points: &[Point2]) -> f64 {
    cumulative_lengths(points).last().copied().unwrap_or(0.0)
}

/// Redistribute the interior points of an open polyline at equal arc-length
/// spacing along the original path.
///
/// The endpoints are kept exactly. Polylines with fewer than three points or
/// zero length come back unchanged.
pub fn resample_equidistant(points: &[Point2]) -> Vec<Point2> {
    let n = points.len();
    if n < 3 {
        tracing::debug!("resample skipped: only {} points", n);
        return points.to_vec();
    }

    let cumulative = cumulative_lengths(points);
    let total = cumulative[n - 1];
    if total <= 0.0 {
        tracing::debug!("resample skipped: {} points with zero length", n);
        return points.to_vec();
    }

    let spacing = total / (n - 1) as f64;
    let mut out = Vec::with_capacity(n);
    out.push(points[0]);

    let mut segment = 1;
    for k in 1..n - 1 {
        let target = spacing * k as f64;
        while segment < n - 1 && cumulative[segment] < target {
            segment += 1;
        }
        let start = points[segment - 1];
        let end = points[segment];
        let seg_len = cumulative[segment] - cumulative[segment - 1];
        let t = if seg_len > 0.0 {
            (target - cumulative[segment - 1]) / seg_len
        } else {
            0.0
        };
        out.push(start + (end - start) * t);
    }

    out.push(points[n - 1]);
    out
}

/// Extent of a 3D point set along each axis.
pub fn axis_extents(points: &[Point3]) -> (f64, f64, f64) {
    let Some(first) = points.first() else {
        return (0.0, 0.0, 0.0);
    };
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    (max.x - min.x, max.y - min.y, max.z - min.z)
}

/// Coordinate plane used to flatten a 3D outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionPlane {
    /// Drop Z
    #[serde(rename = "xy")]
    Xy,
    /// Drop Y
    #[serde(rename = "xz")]
    Xz,
    /// Drop X
    #[serde(rename = "yz")]
    Yz,
}

impl ProjectionPlane {
    /// Pick the plane whose normal axis has the smallest extent.
    ///
    /// Ties resolve in the order XY, XZ, YZ.
    pub fn auto(points: &[Point3]) -> Self {
        let (ex, ey, ez) = axis_extents(points);
        let mut best = (ProjectionPlane::Xy, ez);
        for candidate in [(ProjectionPlane::Xz, ey), (ProjectionPlane::Yz, ex)] {
            if candidate.1 < best.1 {
                best = candidate;
            }
        }
        best.0
    }

    pub fn project(&self, p: &Point3) -> Point2 {
        match self {
            ProjectionPlane::Xy => Point2::new(p.x, p.y),
            ProjectionPlane::Xz => Point2::new(p.x, p.z),
            ProjectionPlane::Yz => Point2::new(p.y, p.z),
        }
    }
}

impl fmt::Display for ProjectionPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xy => write!(f, "XY"),
            Self::Xz => write!(f, "XZ"),
            Self::Yz => write!(f, "YZ"),
        }
    }
}

impl FromStr for ProjectionPlane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xy" => Ok(Self::Xy),
            "xz" => Ok(Self::Xz),
            "yz" => Ok(Self::Yz),
            _ => Err(format!("Unknown projection plane: {}", s)),
        }
    }
}
