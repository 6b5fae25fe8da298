//! Transformed outline and mesh construction
//!
//! The engine output keeps the base polygon's index order. It is anchored so
//! the bottom-right corner sits at the origin and embedded in either the XY
//! plane (top view) or the XZ plane (frontal view). [`PatternMesh`] turns it
//! into a closed edge ring with near-coincident vertices welded.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use zerowaste_core::{GeometryError, Point2, Point3};

/// Distance below which two mesh vertices are merged (scene units)
pub const WELD_TOLERANCE: f64 = 1e-4;

/// Plane the outline is embedded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPlane {
    /// XY plane; height runs along Y
    Top,
    /// XZ plane; height runs along Z
    Frontal,
}

impl ViewPlane {
    fn embed(&self, p: Point2) -> Point3 {
        match self {
            ViewPlane::Top => Point3::new(p.x, p.y, 0.0),
            ViewPlane::Frontal => Point3::new(p.x, 0.0, p.y),
        }
    }

    /// Coordinate that carries the pattern height
    pub fn vertical(&self, p: &Point3) -> f64 {
        match self {
            ViewPlane::Top => p.y,
            ViewPlane::Frontal => p.z,
        }
    }
}

/// Engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedPolygon {
    points: Vec<Point3>,
    view: ViewPlane,
    fabric_width: f64,
    location: Point3,
}

impl TransformedPolygon {
    /// Translate `points[anchor]` to the origin and embed in `view`.
    pub(crate) fn anchored(
        points: &[Point2],
        anchor: usize,
        view: ViewPlane,
        fabric_width: f64,
        location: Point3,
    ) -> Self {
        let origin = points[anchor];
        let points = points.iter().map(|&p| view.embed(p - origin)).collect();
        Self {
            points,
            view,
            fabric_width,
            location,
        }
    }

    /// Local coordinates in scene units
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn view(&self) -> ViewPlane {
        self.view
    }

    /// Target panel width in scene units; the left fabric edge is at
    /// `-fabric_width`
    pub fn fabric_width(&self) -> f64 {
        self.fabric_width
    }

    /// Object location from the placement parameters
    pub fn location(&self) -> Point3 {
        self.location
    }

    pub fn point(&self, index: usize) -> Result<Point3, GeometryError> {
        self.points
            .get(index)
            .copied()
            .ok_or(GeometryError::VertexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    /// Points offset by the object location
    pub fn world_points(&self) -> Vec<Point3> {
        self.points.iter().map(|&p| p + self.location).collect()
    }

    /// Outline flattened to (x, height)
    pub fn outline_2d(&self) -> Vec<Point2> {
        self.points
            .iter()
            .map(|p| Point2::new(p.x, self.view.vertical(p)))
            .collect()
    }

    /// Consecutive edges plus the closing edge back to the first vertex
    pub fn closed_edges(&self) -> Vec<(usize, usize)> {
        let n = self.points.len();
        (0..n).map(|i| (i, (i + 1) % n)).collect()
    }
}

/// Welded vertex list with a closed edge ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMesh {
    pub vertices: Vec<Point3>,
    pub edges: Vec<(usize, usize)>,
}

impl PatternMesh {
    /// Weld a closed ring of points. The first occurrence of a cluster wins;
    /// edges collapsed by welding and repeated edges are dropped.
    pub fn weld(points: &[Point3], tolerance: f64) -> Self {
        let cell = tolerance.max(f64::MIN_POSITIVE);
        let tol_sq = tolerance * tolerance;
        let mut grid: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        let mut vertices: Vec<Point3> = Vec::with_capacity(points.len());
        let mut remap = Vec::with_capacity(points.len());

        for p in points {
            let key = (
                (p.x / cell).floor() as i64,
                (p.y / cell).floor() as i64,
                (p.z / cell).floor() as i64,
            );
            let mut found = None;
            'search: for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        if let Some(ids) = grid.get(&(key.0 + dx, key.1 + dy, key.2 + dz)) {
                            for &id in ids {
                                let v = vertices[id];
                                let d_sq = (v.x - p.x).powi(2)
                                    + (v.y - p.y).powi(2)
                                    + (v.z - p.z).powi(2);
                                if d_sq <= tol_sq {
                                    found = Some(id);
                                    break 'search;
                                }
                            }
                        }
                    }
                }
            }

            let id = found.unwrap_or_else(|| {
                vertices.push(*p);
                let id = vertices.len() - 1;
                grid.entry(key).or_default().push(id);
                id
            });
            remap.push(id);
        }

        let n = points.len();
        let mut seen = HashSet::new();
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let a = remap[i];
            let b = remap[(i + 1) % n];
            if a == b {
                continue;
            }
            if seen.insert((a.min(b), a.max(b))) {
                edges.push((a, b));
            }
        }

        if vertices.len() < n {
            tracing::debug!("welded {} vertices into {}", n, vertices.len());
        }

        Self { vertices, edges }
    }

    /// Mesh of a transformed outline in world coordinates
    pub fn from_polygon(polygon: &TransformedPolygon) -> Self {
        Self::weld(&polygon.world_points(), WELD_TOLERANCE)
    }
}
