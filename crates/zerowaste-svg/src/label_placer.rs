//! Greedy label placement
//!
//! Labels are axis-aligned boxes reserved on a sparse grid of square cells.
//! A request starts at its preferred position and walks outward in rings of
//! nine candidate offsets until it finds a spot that conflicts with no
//! earlier reservation. Reservations are never moved or removed, so the
//! result depends on the order of the requests.
//!
//! Each reservation is registered in the cell holding its centre only, and
//! conflict checks look at the 3x3 cells around the candidate. Boxes larger
//! than a cell can therefore overlap a reservation two cells away; the cell
//! size is chosen from the font size to keep that rare.

use std::collections::HashMap;

/// Box overlap factor on each axis
const OVERLAP_FACTOR: f64 = 0.52;

/// Distance multiplier against reservations of lower priority
const PRIORITY_SPACING: f64 = 1.35;

/// Smallest accepted cell size
const MIN_CELL: i64 = 4;

/// Smallest accepted explicit ring step
const MIN_STEP: f64 = 2.0;

/// Ring offsets, tried in order at every radius
const RING_OFFSETS: [(f64, f64); 9] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (0.0, 0.0),
];

/// An accepted label box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelReservation {
    /// Centre x
    pub x: f64,
    /// Centre y
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Lower values are placed first and keep more room around them
    pub priority: i32,
}

/// Size and search settings of one label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub width: f64,
    pub height: f64,
    pub priority: i32,
    /// Number of rings searched after the preferred position
    pub max_rings: u32,
    /// Ring spacing; the cell size when `None`
    pub step: Option<f64>,
    /// Minimum centre distance to other reservations
    pub min_distance: f64,
}

impl PlacementRequest {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            priority: 1,
            max_rings: 12,
            step: None,
            min_distance: 8.0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_rings(mut self, max_rings: u32) -> Self {
        self.max_rings = max_rings;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }
}

/// Spatial-hash label placer for one canvas
#[derive(Debug, Clone)]
pub struct LabelPlacer {
    width: f64,
    height: f64,
    margin: f64,
    cell: f64,
    grid: HashMap<(i64, i64), Vec<usize>>,
    items: Vec<LabelReservation>,
}

impl LabelPlacer {
    /// Create a placer for a `width` x `height` canvas.
    ///
    /// The cell size is truncated to an integer and raised to at least 4.
    pub fn new(width: f64, height: f64, margin: f64, cell: f64) -> Self {
        let cell = (cell.trunc() as i64).max(MIN_CELL) as f64;
        Self {
            width,
            height,
            margin,
            cell,
            grid: HashMap::new(),
            items: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell
    }

    /// Accepted reservations in placement order
    pub fn reservations(&self) -> &[LabelReservation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn cell_of(&self, x: f64, y: f64) -> (i64, i64) {
        ((x / self.cell).floor() as i64, (y / self.cell).floor() as i64)
    }

    /// Keep a box of size `w` x `h` inside the margin-inset canvas.
    ///
    /// When the box does not fit, the lower bound wins.
    fn clamp(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        let x0 = self.margin + w / 2.0;
        let y0 = self.margin + h / 2.0;
        let x1 = self.width - self.margin - w / 2.0;
        let y1 = self.height - self.margin - h / 2.0;
        (x.min(x1).max(x0), y.min(y1).max(y0))
    }

    fn neighbors(&self, x: f64, y: f64) -> impl Iterator<Item = &LabelReservation> + '_ {
        let (cx, cy) = self.cell_of(x, y);
        (cx - 1..=cx + 1)
            .flat_map(move |ix| (cy - 1..=cy + 1).map(move |iy| (ix, iy)))
            .filter_map(|key| self.grid.get(&key))
            .flatten()
            .map(|&i| &self.items[i])
    }

    /// Number of reservations within `radius` of a point, looking only at
    /// the 3x3 cells around it.
    pub fn local_density(&self, x: f64, y: f64, radius: f64) -> usize {
        let r2 = radius * radius;
        self.neighbors(x, y)
            .filter(|item| (x - item.x).powi(2) + (y - item.y).powi(2) <= r2)
            .count()
    }

    fn conflicts(&self, x: f64, y: f64, request: &PlacementRequest) -> bool {
        self.neighbors(x, y).any(|item| {
            let overlaps = (x - item.x).abs() <= (request.width + item.width) * OVERLAP_FACTOR
                && (y - item.y).abs() <= (request.height + item.height) * OVERLAP_FACTOR;
            if overlaps {
                return true;
            }
            let min_distance = if item.priority < request.priority {
                request.min_distance * PRIORITY_SPACING
            } else {
                request.min_distance
            };
            (x - item.x).powi(2) + (y - item.y).powi(2) < min_distance * min_distance
        })
    }

    fn reserve(&mut self, reservation: LabelReservation) {
        let index = self.items.len();
        let key = self.cell_of(reservation.x, reservation.y);
        self.items.push(reservation);
        self.grid.entry(key).or_default().push(index);
    }

    /// Find and reserve a spot for a label near `(x, y)`.
    ///
    /// Returns the accepted centre, or `None` when every candidate up to
    /// `max_rings` conflicts.
    pub fn place(&mut self, x: f64, y: f64, request: &PlacementRequest) -> Option<(f64, f64)> {
        let (w, h) = (request.width, request.height);
        let (x, y) = self.clamp(x, y, w, h);
        let step = request.step.map_or(self.cell, |s| s.max(MIN_STEP));

        for ring in 0..=request.max_rings {
            let reach = f64::from(ring) * step;
            for (qx, qy) in RING_OFFSETS {
                let (px, py) = self.clamp(x + qx * reach, y + qy * reach, w, h);
                if !self.conflicts(px, py, request) {
                    self.reserve(LabelReservation {
                        x: px,
                        y: py,
                        width: w,
                        height: h,
                        priority: request.priority,
                    });
                    return Some((px, py));
                }
            }
        }
        None
    }
}
