//! Drawing layout
//!
//! Turns a projected outline into a dimensioned drawing:
//!
//! 1. Project the 3D points onto a plane and convert to centimetres
//! 2. Size the canvas around the outline and choose font sizes
//! 3. Place edge length labels, inner-facing edges first
//! 4. Optionally place ordinate labels measured from the reference edges
//! 5. Place vertex or edge IDs and the title block
//!
//! All labels share one [`LabelPlacer`], so the order above is also the
//! order of precedence when space runs out. Labels that find no free spot
//! are left out.

use crate::config::{FontSizeStrategy, SvgExportConfig};
use crate::document::{
    DocumentStyle, Element, Layer, LayerKind, LineClass, SvgDocument, TextAlign, TextClass,
    ID_COLOR,
};
use crate::error::{ExportError, ExportResult};
use crate::label_placer::{LabelPlacer, PlacementRequest};
use zerowaste_core::{Point2, Point3, ProjectionPlane};

/// Smallest font size written to a drawing (cm)
pub const MIN_FONT_CM: f64 = 0.04;

/// Global font shrink tiers as (labels per cm², factor)
const DENSITY_TIERS: [(f64, f64); 3] = [(0.60, 0.66), (0.40, 0.75), (0.25, 0.88)];

/// Resolved text sizes (cm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub main_cm: f64,
    pub dim_cm: f64,
    pub id_cm: f64,
    /// Global shrink factor applied for label density
    pub density_scale: f64,
}

impl FontSizes {
    /// Choose font sizes for a canvas.
    ///
    /// `expected_labels` is the number of labels the drawing may hold; the
    /// sizes shrink in fixed tiers as labels per square centimetre grow.
    pub fn resolve(
        config: &SvgExportConfig,
        width_cm: f64,
        height_cm: f64,
        expected_labels: usize,
    ) -> Self {
        let fonts = &config.fonts;
        let (main, dim, id) = match fonts.strategy {
            FontSizeStrategy::Absolute => (fonts.main_cm, fonts.dim_cm, fonts.id_cm),
            FontSizeStrategy::RelativeMin | FontSizeStrategy::RelativeMax => {
                let side = if fonts.strategy == FontSizeStrategy::RelativeMin {
                    width_cm.min(height_cm)
                } else {
                    width_cm.max(height_cm)
                };
                let main = (side * fonts.relative_pct / 100.0).max(MIN_FONT_CM);
                (main, main * fonts.dim_ratio, main * fonts.id_ratio)
            }
        };

        let density = expected_labels as f64 / (width_cm * height_cm).max(1.0);
        let density_scale = DENSITY_TIERS
            .iter()
            .find(|(threshold, _)| density > *threshold)
            .map_or(1.0, |&(_, factor)| factor);

        Self {
            main_cm: (main * density_scale).max(MIN_FONT_CM),
            dim_cm: (dim * density_scale).max(MIN_FONT_CM),
            id_cm: (id * density_scale).max(MIN_FONT_CM),
            density_scale,
        }
    }
}

/// Outcome of label placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub placed_dimensions: usize,
    pub dropped_dimensions: usize,
    pub placed_ordinates: usize,
    pub dropped_ordinates: usize,
    pub placed_ids: usize,
    pub dropped_ids: usize,
}

impl PlacementStats {
    pub fn dropped(&self) -> usize {
        self.dropped_dimensions + self.dropped_ordinates + self.dropped_ids
    }
}

/// Stride that keeps at most `max` of `count` items
pub fn decimation_step(count: usize, max: usize) -> usize {
    if max == 0 {
        return count.max(1);
    }
    count.div_ceil(max).max(1)
}

/// Edges that get a length label, longest first.
///
/// Edges shorter than `min_len_cm` are skipped; the rest are thinned to an
/// even stride so at most `max_labels` remain. Returns `(a, b, length)`.
pub fn select_dimension_edges(
    points: &[Point2],
    edges: &[(usize, usize)],
    max_labels: usize,
    min_len_cm: f64,
) -> Vec<(usize, usize, f64)> {
    if max_labels == 0 {
        return Vec::new();
    }
    let mut candidates: Vec<(usize, usize, f64)> = edges
        .iter()
        .map(|&(a, b)| (a, b, points[a].distance_to(&points[b])))
        .filter(|&(_, _, len)| len >= min_len_cm)
        .collect();
    candidates.sort_by(|x, y| y.2.total_cmp(&x.2));

    let step = decimation_step(candidates.len(), max_labels);
    candidates
        .into_iter()
        .step_by(step)
        .take(max_labels)
        .collect()
}

/// Outline in canvas centimetres, y up
struct Canvas {
    points: Vec<Point2>,
    width: f64,
    height: f64,
    margin: f64,
    centroid: Point2,
}

impl Canvas {
    fn new(projected: Vec<Point2>, margin: f64) -> Self {
        let (mut min, mut max) = (projected[0], projected[0]);
        for p in &projected {
            min = Point2::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2::new(max.x.max(p.x), max.y.max(p.y));
        }
        let shift = Point2::new(margin - min.x, margin - min.y);
        let points: Vec<Point2> = projected.into_iter().map(|p| p + shift).collect();
        let sum = points
            .iter()
            .fold(Point2::new(0.0, 0.0), |acc, &p| acc + p);
        let centroid = sum * (1.0 / points.len() as f64);

        Self {
            width: (max.x - min.x) + 2.0 * margin,
            height: (max.y - min.y) + 2.0 * margin,
            margin,
            centroid,
            points,
        }
    }

    fn svg_y(&self, y: f64) -> f64 {
        self.height - y
    }

    /// Unit normal of an edge pointing toward the centroid, and whether the
    /// edge's left normal already did.
    fn inward_normal(&self, a: Point2, b: Point2) -> Option<(Point2, bool)> {
        let normal = (b - a).perp().normalized()?;
        let to_centroid = self.centroid - a.midpoint(&b);
        if normal.dot(&to_centroid) > 0.0 {
            Some((normal, true))
        } else {
            Some((normal * -1.0, false))
        }
    }
}

struct DimensionLabel {
    a: Point2,
    b: Point2,
    length: f64,
    normal: Point2,
}

/// Lays out dimensioned drawings
#[derive(Debug, Clone, Default)]
pub struct SvgLayoutEngine {
    config: SvgExportConfig,
}

impl SvgLayoutEngine {
    pub fn new(config: SvgExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SvgExportConfig {
        &self.config
    }

    /// Lay out a drawing of `points` (scene units) joined by `edges`.
    pub fn layout(&self, points: &[Point3], edges: &[(usize, usize)]) -> ExportResult<SvgDocument> {
        self.layout_with_stats(points, edges).map(|(doc, _)| doc)
    }

    /// Like [`layout`](Self::layout), also reporting how many labels fit.
    pub fn layout_with_stats(
        &self,
        points: &[Point3],
        edges: &[(usize, usize)],
    ) -> ExportResult<(SvgDocument, PlacementStats)> {
        validate_input(points, edges)?;
        let config = &self.config;

        let plane = config
            .canvas
            .projection
            .plane()
            .unwrap_or_else(|| ProjectionPlane::auto(points));
        let unit = config.canvas.scene_unit_cm;
        let projected = points.iter().map(|p| plane.project(p) * unit).collect();
        let canvas = Canvas::new(projected, config.canvas.margin_cm);

        let expected_labels = edges.len().min(config.dimensions.max_labels)
            + canvas.points.len().min(config.ids.max_labels);
        let fonts = FontSizes::resolve(config, canvas.width, canvas.height, expected_labels);
        tracing::debug!(
            "drawing {:.1} x {:.1} cm on plane {}, fonts {:.3}/{:.3}/{:.3} cm",
            canvas.width,
            canvas.height,
            plane,
            fonts.main_cm,
            fonts.dim_cm,
            fonts.id_cm
        );

        let mut placer = LabelPlacer::new(
            canvas.width,
            canvas.height,
            canvas.margin,
            (fonts.main_cm * 28.0).max(6.0),
        );
        let mut stats = PlacementStats::default();

        let mut outline = Layer::new(LayerKind::Outline);
        for &(a, b) in edges {
            let (p, q) = (canvas.points[a], canvas.points[b]);
            outline.push(Element::line(
                LineClass::Edge,
                p.x,
                canvas.svg_y(p.y),
                q.x,
                canvas.svg_y(q.y),
            ));
        }

        let (internal_labels, external_labels) = self.dimension_labels(&canvas, edges);
        let mut internal = Layer::new(LayerKind::InternalDimensions);
        let mut external = Layer::new(LayerKind::ExternalDimensions);
        let dims = &config.dimensions;
        for (labels, layer, offset) in [
            (&internal_labels, &mut internal, dims.internal_offset_cm),
            (&external_labels, &mut external, dims.external_offset_cm),
        ] {
            for label in labels {
                if place_dimension(&canvas, &mut placer, &fonts, label, offset, layer) {
                    stats.placed_dimensions += 1;
                } else {
                    stats.dropped_dimensions += 1;
                }
            }
        }

        let mut layers = vec![
            outline,
            Layer::new(LayerKind::InternalLines),
            internal,
            external,
        ];
        if config.ordinates.enabled && config.ordinates.max_labels > 0 {
            layers.push(self.ordinate_layer(&canvas, &mut placer, &fonts, &mut stats));
        }
        layers.push(self.id_layer(&canvas, edges, &mut placer, &fonts, &mut stats));

        if stats.dropped() > 0 {
            tracing::warn!(
                "{} labels did not fit and were left out ({} dimensions, {} ordinates, {} ids)",
                stats.dropped(),
                stats.dropped_dimensions,
                stats.dropped_ordinates,
                stats.dropped_ids
            );
        }

        let style = DocumentStyle {
            font_main_cm: fonts.main_cm,
            font_dim_cm: fonts.dim_cm,
            font_id_cm: fonts.id_cm,
            font_unit: config.fonts.unit,
            document_unit: config.canvas.document_unit,
        };
        let document = SvgDocument::new(canvas.width, canvas.height, style, layers);
        Ok((document, stats))
    }

    /// Selected edges split by the side their label goes on
    fn dimension_labels(
        &self,
        canvas: &Canvas,
        edges: &[(usize, usize)],
    ) -> (Vec<DimensionLabel>, Vec<DimensionLabel>) {
        let dims = &self.config.dimensions;
        let mut internal = Vec::new();
        let mut external = Vec::new();
        if !dims.enabled {
            return (internal, external);
        }

        let chosen =
            select_dimension_edges(&canvas.points, edges, dims.max_labels, dims.min_edge_len_cm);
        for (a, b, length) in chosen {
            let (pa, pb) = (canvas.points[a], canvas.points[b]);
            let Some((normal, inward)) = canvas.inward_normal(pa, pb) else {
                continue;
            };
            let label = DimensionLabel {
                a: pa,
                b: pb,
                length,
                normal,
            };
            if inward {
                internal.push(label);
            } else {
                external.push(label);
            }
        }
        (internal, external)
    }

    fn ordinate_layer(
        &self,
        canvas: &Canvas,
        placer: &mut LabelPlacer,
        fonts: &FontSizes,
        stats: &mut PlacementStats,
    ) -> Layer {
        let ordinates = &self.config.ordinates;
        let mut layer = Layer::new(LayerKind::Ordinates);
        let fd = fonts.dim_cm;
        let left = canvas.margin;
        let bottom = canvas.margin;
        let request = PlacementRequest::new(fd * 4.5, fd * 1.9)
            .with_priority(1)
            .with_min_distance((fd * 9.0).max(6.0));
        let step = decimation_step(canvas.points.len(), ordinates.max_labels);
        let mut count = 0;

        for v in canvas.points.iter().step_by(step) {
            if count >= ordinates.max_labels {
                break;
            }
            if ordinates.from_left {
                let dx = v.x - left;
                if dx > 0.5 {
                    let y = canvas.svg_y(v.y);
                    let off = -fd * 0.8;
                    layer.push(Element::line(LineClass::Aux, left, y, v.x, y));
                    layer.push(Element::Line {
                        class: LineClass::Dim,
                        x1: left,
                        y1: y + off,
                        x2: v.x,
                        y2: y + off,
                        arrows: true,
                    });
                    match placer.place((left + v.x) / 2.0, y + off - fd * 0.3, &request) {
                        Some((x, y)) => {
                            layer.push(Element::text(
                                TextClass::Dim,
                                x,
                                y,
                                TextAlign::Middle,
                                format!("{:.1}", dx),
                            ));
                            stats.placed_ordinates += 1;
                        }
                        None => stats.dropped_ordinates += 1,
                    }
                    count += 1;
                }
            }
            if ordinates.from_bottom && count < ordinates.max_labels {
                let dy = v.y - bottom;
                if dy > 0.5 {
                    let off = fd * 0.8;
                    let (y0, y1) = (canvas.svg_y(bottom), canvas.svg_y(v.y));
                    layer.push(Element::line(LineClass::Aux, v.x, y0, v.x, y1));
                    layer.push(Element::Line {
                        class: LineClass::Dim,
                        x1: v.x + off,
                        y1: y0,
                        x2: v.x + off,
                        y2: y1,
                        arrows: true,
                    });
                    match placer.place(v.x + off + fd * 0.4, (y0 + y1) / 2.0, &request) {
                        Some((x, y)) => {
                            layer.push(Element::text(
                                TextClass::Dim,
                                x,
                                y,
                                TextAlign::Center,
                                format!("{:.1}", dy),
                            ));
                            stats.placed_ordinates += 1;
                        }
                        None => stats.dropped_ordinates += 1,
                    }
                    count += 1;
                }
            }
        }
        layer
    }

    fn id_layer(
        &self,
        canvas: &Canvas,
        edges: &[(usize, usize)],
        placer: &mut LabelPlacer,
        fonts: &FontSizes,
        stats: &mut PlacementStats,
    ) -> Layer {
        let ids = &self.config.ids;
        let mut layer = Layer::new(LayerKind::Ids);
        let fid = fonts.id_cm;

        if ids.show_vertex_dots {
            let r = (fid * 0.28).max(0.06);
            for v in &canvas.points {
                layer.push(Element::Circle {
                    cx: v.x,
                    cy: canvas.svg_y(v.y),
                    r,
                    fill: ID_COLOR,
                });
            }
        }

        let max_ids = ids.max_labels.min(canvas.points.len());
        if ids.enabled && max_ids > 0 {
            let request = PlacementRequest::new(0.0, 0.0)
                .with_priority(2)
                .with_rings(8)
                .with_step((fid * 8.0).max(4.0).trunc())
                .with_min_distance((fid * 9.0).max(5.0));
            if ids.center_on_edges && !edges.is_empty() {
                place_edge_ids(canvas, edges, max_ids, placer, fid, request, &mut layer, stats);
            } else {
                place_vertex_ids(canvas, max_ids, placer, fid, request, &mut layer, stats);
            }
        }

        if self.config.title.enabled {
            self.title_block(canvas, fonts.main_cm, &mut layer);
        }
        layer
    }

    fn title_block(&self, canvas: &Canvas, font: f64, layer: &mut Layer) {
        let width = (canvas.width * 0.42).min(8.0);
        let height = font * 7.0;
        let (x, y) = (canvas.margin, canvas.margin);
        layer.push(Element::Rect {
            x,
            y: canvas.svg_y(y + height),
            width,
            height,
        });

        let pad = font * 0.45;
        let mut line = y + height - font * 0.7;
        for (label, value, bold) in self.config.title.rows() {
            if value.is_empty() {
                continue;
            }
            let (label, text) = if bold {
                (Some(format!("{}: ", label)), value.to_string())
            } else {
                (None, format!("{}: {}", label, value))
            };
            layer.push(Element::Text {
                class: TextClass::Main,
                x: x + pad,
                y: canvas.svg_y(line),
                align: TextAlign::Start,
                text,
                label,
                text_length: Some(width - pad * 2.0),
            });
            line -= font * 0.95;
        }
    }
}

fn validate_input(points: &[Point3], edges: &[(usize, usize)]) -> ExportResult<()> {
    if points.is_empty() {
        return Err(ExportError::EmptyGeometry);
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(ExportError::NonFinitePoint { index });
    }
    let len = points.len();
    for (edge, &(a, b)) in edges.iter().enumerate() {
        if let Some(vertex) = [a, b].into_iter().find(|&v| v >= len) {
            return Err(ExportError::EdgeOutOfRange { edge, vertex, len });
        }
    }
    Ok(())
}

/// Box shrink factor for a crowded neighbourhood
fn crowding_scale(density: usize, tight: f64) -> f64 {
    match density {
        0..=2 => 1.0,
        3..=5 => 0.85,
        _ => tight,
    }
}

fn place_dimension(
    canvas: &Canvas,
    placer: &mut LabelPlacer,
    fonts: &FontSizes,
    label: &DimensionLabel,
    offset: f64,
    layer: &mut Layer,
) -> bool {
    let fd = fonts.dim_cm;
    let mid = label.a.midpoint(&label.b);
    let anchor = mid + label.normal * offset;
    let anchor_y = canvas.svg_y(anchor.y);

    let scale = crowding_scale(placer.local_density(anchor.x, anchor_y, 12.0), 0.72);
    let request = PlacementRequest::new(fd * 5.0 * scale, fd * 2.0 * scale)
        .with_priority(0)
        .with_rings(10)
        .with_step((fd * 8.0).max(4.0).trunc())
        .with_min_distance((fd * 10.0).max(6.0));

    let Some((x, y)) = placer.place(anchor.x, anchor_y, &request) else {
        return false;
    };
    let leader_end = mid + label.normal * (offset * 0.85);
    layer.push(Element::line(
        LineClass::Aux,
        mid.x,
        canvas.svg_y(mid.y),
        leader_end.x,
        canvas.svg_y(leader_end.y),
    ));
    layer.push(Element::text(
        TextClass::Dim,
        x,
        y,
        TextAlign::Center,
        format!("{:.1}", label.length),
    ));
    true
}

#[allow(clippy::too_many_arguments)]
fn place_edge_ids(
    canvas: &Canvas,
    edges: &[(usize, usize)],
    max_ids: usize,
    placer: &mut LabelPlacer,
    fid: f64,
    request: PlacementRequest,
    layer: &mut Layer,
    stats: &mut PlacementStats,
) {
    let request = PlacementRequest {
        width: fid * 4.0,
        height: fid * 1.8,
        ..request
    };
    let step = decimation_step(edges.len(), max_ids);
    let mut placed = 0;

    for &(a, b) in edges.iter().step_by(step) {
        if placed >= max_ids {
            break;
        }
        let (pa, pb) = (canvas.points[a], canvas.points[b]);
        let Some((normal, _)) = canvas.inward_normal(pa, pb) else {
            continue;
        };
        let anchor = pa.midpoint(&pb) + normal * (fid * 1.2);
        match placer.place(anchor.x, canvas.svg_y(anchor.y), &request) {
            Some((x, y)) => {
                layer.push(Element::text(
                    TextClass::Id,
                    x,
                    y,
                    TextAlign::Center,
                    format!("{}-{}", a, b),
                ));
                placed += 1;
                stats.placed_ids += 1;
            }
            None => stats.dropped_ids += 1,
        }
    }
}

fn place_vertex_ids(
    canvas: &Canvas,
    max_ids: usize,
    placer: &mut LabelPlacer,
    fid: f64,
    request: PlacementRequest,
    layer: &mut Layer,
    stats: &mut PlacementStats,
) {
    const QUADRANTS: [(f64, f64); 4] = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];
    let step = decimation_step(canvas.points.len(), max_ids);

    for (n, (index, v)) in canvas.points.iter().enumerate().step_by(step).enumerate() {
        let (qx, qy) = QUADRANTS[n % QUADRANTS.len()];
        let x = v.x + qx * fid * 1.5;
        let y = canvas.svg_y(v.y + qy * fid * 0.9);

        let scale = crowding_scale(placer.local_density(x, y, 10.0), 0.70);
        let request = PlacementRequest {
            width: fid * 3.6 * scale,
            height: fid * 1.7 * scale,
            ..request
        };
        match placer.place(x, y, &request) {
            Some((x, y)) => {
                layer.push(Element::text(
                    TextClass::Id,
                    x,
                    y,
                    TextAlign::Center,
                    index.to_string(),
                ));
                stats.placed_ids += 1;
            }
            None => stats.dropped_ids += 1,
        }
    }
}
