use tempfile::TempDir;
use zerowaste_core::{DocumentUnit, Point3};
use zerowaste_svg::{
    Element, ExportError, LayerKind, ProjectionMode, SvgExportConfig, SvgLayoutEngine,
};

/// 50 x 50 cm square in the XY plane
fn square() -> (Vec<Point3>, Vec<(usize, usize)>) {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.5, 0.0, 0.0),
        Point3::new(0.5, 0.5, 0.0),
        Point3::new(0.0, 0.5, 0.0),
    ];
    (points, vec![(0, 1), (1, 2), (2, 3), (3, 0)])
}

fn untitled() -> SvgExportConfig {
    let mut config = SvgExportConfig::default();
    config.title.enabled = false;
    config
}

fn texts(elements: &[Element]) -> Vec<&str> {
    elements
        .iter()
        .filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_layers_in_fixed_order() {
    let (points, edges) = square();
    let doc = SvgLayoutEngine::default().layout(&points, &edges).unwrap();
    let kinds: Vec<LayerKind> = doc.layers().iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LayerKind::Outline,
            LayerKind::InternalLines,
            LayerKind::InternalDimensions,
            LayerKind::ExternalDimensions,
            LayerKind::Ids,
        ]
    );

    let svg = doc.to_svg_string();
    for id in [
        "capa-trazo-patron",
        "capa-lineas-internas",
        "capa-medidas-internas",
        "capa-medidas-externas",
        "capa-ids-vertices",
    ] {
        assert!(svg.contains(&format!(r#"<g id="{}">"#, id)), "missing {}", id);
    }
    assert!(!svg.contains("capa-ordinadas"));
}

#[test]
fn test_every_square_edge_gets_a_length() {
    let (points, edges) = square();
    let (doc, stats) = SvgLayoutEngine::default()
        .layout_with_stats(&points, &edges)
        .unwrap();
    assert_eq!(stats.placed_dimensions, 4);
    assert_eq!(stats.dropped_dimensions, 0);

    let internal = doc.layer(LayerKind::InternalDimensions).unwrap();
    assert_eq!(texts(&internal.elements), vec!["50.0"; 4]);
}

#[test]
fn test_dimension_limit_thins_edges() {
    let (points, edges) = square();
    let mut config = untitled();
    config.dimensions.max_labels = 2;
    let (_, stats) = SvgLayoutEngine::new(config)
        .layout_with_stats(&points, &edges)
        .unwrap();
    assert_eq!(stats.placed_dimensions + stats.dropped_dimensions, 2);
}

#[test]
fn test_disabled_dimensions_leave_empty_layers() {
    let (points, edges) = square();
    let mut config = untitled();
    config.dimensions.enabled = false;
    let doc = SvgLayoutEngine::new(config).layout(&points, &edges).unwrap();
    assert!(doc.layer(LayerKind::InternalDimensions).unwrap().elements.is_empty());
    assert!(doc.layer(LayerKind::ExternalDimensions).unwrap().elements.is_empty());
}

#[test]
fn test_ordinate_layer_only_when_enabled() {
    let (points, edges) = square();
    let mut config = untitled();
    config.ordinates.enabled = true;
    let (doc, stats) = SvgLayoutEngine::new(config.clone())
        .layout_with_stats(&points, &edges)
        .unwrap();

    let ordinates = doc.layer(LayerKind::Ordinates).unwrap();
    assert_eq!(stats.placed_ordinates + stats.dropped_ordinates, 4);
    assert_eq!(ordinates.text_count(), stats.placed_ordinates);
    assert!(texts(&ordinates.elements).iter().all(|t| *t == "50.0"));
    assert!(doc.to_svg_string().contains(r#"<g id="capa-ordinadas">"#));

    config.ordinates.from_left = false;
    let (_, stats) = SvgLayoutEngine::new(config)
        .layout_with_stats(&points, &edges)
        .unwrap();
    assert_eq!(stats.placed_ordinates + stats.dropped_ordinates, 2);
}

#[test]
fn test_edge_ids_name_both_vertices() {
    let (points, edges) = square();
    let (doc, stats) = SvgLayoutEngine::new(untitled())
        .layout_with_stats(&points, &edges)
        .unwrap();
    let ids = doc.layer(LayerKind::Ids).unwrap();
    assert_eq!(stats.placed_ids, 4);
    let labels = texts(&ids.elements);
    assert_eq!(labels, vec!["0-1", "1-2", "2-3", "3-0"]);

    let dots = ids
        .elements
        .iter()
        .filter(|e| matches!(e, Element::Circle { .. }))
        .count();
    assert_eq!(dots, 4);
}

#[test]
fn test_vertex_ids_without_dots() {
    let (points, edges) = square();
    let mut config = untitled();
    config.ids.center_on_edges = false;
    config.ids.show_vertex_dots = false;
    let (doc, stats) = SvgLayoutEngine::new(config)
        .layout_with_stats(&points, &edges)
        .unwrap();

    let ids = doc.layer(LayerKind::Ids).unwrap();
    assert!(ids.elements.iter().all(|e| e.is_text()));
    assert_eq!(ids.text_count(), stats.placed_ids);
    for label in texts(&ids.elements) {
        let index: usize = label.parse().unwrap();
        assert!(index < 4);
    }
}

#[test]
fn test_title_block_escapes_user_text() {
    let (points, edges) = square();
    let mut config = SvgExportConfig::default();
    config.title.project = "Smock & <Apron>".to_string();
    config.title.author = "R. \"Lee\"".to_string();
    let svg = SvgLayoutEngine::new(config)
        .layout(&points, &edges)
        .unwrap()
        .to_svg_string();

    assert!(svg.contains(r#"<tspan font-weight="700">Project: </tspan>Smock &amp; &lt;Apron&gt;</text>"#));
    assert!(svg.contains("Author: R. &quot;Lee&quot;"));
    assert!(!svg.contains("<Apron>"));
    assert!(!svg.contains("Client:"));
    assert!(svg.contains("<rect "));
}

#[test]
fn test_title_block_can_be_disabled() {
    let (points, edges) = square();
    let svg = SvgLayoutEngine::new(untitled())
        .layout(&points, &edges)
        .unwrap()
        .to_svg_string();
    assert!(!svg.contains("<rect "));
    assert!(!svg.contains("Project:"));
}

#[test]
fn test_forced_projection_flattens_outline() {
    let (points, edges) = square();
    let mut config = untitled();
    config.canvas.projection = ProjectionMode::Xz;
    let doc = SvgLayoutEngine::new(config).layout(&points, &edges).unwrap();
    assert!((doc.width_cm() - 53.0).abs() < 1e-9);
    assert!((doc.height_cm() - 3.0).abs() < 1e-9);
}

#[test]
fn test_document_unit_in_header() {
    let (points, edges) = square();
    let mut config = untitled();
    config.canvas.document_unit = DocumentUnit::Mm;
    let svg = SvgLayoutEngine::new(config)
        .layout(&points, &edges)
        .unwrap()
        .to_svg_string();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="530.000mm" height="530.000mm" viewBox="0 0 53.000 53.000">"#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patron.svg");
    std::fs::write(&path, "stale").unwrap();

    let (points, edges) = square();
    let doc = SvgLayoutEngine::default().layout(&points, &edges).unwrap();
    doc.write_to_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, doc.to_svg_string());
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("patron.svg");
    let (points, edges) = square();
    let doc = SvgLayoutEngine::default().layout(&points, &edges).unwrap();
    assert!(matches!(doc.write_to_file(&path), Err(ExportError::Io(_))));
}
