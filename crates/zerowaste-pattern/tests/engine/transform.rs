use zerowaste_core::geometry::{polyline_length, resample_equidistant};
use zerowaste_core::{Point2, Point3};
use zerowaste_pattern::{
    BasePolygon, ControlPoints, ManualOverride, PatternMesh, RegionRange, TransformEngine,
    TransformParameters, ViewPlane,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

/// Square outline 100 design units wide with small sleeve and neck regions
fn synthetic_base() -> BasePolygon {
    let points = vec![
        Point2::new(-100.0, 100.0),
        Point2::new(-100.0, 50.0),
        Point2::new(-80.0, 46.0),
        Point2::new(-60.0, 40.0),
        Point2::new(-100.0, 45.0),
        Point2::new(-100.0, 0.0),
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 60.0),
        Point2::new(-12.0, 75.0),
        Point2::new(0.0, 61.0),
        Point2::new(0.0, 100.0),
    ];
    let control = ControlPoints {
        top_left: 0,
        sleeve_start: 1,
        armhole: 3,
        back_seam: 4,
        bottom_left: 5,
        anchor: 6,
        neck_start: 7,
        neck_base: 8,
        top_right: 10,
    };
    BasePolygon::new(
        "synthetic",
        points,
        0.05,
        RegionRange::new(1, 5),
        RegionRange::new(7, 10),
        control,
    )
    .unwrap()
}

#[test]
fn test_synthetic_global_scale() {
    let engine = TransformEngine::new(synthetic_base());
    let params = TransformParameters::default();
    let scale = engine.global_scale(&params);
    assert_close(scale.sx, 0.135, 1e-12);
    assert_close(scale.sy, 0.16, 1e-12);

    let work = engine.working_copy(&params);
    assert_close(work[5].x, -0.675, 1e-12);
    assert_close(work[0].y, 0.8, 1e-12);
}

#[test]
fn test_synthetic_transform_keeps_outer_contour() {
    let engine = TransformEngine::new(synthetic_base());
    let out = engine.transform(&TransformParameters::default()).unwrap();
    assert_eq!(out.len(), 11);
    assert_eq!(out.points()[6], Point3::new(0.0, 0.0, 0.0));
    assert_close(out.points()[5].x, -0.675, 1e-12);
    assert_close(out.points()[0].z, 0.8, 1e-12);
    assert_close(out.points()[10].z, 0.8, 1e-12);
}

#[test]
fn test_default_anchored_points() {
    let engine = TransformEngine::default();
    let out = engine.transform(&TransformParameters::default()).unwrap();
    assert_eq!(out.len(), 46);
    assert_eq!(out.view(), ViewPlane::Frontal);

    let anchor = out.points()[16];
    assert_eq!(anchor, Point3::new(0.0, 0.0, 0.0));

    let armhole = out.points()[8];
    assert_close(armhole.x, -0.3375, 1e-5);
    assert_eq!(armhole.y, 0.0);
    assert_close(armhole.z, 0.28348, 1e-5);

    let top_left = out.points()[0];
    assert_close(top_left.x, -0.675, 1e-9);
    assert_close(top_left.z, 0.8, 1e-9);
}

#[test]
fn test_top_view_uses_y_for_height() {
    let mut params = TransformParameters::default();
    params.placement.frontal_view = false;
    let out = TransformEngine::default().transform(&params).unwrap();
    assert_eq!(out.view(), ViewPlane::Top);
    assert!(out.points().iter().all(|p| p.z == 0.0));
    assert_close(out.points()[0].y, 0.8, 1e-9);
}

#[test]
fn test_placement_offsets_world_points_only() {
    let mut params = TransformParameters::default();
    params.placement.position_x_cm = 10.0;
    params.placement.position_z_cm = -5.0;
    let out = TransformEngine::default().transform(&params).unwrap();

    assert_eq!(out.points()[16], Point3::new(0.0, 0.0, 0.0));
    let world = out.world_points();
    assert_close(world[16].x, 0.10, 1e-12);
    assert_close(world[16].z, -0.05, 1e-12);
}

#[test]
fn test_classic_variant_transforms() {
    let engine = TransformEngine::new(BasePolygon::tee_classic());
    let out = engine.transform(&TransformParameters::default()).unwrap();
    assert_eq!(out.len(), 53);
    assert_eq!(out.points()[17], Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn test_non_finite_parameter_is_rejected() {
    let mut params = TransformParameters::default();
    params.sleeve.overrides.armhole_span = ManualOverride::enabled(f64::INFINITY);
    let err = TransformEngine::default().transform(&params).unwrap_err();
    assert!(err.is_parameter_error());
}

#[test]
fn test_equidistant_regions_keep_endpoints() {
    let mut params = TransformParameters::default();
    params.sleeve.equidistant = true;
    params.neck.equidistant = true;
    let engine = TransformEngine::default();
    let plain = engine.working_copy(&TransformParameters::default());
    let resampled = engine.working_copy(&params);

    for region in [engine.base().sleeve(), engine.base().neckline()] {
        assert_eq!(resampled[region.start], plain[region.start]);
        assert_eq!(resampled[region.end - 1], plain[region.end - 1]);
    }
    assert!(engine.transform(&params).is_ok());
}

fn max_shift(a: &[Point2], b: &[Point2]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| p.distance_to(q))
        .fold(0.0, f64::max)
}

#[test]
fn test_equidistant_regions_settle_when_resampled_again() {
    let mut params = TransformParameters::default();
    params.sleeve.equidistant = true;
    params.neck.equidistant = true;
    let engine = TransformEngine::default();
    let work = engine.working_copy(&params);

    for region in [engine.base().sleeve(), engine.base().neckline()] {
        let once = &work[region.indices()];
        let twice = resample_equidistant(once);
        let thrice = resample_equidistant(&twice);
        let length = polyline_length(once);

        // chords cut the corners, so curved runs drift a little and shrink
        let first = max_shift(once, &twice);
        assert!(
            first < 0.05 * length,
            "region {:?} moved {} of {}",
            region,
            first,
            length
        );
        assert!(max_shift(&twice, &thrice) < first);
    }
}

#[test]
fn test_mesh_from_default_outline() {
    let out = TransformEngine::default()
        .transform(&TransformParameters::default())
        .unwrap();
    let mesh = PatternMesh::from_polygon(&out);
    assert!(mesh.vertices.len() <= out.len());
    assert!(mesh.edges.iter().all(|&(a, b)| a != b));
    assert!(mesh.edges.len() >= mesh.vertices.len() - 1);
}
