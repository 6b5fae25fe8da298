use zerowaste_core::GeometryError;
use zerowaste_pattern::{
    BasePolygon, KeyMeasurements, LateralEdge, ManualOverride, Measurement, MeasurementProbe,
    TransformEngine, TransformParameters, TransformedPolygon,
};

const ARMHOLE: usize = 8;
const BACK_SEAM: usize = 14;
const NECK_START: usize = 17;
const NECK_BASE: usize = 31;

fn transform(params: &TransformParameters) -> TransformedPolygon {
    TransformEngine::default().transform(params).unwrap()
}

fn measure(poly: &TransformedPolygon, index: usize, edge: LateralEdge) -> Measurement {
    MeasurementProbe::default().measure(poly, index, edge).unwrap()
}

fn assert_cm(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected} cm, got {actual} cm"
    );
}

#[test]
fn test_default_readouts() {
    let poly = transform(&TransformParameters::default());

    let armhole = measure(&poly, ARMHOLE, LateralEdge::Left);
    assert_cm(armhole.lateral_cm, 33.8);
    assert_cm(armhole.from_bottom_cm, 28.3);
    assert_cm(measure(&poly, ARMHOLE, LateralEdge::Right).lateral_cm, 33.8);

    let back_seam = measure(&poly, BACK_SEAM, LateralEdge::Left);
    assert_cm(back_seam.lateral_cm, 0.0);
    assert_cm(back_seam.from_bottom_cm, 34.0);

    let neck_base = measure(&poly, NECK_BASE, LateralEdge::Right);
    assert_cm(neck_base.lateral_cm, 9.3);
    assert_cm(neck_base.from_bottom_cm, 53.6);

    let neck_start = measure(&poly, NECK_START, LateralEdge::Right);
    assert_cm(neck_start.lateral_cm, 0.0);
    assert_cm(neck_start.from_bottom_cm, 36.0);
}

#[test]
fn test_key_measurements() {
    let poly = transform(&TransformParameters::default());
    let keys =
        KeyMeasurements::read(&poly, &BasePolygon::default(), &MeasurementProbe::default())
            .unwrap();
    assert_cm(keys.armhole_from_left_cm, 33.8);
    assert_cm(keys.armhole_height_cm, 28.3);
    assert_cm(keys.back_seam_height_cm, 34.0);
    assert_cm(keys.armhole_span_cm, 67.6);
    assert_cm(keys.neck_base_from_right_cm, 9.3);
    assert_cm(keys.neck_base_total_cm, 18.6);
    assert_cm(keys.neck_base_height_cm, 53.6);
    assert_cm(keys.neck_start_height_cm, 36.0);
}

#[test]
fn test_paired_sleeve_heights_land_exactly() {
    let mut params = TransformParameters::default();
    params.sleeve.overrides.armhole_height = ManualOverride::enabled(50.0);
    params.sleeve.overrides.back_seam_height = ManualOverride::enabled(55.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, ARMHOLE, LateralEdge::Left).from_bottom_cm, 50.0);
    assert_cm(measure(&poly, BACK_SEAM, LateralEdge::Left).from_bottom_cm, 55.0);
}

#[test]
fn test_equal_sleeve_heights_keep_minimum_gap() {
    let mut params = TransformParameters::default();
    params.sleeve.overrides.armhole_height = ManualOverride::enabled(50.0);
    params.sleeve.overrides.back_seam_height = ManualOverride::enabled(50.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, ARMHOLE, LateralEdge::Left).from_bottom_cm, 49.5);
    assert_cm(measure(&poly, BACK_SEAM, LateralEdge::Left).from_bottom_cm, 50.0);
}

#[test]
fn test_single_armhole_height_shifts_sleeve() {
    let mut params = TransformParameters::default();
    params.sleeve.overrides.armhole_height = ManualOverride::enabled(50.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, ARMHOLE, LateralEdge::Left).from_bottom_cm, 50.0);
    assert_cm(measure(&poly, BACK_SEAM, LateralEdge::Left).from_bottom_cm, 55.7);
}

#[test]
fn test_paired_neck_heights_land_exactly() {
    let mut params = TransformParameters::default();
    params.neck.overrides.base_height = ManualOverride::enabled(70.0);
    params.neck.overrides.start_height = ManualOverride::enabled(55.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, NECK_BASE, LateralEdge::Right).from_bottom_cm, 70.0);
    assert_cm(measure(&poly, NECK_START, LateralEdge::Right).from_bottom_cm, 55.0);
}

#[test]
fn test_neck_width_overrides() {
    let mut params = TransformParameters::default();
    params.neck.overrides.base_half_width = ManualOverride::enabled(10.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, NECK_BASE, LateralEdge::Right).lateral_cm, 10.0);

    let mut params = TransformParameters::default();
    params.neck.overrides.base_total_width = ManualOverride::enabled(18.0);
    params.neck.overrides.base_half_width = ManualOverride::enabled(3.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, NECK_BASE, LateralEdge::Right).lateral_cm, 9.0);
}

#[test]
fn test_armhole_span_override() {
    let mut params = TransformParameters::default();
    params.sleeve.overrides.armhole_span = ManualOverride::enabled(40.0);
    let poly = transform(&params);
    let armhole = measure(&poly, ARMHOLE, LateralEdge::Right);
    assert_cm(armhole.lateral_cm, 20.0);
    assert_cm(measure(&poly, ARMHOLE, LateralEdge::Left).lateral_cm, 47.5);
}

#[test]
fn test_armhole_lateral_override() {
    let mut params = TransformParameters::default();
    params.sleeve.overrides.armhole_lateral = ManualOverride::enabled(25.0);
    let poly = transform(&params);
    assert_cm(measure(&poly, ARMHOLE, LateralEdge::Left).lateral_cm, 25.0);
}

#[test]
fn test_probe_decimals_and_range() {
    let poly = transform(&TransformParameters::default());
    let probe = MeasurementProbe::new(3);
    let armhole = probe.measure(&poly, ARMHOLE, LateralEdge::Right).unwrap();
    assert_cm(armhole.lateral_cm, 33.75);

    assert_eq!(
        probe.measure(&poly, 99, LateralEdge::Left),
        Err(GeometryError::VertexOutOfRange { index: 99, len: 46 })
    );
}
