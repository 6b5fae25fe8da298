use std::fs;
use tempfile::TempDir;
use zerowaste_pattern::{
    BasePolygon, LateralEdge, ManualOverride, PatternSession, TransformParameters,
};

fn session() -> PatternSession {
    PatternSession::new(BasePolygon::default(), TransformParameters::default()).unwrap()
}

#[test]
fn test_session_starts_with_default_outline() {
    let session = session();
    assert_eq!(session.polygon().len(), 46);
    let keys = session.key_measurements().unwrap();
    assert!((keys.armhole_height_cm - 28.3).abs() < 1e-9);
}

#[test]
fn test_set_params_recomputes() {
    let mut session = session();
    let mut params = TransformParameters::default();
    params.neck.overrides.base_half_width = ManualOverride::enabled(10.0);
    session.set_params(params).unwrap();

    assert_eq!(session.revision(), 1);
    let neck_base = session.measure(31, LateralEdge::Right).unwrap();
    assert!((neck_base.lateral_cm - 10.0).abs() < 1e-9);
}

#[test]
fn test_load_parameters_applies_one_batch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    fs::write(
        &path,
        r#"{
            "man_enable_v8_bottom": true,
            "man_v8_bottom_cm": 50.0,
            "man_enable_v14_bottom": true,
            "man_v14_bottom_cm": 55.0,
            "auto_update": true
        }"#,
    )
    .unwrap();

    let mut session = session();
    let applied = session.load_parameters(&path).unwrap();
    assert_eq!(applied, 4);
    assert_eq!(session.revision(), 1);

    let keys = session.key_measurements().unwrap();
    assert!((keys.armhole_height_cm - 50.0).abs() < 1e-9);
    assert!((keys.back_seam_height_cm - 55.0).abs() < 1e-9);
}

#[test]
fn test_load_rejects_wrong_type_and_keeps_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    fs::write(&path, r#"{ "pattern_width": "not a number" }"#).unwrap();

    let mut session = session();
    assert!(session.load_parameters(&path).is_err());
    assert_eq!(session.revision(), 0);
    assert_eq!(session.params(), &TransformParameters::default());
}

#[test]
fn test_save_then_load_in_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.json");

    let mut first = session();
    let mut edit = first.edit();
    edit.global.target_width_cm = 72.0;
    edit.sleeve.overrides.armhole_span = ManualOverride::enabled(44.0);
    edit.commit().unwrap();
    first.save_parameters(&path).unwrap();

    let mut second = session();
    second.load_parameters(&path).unwrap();
    assert_eq!(second.params(), first.params());
    assert_eq!(second.polygon(), first.polygon());
}
