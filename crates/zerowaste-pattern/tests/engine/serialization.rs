use std::fs;
use tempfile::TempDir;
use zerowaste_pattern::{ManualOverride, ParameterDocument, TransformParameters};

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.json");

    let mut params = TransformParameters::default();
    params.global.target_height_cm = 85.0;
    params.sleeve.lock_lengths = true;
    params.neck.overrides.base_height = ManualOverride::enabled(62.5);
    params.placement.frontal_view = false;

    ParameterDocument::save_to_file(&params, &path).unwrap();
    let (loaded, applied) =
        ParameterDocument::load_from_file(&TransformParameters::default(), &path).unwrap();
    assert_eq!(applied, 40);
    assert_eq!(loaded, params);
}

#[test]
fn test_saved_file_uses_flat_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    ParameterDocument::save_to_file(&TransformParameters::default(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"pattern_width\""));
    assert!(content.contains("\"cuello_limitar_altura\""));
    assert!(content.contains("\"man_len_17_cm\""));
    assert!(!content.contains("\"global\""));
}

#[test]
fn test_save_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    fs::write(&path, "stale").unwrap();

    ParameterDocument::save_to_file(&TransformParameters::default(), &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with('{'));
}

#[test]
fn test_partial_file_keeps_current_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{ "pattern_height": 90.0, "cuello_scale_y": 0.8, "ui_theme": "dark" }"#,
    )
    .unwrap();

    let mut current = TransformParameters::default();
    current.global.target_width_cm = 71.0;
    let (loaded, applied) = ParameterDocument::load_from_file(&current, &path).unwrap();
    assert_eq!(applied, 2);
    assert_eq!(loaded.global.target_width_cm, 71.0);
    assert_eq!(loaded.global.target_height_cm, 90.0);
    assert_eq!(loaded.neck.scale_y, 0.8);
}

#[test]
fn test_non_object_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(ParameterDocument::load_from_file(&TransformParameters::default(), &path).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ParameterDocument::load_from_file(
        &TransformParameters::default(),
        dir.path().join("missing.json"),
    )
    .unwrap_err();
    assert!(matches!(err, zerowaste_core::Error::Io(_)));
}
