use pf_app::{AppError, ParameterSet, load_parameters, reload_parameters, save_parameters};
use pf_project::ProjectError;
use std::fs;

#[test]
fn save_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("launcher.yaml");
    let saved = ParameterSet {
        p0: 150_000.0,
        ..Default::default()
    };
    save_parameters(&path, &saved).unwrap();

    let mut current = ParameterSet::default();
    reload_parameters(&path, &mut current).unwrap();
    assert_eq!(current, saved);
}

#[test]
fn failed_reload_keeps_current_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    let mut doc = serde_json::to_value(ParameterSet::default()).unwrap();
    doc.as_object_mut().unwrap().remove("k");
    fs::write(&path, doc.to_string()).unwrap();

    let mut current = ParameterSet {
        xso: 0.03,
        ..Default::default()
    };
    let before = current;
    let err = reload_parameters(&path, &mut current).unwrap_err();
    assert_eq!(current, before);
    match err {
        AppError::Persistence(ProjectError::MissingKeys { keys }) => assert_eq!(keys, vec!["k"]),
        other => panic!("expected missing keys, got {other:?}"),
    }
}

#[test]
fn invalid_values_in_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let mut doc = serde_json::to_value(ParameterSet::default()).unwrap();
    doc["end_time"] = serde_json::json!(-1.0);
    fs::write(&path, doc.to_string()).unwrap();

    assert!(matches!(
        load_parameters(&path),
        Err(AppError::Persistence(ProjectError::Validation(_)))
    ));
}
