//! Unit tests for configuration loading.

use std::io::Write;

use dragkit::constants::{DRAG_START_THRESHOLD, SCROLL_PROXIMITY_THRESHOLD};
use dragkit::{DragDrop, DragDropConfig, DragDropError};

use crate::helpers::FakeDom;

#[test]
fn test_load_from_file_keeps_defaults_for_missing_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "drag_start_threshold": 8, "auto_scroll_free_drag": true }}"#
    )
    .unwrap();

    let config = DragDropConfig::load(file.path()).unwrap();
    assert_eq!(config.drag_start_threshold, 8.0);
    assert!(config.auto_scroll_free_drag);
    assert_eq!(config.scroll_proximity_threshold, SCROLL_PROXIMITY_THRESHOLD);
}

#[test]
fn test_load_missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = DragDropConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dragkit.json");
    std::fs::write(&path, r#"{ "auto_scroll_step": -2 }"#).unwrap();

    let err = DragDropConfig::load(&path).unwrap_err();
    let cause = err.downcast_ref::<DragDropError>();
    assert!(matches!(cause, Some(DragDropError::Config(msg)) if msg.contains("auto_scroll_step")));
}

#[test]
fn test_load_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(DragDropConfig::load(&path).is_err());
}

#[test]
fn test_engine_refuses_invalid_config() {
    let dom = FakeDom::new(crate::helpers::VIEWPORT);
    let config = DragDropConfig {
        drag_start_threshold: f64::NAN,
        ..Default::default()
    };
    let err = DragDrop::new(dom, config).unwrap_err();
    assert!(matches!(err, DragDropError::Config(_)));
}

#[test]
fn test_engine_exposes_its_config() {
    let dom = FakeDom::new(crate::helpers::VIEWPORT);
    let dd = DragDrop::with_defaults(dom);
    assert_eq!(dd.config().drag_start_threshold, DRAG_START_THRESHOLD);
}

#[test]
fn test_logging_init_is_idempotent() {
    let first = dragkit::logging::init();
    let second = dragkit::logging::init();
    assert_eq!(first, second);
}
