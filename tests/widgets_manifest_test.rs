use anyhow::Result;
use dashkit::core::widgets::MissingToolkit;
use dashkit::domain::model::WidgetKind;
use dashkit::{BootstrapInitializer, DashError, StaticDocument, WidgetRegistry};
use tempfile::TempDir;

const RESULT_PAGE: &str = r#"{
  "elements": [
    {"id": "download-md", "attributes": {"data-bs-toggle": "tooltip", "title": "Markdown"}},
    {"id": "download-json", "attributes": {"data-bs-toggle": "tooltip", "title": "JSON"}},
    {"id": "copy-toast", "classes": ["toast", "align-items-center"]},
    {"id": "delete-toast", "classes": ["toast"]},
    {"id": "nav", "classes": ["navbar"]}
  ]
}"#;

#[test]
fn test_manifest_file_binds_widgets() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("result.json");
    std::fs::write(&path, RESULT_PAGE)?;

    let document = StaticDocument::from_file(&path)?;
    let mut registry = WidgetRegistry::new();
    let report = BootstrapInitializer::new().on_ready(&document, &mut registry)?;

    assert_eq!(document.len(), 5);
    assert_eq!(report.tooltips, 2);
    assert_eq!(report.toasts, 2);
    assert_eq!(registry.count(WidgetKind::Tooltip), 2);
    assert_eq!(registry.bindings()[2].element_id, "copy-toast");
    Ok(())
}

#[test]
fn test_missing_manifest_is_io_error() {
    let result = StaticDocument::from_file("/nonexistent/page.json");
    assert!(matches!(result, Err(DashError::IoError(_))));
}

#[test]
fn test_toolkit_failure_propagates() -> Result<()> {
    let document = StaticDocument::from_json_str(RESULT_PAGE)?;
    let init = BootstrapInitializer::new();

    let err = init
        .on_ready(&document, &mut MissingToolkit)
        .expect_err("no toolkit loaded");

    assert!(matches!(err, DashError::WidgetError { .. }));
    assert!(init.is_initialized());
    Ok(())
}
