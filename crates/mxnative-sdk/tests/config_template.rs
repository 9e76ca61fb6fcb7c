//! Public behavior of the config template processor.

use std::fs;

use mxnative_sdk::template::PLACEHOLDER_KEYS;
use mxnative_sdk::{AppSettings, ConfigTemplateProcessor, TemplateError};
use tempfile::TempDir;

const TEMPLATE: &str = r#"{"id": "app_identifier", "name": "app_name", "ver": "app_version", "build": build_number, "url": "runtime_url"}"#;

fn settings() -> AppSettings {
    AppSettings {
        app_identifier: "myapp.nativeapp02".to_string(),
        app_name: "NativeApp02".to_string(),
        app_version: "1.0.0".to_string(),
        build_number: 1,
        runtime_url: "http://192.168.0.42:8080".to_string(),
    }
}

#[test]
fn renders_native_template_config() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template_config.json");
    fs::write(&template, TEMPLATE).unwrap();
    let output = temp_dir.path().join("config.json");

    ConfigTemplateProcessor::from_settings(&template, &settings())
        .write(&output)
        .unwrap();

    let rendered = fs::read_to_string(&output).unwrap();
    assert_eq!(
        rendered,
        r#"{"id": "myapp.nativeapp02", "name": "NativeApp02", "ver": "1.0.0", "build": 1, "url": "http://192.168.0.42:8080"}"#
    );
    for key in PLACEHOLDER_KEYS {
        assert!(!rendered.contains(key), "{} left in output", key);
    }
}

#[test]
fn occurrence_counts_drop_by_replaced_matches() {
    let processor = ConfigTemplateProcessor::from_settings("unused.json", &settings());
    let text = "runtime_url runtime_url_backup xruntime_url";
    assert_eq!(text.matches("runtime_url").count(), 3);

    let rendered = processor.render(text);
    assert_eq!(rendered.matches("runtime_url").count(), 0);
    assert_eq!(rendered.matches("http://192.168.0.42:8080").count(), 3);
}

#[test]
fn accepts_any_displayable_value() {
    let processor = ConfigTemplateProcessor::new("unused.json", 'c', 2.5, 3u8, -4i64, true);
    assert_eq!(
        processor.render("app_identifier|app_name|app_version|build_number|runtime_url"),
        "c|2.5|3|-4|true"
    );
}

#[test]
fn write_error_leaves_nothing_behind() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("t.json");
    fs::write(&template, TEMPLATE).unwrap();
    let missing_parent = temp_dir.path().join("android");
    let output = missing_parent.join("config.json");

    let err = ConfigTemplateProcessor::from_settings(&template, &settings())
        .write(&output)
        .unwrap_err();

    assert!(matches!(err, TemplateError::Write { ref path, .. } if path == &output));
    assert!(!missing_parent.exists());
}

#[test]
fn not_found_is_raised_before_destination_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("config.json");

    let err = ConfigTemplateProcessor::from_settings(temp_dir.path().join("nope.json"), &settings())
        .write(&output)
        .unwrap_err();

    assert!(matches!(err, TemplateError::NotFound { .. }));
    assert!(!output.exists());
}
