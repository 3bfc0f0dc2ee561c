use tempfile::TempDir;
use tpgkit_core::{LengthUnit, TpgError};
use tpgkit_settings::{Definition, SettingsPersistence, SettingsSchema, SettingsValues};

fn schema() -> SettingsSchema {
    SettingsSchema::builder()
        .add_setting_definition(
            "default",
            Definition::length("depth", "Depth", "Final depth", 1.5, LengthUnit::Metric),
        )
        .add_setting_definition(
            "default",
            Definition::text("note", "Note", "first pass", "", ""),
        )
        .build()
        .unwrap()
}

#[test]
fn test_json_and_toml_files() {
    let dir = TempDir::new().unwrap();
    let schema = schema();
    let mut values = SettingsValues::with_defaults(&schema);
    values.set_value(&schema, "default", "depth", "3.25").unwrap();

    for name in ["values.json", "values.toml"] {
        let path = dir.path().join(name);
        values.save_to_file(&path).unwrap();
        let loaded = SettingsValues::load_from_file(&path).unwrap();
        assert_eq!(loaded, values);
        assert_eq!(loaded.selected_action(), Some("default"));
    }
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.yaml");
    let err = SettingsValues::new().save_to_file(&path).unwrap_err();
    assert!(matches!(err, TpgError::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn test_malformed_json_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = SettingsValues::load_from_file(&path).unwrap_err();
    assert!(matches!(err, TpgError::Json(_)));
}

#[test]
fn test_per_generator_store() {
    let dir = TempDir::new().unwrap();
    let store = SettingsPersistence::with_base_dir(dir.path().join("tpg"));
    let id = "299d8e22-3155-11e2-98ec-08002734b94f";
    assert!(store.load(id).unwrap().is_none());

    let schema = schema();
    let values = SettingsValues::with_defaults(&schema);
    let path = store.save(id, &values).unwrap();
    assert_eq!(path, store.values_path(id));

    let loaded = store.load(id).unwrap().unwrap();
    loaded.validate_against(&schema).unwrap();
    assert_eq!(loaded.value("note"), Some("first pass"));
}
