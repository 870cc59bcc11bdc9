use notepane_core::{
    CatalogError, ConfigError, ContentListing, ForestLevel, HeaderDefaults, Organizer,
    OrganizerConfig, PlaceholderRenderer, StaticCatalog,
};
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn config_file_overrides_headers_and_catalog() {
    let catalog_file = write_temp(
        r#"{"notebooks":[{"label":"Work","sections":[{"label":"Q1","pages":["Plan"]}]}]}"#,
    );
    let config_json = serde_json::json!({
        "logging": { "level": "warn" },
        "headers": { "sections": "Abschnitte", "pages": "Seiten" },
        "catalog_path": catalog_file.path(),
    });
    let config_file = write_temp(&config_json.to_string());

    let config = OrganizerConfig::load(config_file.path()).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.log_dir.is_none());

    let mut organizer = Organizer::from_config(&config).unwrap();
    organizer.start().unwrap();

    let notebooks = organizer.store().forest(ForestLevel::Notebook);
    assert_eq!(notebooks.roots().len(), 1);
    assert_eq!(organizer.view().section_header, "Work");
    assert_eq!(organizer.view().page_header, "Q1");
    assert!(organizer.editor_text().contains("page 'Plan' in section 'Q1' of notebook 'Work'"));

    organizer.select_notebook(None).unwrap();
    assert_eq!(organizer.view().section_header, "Abschnitte");
    assert_eq!(organizer.view().page_header, "Seiten");
}

#[test]
fn padded_catalog_labels_still_cascade() {
    let catalog = StaticCatalog::from_json_str(
        r#"{"notebooks":[{"label":" N ","sections":[{"label":" s ","pages":["p "]}]}]}"#,
    )
    .unwrap();
    let mut organizer = Organizer::new(
        Box::new(catalog),
        Box::new(PlaceholderRenderer),
        HeaderDefaults::default(),
    );

    organizer.start().unwrap();

    assert_eq!(organizer.store().sections().len(), 1);
    assert_eq!(organizer.store().pages().len(), 1);
    assert_eq!(organizer.view().page_header, "s");
    assert!(organizer.editor_text().contains("page 'p' in section 's' of notebook 'N'"));
}

#[test]
fn missing_config_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = OrganizerConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_config_reports_parse_error() {
    let file = write_temp("{ not json");
    let err = OrganizerConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_catalog_file_fails_session_construction() {
    let dir = tempfile::tempdir().unwrap();
    let config = OrganizerConfig {
        catalog_path: Some(dir.path().join("catalog.json")),
        ..OrganizerConfig::default()
    };

    let err = Organizer::from_config(&config).err().unwrap();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn catalog_round_trips_through_json_file() {
    let seeded = StaticCatalog::seeded();
    let file = write_temp(&serde_json::to_string_pretty(&seeded).unwrap());

    let loaded = StaticCatalog::load(file.path()).unwrap();

    assert_eq!(loaded, seeded);
    assert_eq!(loaded.list_sections("Aspekte B1-B2").unwrap().len(), 3);
}
