//! Catalogue loading from disk
//!
//! Uses temporary files so every case controls the exact bytes on disk.

use std::io::Write;
use std::path::Path;

use bakfiets::{Catalogue, LoadError};
use tempfile::NamedTempFile;

fn write_catalogue(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_valid_catalogue() {
    let file = write_catalogue(
        r#"{"brands": {"acme": {"name": "Acme", "models": {
            "cargo": {"name": "Cargo", "dailyPrice": 20, "options": {
                "rain_cover": {"name": "Rain cover", "dailyPrice": 3}
            }}
        }}}}"#,
    );

    let catalogue = Catalogue::load_from_file(file.path()).unwrap();
    let brand = catalogue.brand("acme").unwrap();
    let model = brand.model("cargo").unwrap();
    assert_eq!(brand.name, "Acme");
    assert_eq!(model.daily_price, 20);
    assert_eq!(model.option("rain_cover").unwrap().daily_price, 3);
    assert_eq!(catalogue.option_count(), 1);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storedata.json");
    match Catalogue::load_from_file(&path) {
        Err(LoadError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Read error, got {:?}", other),
    }
}

#[test]
fn test_truncated_json_is_malformed() {
    let file = write_catalogue(r#"{"brands": {"acme": {"name": "Acme""#);
    assert!(matches!(
        Catalogue::load_from_file(file.path()),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn test_negative_price_is_malformed() {
    let file = write_catalogue(
        r#"{"brands": {"acme": {"name": "Acme", "models": {
            "cargo": {"name": "Cargo", "dailyPrice": -1}
        }}}}"#,
    );
    assert!(matches!(
        Catalogue::load_from_file(file.path()),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn test_empty_document_is_an_empty_catalogue() {
    let file = write_catalogue("{}");
    let catalogue = Catalogue::load_from_file(file.path()).unwrap();
    assert!(catalogue.is_empty());
}

#[test]
fn test_bundled_catalogue_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/storedata.json");
    let catalogue = Catalogue::load_from_file(path).unwrap();
    assert!(!catalogue.is_empty());
    let cargo = catalogue.brand("acme").unwrap().model("cargo").unwrap();
    assert_eq!(cargo.daily_price, 20);
    assert_eq!(cargo.option("rain_cover").unwrap().daily_price, 3);
}
