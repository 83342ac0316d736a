//! Configuration parsing and defaults

use hutir::infrastructure::config::{load_config, parse_config, Config};
use hutir::HutirError;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.content_root, ".");
    assert_eq!(config.persistent_dir, "Persistent");
    assert_eq!(config.default_language, "ua");
    assert_eq!(config.supported_languages, vec!["ua", "en"]);
    assert!(config.cache.enabled);
    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "WARN");
    assert!(config.logging.path.is_none());
}

#[test]
fn test_cache_expiration_defaults() {
    let cache = Config::default().cache;
    let hour = Duration::from_secs(3600);
    let minute = Duration::from_secs(60);

    assert_eq!(cache.strings(), (12 * hour, 30 * minute));
    assert_eq!(cache.content(), (6 * hour, 30 * minute));
    assert_eq!(cache.products(), (30 * minute, 10 * minute));
    assert_eq!(cache.contacts(), (24 * hour, 30 * minute));
}

#[test]
fn test_config_paths() {
    let config = Config::with_content_root("/srv/site");

    assert_eq!(config.persistent_root(), Path::new("/srv/site/Persistent"));
    assert_eq!(config.resources_dir(), Path::new("/srv/site/Persistent/Resources"));
    assert_eq!(config.data_dir(), Path::new("/srv/site/Persistent/Data"));
    assert_eq!(config.legacy_resources_dir(), Path::new("/srv/site/Resources"));
    assert_eq!(config.legacy_data_dir(), Path::new("/srv/site/Data"));
}

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
content_root = "/srv/hutir"
default_language = "en"

[cache]
enabled = false
products_absolute_secs = 60

[logging]
enable = true
path = "/tmp/hutir.log"
level = "DEBUG"
"#;

    let config = parse_config(toml_content).unwrap();
    assert_eq!(config.content_root, "/srv/hutir");
    assert_eq!(config.default_language, "en");
    assert_eq!(config.supported_languages, vec!["ua", "en"]);
    assert!(!config.cache.enabled);
    assert_eq!(config.cache.products().0, Duration::from_secs(60));
    assert_eq!(config.cache.products().1, Duration::from_secs(600));
    assert_eq!(config.logging.level, "DEBUG");
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/hutir.log"));
}

#[test]
fn test_empty_languages_rejected() {
    let result = parse_config("supported_languages = []");
    assert!(matches!(result, Err(HutirError::Config(_))));
}

#[test]
fn test_invalid_toml_rejected() {
    assert!(matches!(
        parse_config("content_root = "),
        Err(HutirError::Toml(_))
    ));
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    assert!(matches!(
        load_config(Some(path.as_path())),
        Err(HutirError::Config(_))
    ));

    std::fs::write(&path, "persistent_dir = \"Store\"").unwrap();
    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.persistent_dir, "Store");

    std::fs::write(&path, "persistent_dir = ").unwrap();
    assert!(load_config(Some(path.as_path())).is_err());
}
