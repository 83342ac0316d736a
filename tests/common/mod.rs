//! Shared fixtures for the integration tests
#![allow(dead_code)]

use hutir::{AppState, Config};
use std::path::Path;
use tempfile::TempDir;

pub const UA_DOC: &str = r#"{
  "site": {
    "title": "Hutir",
    "greeting": "Вітаємо, {0}! У вас {1} замовлень"
  },
  "nav": {
    "home": "Головна",
    "about": "Про нас"
  },
  "visits": 3
}"#;

pub const EN_DOC: &str = r#"{
  "site": {
    "title": "Hutir Farm",
    "greeting": "Welcome, {0}! You have {1} orders"
  },
  "nav": {
    "home": "Home"
  }
}"#;

pub fn resources_dir(root: &Path) -> std::path::PathBuf {
    root.join("Persistent").join("Resources")
}

pub fn write_resource(root: &Path, language: &str, content: &str) {
    let dir = resources_dir(root);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{}.json", language)), content).unwrap();
}

pub fn read_resource(root: &Path, language: &str) -> String {
    std::fs::read_to_string(resources_dir(root).join(format!("{}.json", language))).unwrap()
}

/// Temp content root with the given documents, initialised like the binary does.
pub async fn state_with(docs: &[(&str, &str)], cache: bool) -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    for (language, content) in docs {
        write_resource(dir.path(), language, content);
    }
    let mut config = Config::with_content_root(dir.path());
    config.cache.enabled = cache;
    let state = AppState::init(config).await.unwrap();
    (dir, state)
}
