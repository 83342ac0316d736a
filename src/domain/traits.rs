use crate::domain::document;
use crate::domain::error::HutirError;
use crate::domain::model::{LocalizedString, LocalizationView};
use async_trait::async_trait;
use std::path::PathBuf;

/// Storage for per-language translation documents.
///
/// Implementations only need to locate, read and rewrite documents; lookup,
/// formatting and flattening are provided on top of `read_raw` and parse the
/// document fresh on every call. Every read operation is total: a missing
/// file, a malformed document or a missing key degrades to a default value.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Path of the document serving `language`, falling back to the default
    /// language's document. `None` when neither exists.
    async fn resolve_path(&self, language: &str) -> Option<PathBuf>;

    /// Resolved path and raw text of the document serving `language`.
    async fn read_raw(&self, language: &str) -> Option<(PathBuf, String)>;

    /// Set one leaf and persist the whole document.
    async fn try_update(&self, language: &str, key: &str, value: &str) -> Result<(), HutirError>;

    /// Supported languages whose document exists.
    async fn available_languages(&self) -> Vec<String>;

    /// Categorized view of one language's document for the admin editor.
    async fn load_view(&self, language: &str) -> LocalizationView;

    /// String leaf at `key`, or `None` when the document, a segment or the
    /// leaf is missing or the document is malformed.
    async fn find(&self, language: &str, key: &str) -> Option<String> {
        let (path, raw) = self.read_raw(language).await?;
        match document::parse(&raw) {
            Ok(doc) => document::lookup(&doc, key).map(str::to_string),
            Err(e) => {
                tracing::error!("Error parsing {} while looking up {}: {}", path.display(), key, e);
                None
            }
        }
    }

    async fn lookup(&self, language: &str, key: &str) -> String {
        self.find(language, key)
            .await
            .unwrap_or_else(|| key.to_string())
    }

    async fn lookup_formatted(&self, language: &str, key: &str, args: &[String]) -> String {
        match self.find(language, key).await {
            Some(template) => format_or_template(key, template, args),
            // A missing key is returned as itself and is not a template
            None => key.to_string(),
        }
    }

    async fn list_all(&self, language: &str) -> Vec<LocalizedString> {
        let Some((path, raw)) = self.read_raw(language).await else {
            return Vec::new();
        };
        match document::parse(&raw) {
            Ok(doc) => document::flatten(&doc),
            Err(e) => {
                tracing::error!("Error parsing {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    async fn update(&self, language: &str, key: &str, value: &str) -> bool {
        match self.try_update(language, key, value).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to update {} in {}: {}", key, language, e);
                false
            }
        }
    }
}

pub(crate) fn format_or_template(key: &str, template: String, args: &[String]) -> String {
    match document::format_positional(&template, args) {
        Some(formatted) => formatted,
        None => {
            tracing::warn!("Could not format {} with {} argument(s)", key, args.len());
            template
        }
    }
}
