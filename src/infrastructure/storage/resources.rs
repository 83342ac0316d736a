// JSON-file backed translation documents: {resources_dir}/{language}.json
use crate::domain::document;
use crate::domain::error::HutirError;
use crate::domain::language::normalize;
use crate::domain::model::LocalizationView;
use crate::domain::traits::ResourceStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct JsonResourceStore {
    root: PathBuf,
    default_language: String,
    supported_languages: Vec<String>,
}

impl JsonResourceStore {
    pub fn new(
        root: impl Into<PathBuf>,
        default_language: impl Into<String>,
        supported_languages: Vec<String>,
    ) -> Self {
        Self {
            root: root.into(),
            default_language: normalize(&default_language.into()),
            supported_languages: supported_languages.iter().map(|l| normalize(l)).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Only configured languages ever become file names.
    pub fn is_supported(&self, language: &str) -> bool {
        self.supported_languages.contains(&normalize(language))
    }

    /// Path a language's document would have, whether or not it exists.
    pub fn language_path(&self, language: &str) -> PathBuf {
        self.root.join(format!("{}.json", normalize(language)))
    }

    /// Create the resources directory and carry documents over from the
    /// legacy directory when the new location has none.
    pub async fn ensure_layout(&self, legacy_dir: &Path) -> Result<(), HutirError> {
        tokio::fs::create_dir_all(&self.root).await?;

        for language in &self.supported_languages {
            let target = self.language_path(language);
            let legacy = legacy_dir.join(format!("{}.json", language));
            if !exists(&target).await && exists(&legacy).await {
                match tokio::fs::copy(&legacy, &target).await {
                    Ok(_) => tracing::info!(
                        "Moved resource file {}.json to {}",
                        language,
                        self.root.display()
                    ),
                    Err(e) => tracing::error!(
                        "Failed to copy legacy resource file {}: {}",
                        legacy.display(),
                        e
                    ),
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceStore for JsonResourceStore {
    async fn resolve_path(&self, language: &str) -> Option<PathBuf> {
        let requested = self.language_path(language);
        if self.is_supported(language) && exists(&requested).await {
            return Some(requested);
        }

        let fallback = self.language_path(&self.default_language);
        if exists(&fallback).await {
            tracing::debug!(
                "No resource file for {}, falling back to {}",
                language,
                self.default_language
            );
            return Some(fallback);
        }

        tracing::warn!(
            "Resource file not found: {} (default {} also missing)",
            requested.display(),
            self.default_language
        );
        None
    }

    async fn read_raw(&self, language: &str) -> Option<(PathBuf, String)> {
        let path = self.resolve_path(language).await?;
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Some((path, raw)),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn try_update(&self, language: &str, key: &str, value: &str) -> Result<(), HutirError> {
        if !self.is_supported(language) {
            return Err(HutirError::UnsupportedLanguage(language.to_string()));
        }
        // Edits target the named language only, never the fallback document
        let path = self.language_path(language);
        if !exists(&path).await {
            return Err(HutirError::ResourceNotFound(normalize(language)));
        }

        let raw = tokio::fs::read_to_string(&path).await?;
        let mut doc = document::parse(&raw)?;
        document::set_leaf(&mut doc, key, value)?;
        let updated = document::to_pretty(&doc)?;

        // Whole-file rewrite, not atomic: a concurrent reader may see a torn file
        tokio::fs::write(&path, updated).await?;
        tracing::info!("Updated {} in {}", key, path.display());
        Ok(())
    }

    async fn available_languages(&self) -> Vec<String> {
        let mut languages = Vec::new();
        for language in &self.supported_languages {
            if exists(&self.language_path(language)).await {
                languages.push(language.clone());
            }
        }
        languages
    }

    async fn load_view(&self, language: &str) -> LocalizationView {
        let language = normalize(language);
        let mut view = LocalizationView {
            current_language: language.clone(),
            available_languages: self.available_languages().await,
            categories: Vec::new(),
        };
        if !self.is_supported(&language) {
            tracing::warn!("Unsupported language requested in editor: {}", language);
            return view;
        }

        let path = self.language_path(&language);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Resource file not readable: {}: {}", path.display(), e);
                return view;
            }
        };
        match document::parse(&raw) {
            Ok(doc) => view.categories = document::build_view(&doc),
            Err(e) => tracing::error!(
                "Error reading localization resources for language {}: {}",
                language,
                e
            ),
        }
        view
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
