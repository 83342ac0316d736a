use crate::domain::language::normalize;
use crate::domain::model::LocalizationView;
use crate::domain::traits::ResourceStore;
use crate::infrastructure::storage::cache::MemoryCache;
use std::sync::Arc;

/// Admin-side editing of translation documents.
///
/// Every successful edit bumps the cache version, which retires all cached
/// localization entries at once, including single-key lookups.
#[derive(Clone)]
pub struct LocalizationEditor {
    store: Arc<dyn ResourceStore>,
    cache: Option<Arc<MemoryCache>>,
    default_language: String,
}

impl LocalizationEditor {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        cache: Option<Arc<MemoryCache>>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            default_language: normalize(&default_language.into()),
        }
    }

    pub async fn available_languages(&self) -> Vec<String> {
        self.store.available_languages().await
    }

    /// Editor tree for `language`, or for the first available language when
    /// that one has no document.
    pub async fn view(&self, language: &str) -> LocalizationView {
        let requested = normalize(language);
        let available = self.available_languages().await;
        let language = if available.contains(&requested) {
            requested
        } else {
            available
                .first()
                .cloned()
                .unwrap_or_else(|| self.default_language.clone())
        };
        self.store.load_view(&language).await
    }

    /// Write one value and invalidate. The reason for a failure is logged.
    pub async fn update_resource(&self, language: &str, key: &str, value: &str) -> bool {
        if !self.store.update(language, key, value).await {
            return false;
        }
        if let Some(cache) = &self.cache {
            cache.bump_version();
        }
        true
    }
}
