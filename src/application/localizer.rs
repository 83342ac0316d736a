//! Cached translation lookups.
//!
//! Every cached entry is keyed by subject, language and the cache's current
//! version token. Single-key and all-strings entries are built from a cached
//! copy of the raw document text, so a miss on either costs one parse and no
//! extra disk read while the raw entry is warm. Editors invalidate by bumping
//! the version; `invalidate` exists for call sites that only need the
//! all-strings and raw entries of one language dropped.

use crate::domain::document;
use crate::domain::language::normalize;
use crate::domain::model::LocalizedString;
use crate::domain::traits::{format_or_template, ResourceStore};
use crate::infrastructure::config::CacheSettings;
use crate::infrastructure::storage::cache::{
    CacheKey, CacheSubject, CachedValue, EntryOptions, MemoryCache,
};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Localizer {
    store: Arc<dyn ResourceStore>,
    cache: Option<Arc<MemoryCache>>,
    strings_ttl: EntryOptions,
    content_ttl: EntryOptions,
}

impl Localizer {
    /// `cache` is optional; without it every call parses the file directly.
    pub fn new(
        store: Arc<dyn ResourceStore>,
        cache: Option<Arc<MemoryCache>>,
        settings: &CacheSettings,
    ) -> Self {
        Self {
            store,
            cache,
            strings_ttl: settings.strings().into(),
            content_ttl: settings.content().into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    pub fn cache(&self) -> Option<&Arc<MemoryCache>> {
        self.cache.as_ref()
    }

    /// Translation for `key`, or `key` itself when it has none.
    pub async fn get_string(&self, language: &str, key: &str) -> String {
        self.find_string(language, key)
            .await
            .unwrap_or_else(|| key.to_string())
    }

    /// Translation with `{0}`-style positional arguments applied. A missing
    /// key is returned as-is without formatting.
    pub async fn get_formatted(&self, language: &str, key: &str, args: &[String]) -> String {
        match self.find_string(language, key).await {
            Some(template) => format_or_template(key, template, args),
            None => key.to_string(),
        }
    }

    /// Every translation of a language, flattened in document order.
    pub async fn get_all_strings(&self, language: &str) -> Arc<Vec<LocalizedString>> {
        let language = normalize(language);
        let Some(cache) = self.cache.as_deref() else {
            return Arc::new(self.store.list_all(&language).await);
        };

        let version = cache.version();
        let cache_key = CacheKey::new(CacheSubject::AllStrings, &language, version);
        let language = language.as_str();
        let loaded = cache
            .get_or_load(cache_key, self.strings_ttl, || async move {
                let raw = self.raw_content(cache, language, version).await.ok_or(())?;
                let doc = parse_logged(&raw, language).ok_or(())?;
                let strings = document::flatten(&doc);
                tracing::debug!("Cached {} strings for {}", strings.len(), language);
                Ok::<_, ()>(CachedValue::Strings(Arc::new(strings)))
            })
            .await;

        match loaded {
            Ok(CachedValue::Strings(strings)) => strings,
            _ => Arc::new(Vec::new()),
        }
    }

    /// Drop the all-strings and raw-content entries of one language under the
    /// current version. Single-key entries are not reached; use
    /// `MemoryCache::bump_version` for complete invalidation.
    pub async fn invalidate(&self, language: &str) {
        let Some(cache) = self.cache.as_deref() else {
            return;
        };
        let language = normalize(language);
        let version = cache.version();

        cache.remove(&CacheKey::new(CacheSubject::AllStrings, &language, version).to_string());
        if let Some(path) = self.store.resolve_path(&language).await {
            cache.remove(&raw_key(&path, &language, version).to_string());
        }
        tracing::info!("Cleared cached strings for {}", language);
    }

    async fn find_string(&self, language: &str, key: &str) -> Option<String> {
        let language = normalize(language);
        let Some(cache) = self.cache.as_deref() else {
            return self.store.find(&language, key).await;
        };

        let version = cache.version();
        let cache_key = CacheKey::new(
            CacheSubject::SingleString(key.to_string()),
            &language,
            version,
        );
        let language = language.as_str();
        let loaded = cache
            .get_or_load(cache_key, self.strings_ttl, || async move {
                let raw = self.raw_content(cache, language, version).await.ok_or(())?;
                let doc = parse_logged(&raw, language).ok_or(())?;
                match document::lookup(&doc, key) {
                    Some(value) => Ok(CachedValue::Text(value.to_string())),
                    // Misses are not cached so a later addition shows up
                    None => Err(()),
                }
            })
            .await;

        match loaded {
            Ok(CachedValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    async fn raw_content(
        &self,
        cache: &MemoryCache,
        language: &str,
        version: u64,
    ) -> Option<Arc<str>> {
        let path = self.store.resolve_path(language).await?;
        let store = &self.store;
        let loaded = cache
            .get_or_load(raw_key(&path, language, version), self.content_ttl, || async move {
                match store.read_raw(language).await {
                    Some((_, raw)) => Ok(CachedValue::RawContent(Arc::from(raw))),
                    None => Err(()),
                }
            })
            .await;

        match loaded {
            Ok(CachedValue::RawContent(raw)) => Some(raw),
            _ => None,
        }
    }
}

fn raw_key(path: &Path, language: &str, version: u64) -> CacheKey {
    CacheKey::new(
        CacheSubject::RawContent(path.display().to_string()),
        language,
        version,
    )
}

fn parse_logged(raw: &str, language: &str) -> Option<serde_json::Value> {
    match document::parse(raw) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::error!("Malformed resource document for {}: {}", language, e);
            None
        }
    }
}
