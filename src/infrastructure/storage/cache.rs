// In-memory cache implementation using DashMap
//
// Entries expire on an absolute deadline and on a sliding idle window. A
// process-wide version token is embedded in localization keys so a single
// bump makes every older entry unreachable; those entries linger until their
// own expiry or the next `purge_expired`.
use crate::domain::model::{Contacts, LocalizedString, Product};
use dashmap::DashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Values the cache can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Text(String),
    Strings(Arc<Vec<LocalizedString>>),
    RawContent(Arc<str>),
    Products(Arc<Vec<Product>>),
    Contacts(Arc<Contacts>),
}

/// What a localization cache entry holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheSubject {
    SingleString(String),
    AllStrings,
    RawContent(String),
}

/// Composite localization key: subject, language and version token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub subject: CacheSubject,
    pub language: String,
    pub version: u64,
}

impl CacheKey {
    pub fn new(subject: CacheSubject, language: &str, version: u64) -> Self {
        Self {
            subject,
            language: language.to_string(),
            version,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            CacheSubject::SingleString(key) => {
                write!(f, "string:{}:v{}:{}", self.language, self.version, key)
            }
            CacheSubject::AllStrings => write!(f, "all:{}:v{}", self.language, self.version),
            CacheSubject::RawContent(path) => {
                write!(f, "raw:{}:v{}:{}", self.language, self.version, path)
            }
        }
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOptions {
    pub absolute: Duration,
    pub sliding: Duration,
}

impl EntryOptions {
    pub fn new(absolute: Duration, sliding: Duration) -> Self {
        Self { absolute, sliding }
    }
}

impl From<(Duration, Duration)> for EntryOptions {
    fn from((absolute, sliding): (Duration, Duration)) -> Self {
        Self::new(absolute, sliding)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    expires_at: Instant,
    sliding: Duration,
    last_accessed: Instant,
}

impl CacheEntry {
    fn new(value: CachedValue, options: EntryOptions) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now + options.absolute,
            sliding: options.sliding,
            last_accessed: now,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at || now.duration_since(self.last_accessed) >= self.sliding
    }
}

/// Thread-safe in-memory cache with a generation token for localization keys
#[derive(Debug, Default)]
pub struct MemoryCache {
    map: DashMap<String, CacheEntry>,
    // 0 means no token has been issued yet
    version: AtomicU64,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version token, issuing one on first use.
    pub fn version(&self) -> u64 {
        let current = self.version.load(Ordering::Acquire);
        if current != 0 {
            return current;
        }
        let fresh = clock_token();
        match self
            .version
            .compare_exchange(0, fresh, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                tracing::debug!("Issued localization cache version {}", fresh);
                fresh
            }
            // Another caller initialised it first
            Err(existing) => existing,
        }
    }

    /// Replace the token with a strictly greater one and return it.
    pub fn bump_version(&self) -> u64 {
        let mut next = 0;
        let _ = self
            .version
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                next = clock_token().max(prev.saturating_add(1));
                Some(next)
            });
        tracing::info!("Localization cache version bumped to {}", next);
        next
    }

    pub fn get(&self, key: &str) -> Option<CachedValue> {
        let now = Instant::now();
        {
            let mut entry = self.map.get_mut(key)?;
            if !entry.is_expired(now) {
                entry.last_accessed = now;
                return Some(entry.value.clone());
            }
        }
        // Guard dropped above; remove only if still expired
        self.map.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    pub fn insert(&self, key: impl Into<String>, value: CachedValue, options: EntryOptions) {
        self.map.insert(key.into(), CacheEntry::new(value, options));
    }

    /// Read-through lookup. Loader errors are returned and not cached.
    pub async fn get_or_load<F, Fut, E>(
        &self,
        key: impl Into<String>,
        options: EntryOptions,
        loader: F,
    ) -> Result<CachedValue, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedValue, E>>,
    {
        let key = key.into();
        if let Some(hit) = self.get(&key) {
            tracing::debug!("Cache hit: {}", key);
            return Ok(hit);
        }
        tracing::debug!("Cache miss: {}", key);
        let value = loader().await?;
        self.insert(key, value.clone(), options);
        Ok(value)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    /// Drop every entry. The version token is kept.
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Drop expired entries and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.map.len())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn clock_token() -> u64 {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| chrono::Utc::now().timestamp_micros().saturating_mul(1000));
    u64::try_from(nanos).unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long() -> EntryOptions {
        EntryOptions::new(Duration::from_secs(3600), Duration::from_secs(600))
    }

    #[test]
    fn key_embeds_subject_language_and_version() {
        let single = CacheKey::new(CacheSubject::SingleString("site.title".into()), "ua", 7);
        let all = CacheKey::new(CacheSubject::AllStrings, "en", 7);
        let raw = CacheKey::new(CacheSubject::RawContent("/r/ua.json".into()), "ua", 8);
        assert_eq!(single.to_string(), "string:ua:v7:site.title");
        assert_eq!(all.to_string(), "all:en:v7");
        assert_eq!(raw.to_string(), "raw:ua:v8:/r/ua.json");
    }

    #[test]
    fn version_is_stable_until_bumped() {
        let cache = MemoryCache::new();
        let first = cache.version();
        assert_ne!(first, 0);
        assert_eq!(cache.version(), first);
        let bumped = cache.bump_version();
        assert!(bumped > first);
        assert_eq!(cache.version(), bumped);
        assert!(cache.bump_version() > bumped);
    }

    #[test]
    fn bump_without_prior_read_still_issues_token() {
        let cache = MemoryCache::new();
        let bumped = cache.bump_version();
        assert_ne!(bumped, 0);
        assert_eq!(cache.version(), bumped);
    }

    #[test]
    fn clear_keeps_version() {
        let cache = MemoryCache::new();
        let v = cache.version();
        cache.insert("a", CachedValue::Text("x".into()), long());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.version(), v);
    }

    #[test]
    fn absolute_expiry_hides_entry() {
        let cache = MemoryCache::new();
        cache.insert(
            "k",
            CachedValue::Text("v".into()),
            EntryOptions::new(Duration::ZERO, Duration::from_secs(60)),
        );
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_removes_only_expired() {
        let cache = MemoryCache::new();
        cache.insert("live", CachedValue::Text("1".into()), long());
        cache.insert(
            "dead",
            CachedValue::Text("2".into()),
            EntryOptions::new(Duration::from_secs(60), Duration::ZERO),
        );
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("live"), Some(CachedValue::Text("1".into())));
    }
}
