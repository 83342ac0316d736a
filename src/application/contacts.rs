use crate::domain::error::HutirError;
use crate::domain::model::Contacts;
use crate::infrastructure::config::CacheSettings;
use crate::infrastructure::storage::cache::{CachedValue, EntryOptions, MemoryCache};
use crate::infrastructure::storage::json_file::{read_json, seed_file, write_json};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CONTACTS_CACHE_KEY: &str = "Contacts";

#[derive(Clone)]
pub struct ContactsService {
    path: PathBuf,
    cache: Option<Arc<MemoryCache>>,
    ttl: EntryOptions,
}

impl ContactsService {
    pub fn new(path: impl Into<PathBuf>, cache: Option<Arc<MemoryCache>>, settings: &CacheSettings) -> Self {
        Self {
            path: path.into(),
            cache,
            ttl: settings.contacts().into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn ensure_layout(&self, legacy: &Path) -> Result<(), HutirError> {
        if seed_file(&self.path, legacy, &Contacts::initial()).await? {
            tracing::info!("Created contacts file at {}", self.path.display());
        }
        Ok(())
    }

    /// Stored contacts; an unreadable file yields an empty record.
    pub async fn get(&self) -> Contacts {
        let Some(cache) = self.cache.as_deref() else {
            return self.load().await.unwrap_or_default();
        };
        let loaded = cache
            .get_or_load(CONTACTS_CACHE_KEY, self.ttl, || async move {
                self.load()
                    .await
                    .map(|c| CachedValue::Contacts(Arc::new(c)))
                    .ok_or(())
            })
            .await;
        match loaded {
            Ok(CachedValue::Contacts(contacts)) => contacts.as_ref().clone(),
            _ => Contacts::default(),
        }
    }

    pub async fn update(&self, contacts: &Contacts) -> bool {
        if let Err(e) = write_json(&self.path, contacts).await {
            tracing::error!("Error saving contacts to {}: {}", self.path.display(), e);
            return false;
        }
        if let Some(cache) = &self.cache {
            cache.remove(CONTACTS_CACHE_KEY);
        }
        tracing::info!("Contacts updated");
        true
    }

    async fn load(&self) -> Option<Contacts> {
        match read_json::<Contacts>(&self.path).await {
            Ok(contacts) => Some(contacts),
            Err(e) => {
                tracing::error!("Error loading contacts from {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
