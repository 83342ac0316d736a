use crate::domain::error::HutirError;
use crate::domain::model::Product;
use crate::infrastructure::config::CacheSettings;
use crate::infrastructure::storage::cache::{CachedValue, EntryOptions, MemoryCache};
use crate::infrastructure::storage::json_file::{read_json, seed_file, write_json};
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PRODUCTS_CACHE_KEY: &str = "AllProducts";
const ACTIVE_PRODUCTS_CACHE_KEY: &str = "ActiveProducts";

/// Product catalog stored as one JSON array. The whole collection is cached
/// and every write drops it.
#[derive(Clone)]
pub struct ProductService {
    path: PathBuf,
    cache: Option<Arc<MemoryCache>>,
    ttl: EntryOptions,
}

impl ProductService {
    pub fn new(path: impl Into<PathBuf>, cache: Option<Arc<MemoryCache>>, settings: &CacheSettings) -> Self {
        Self {
            path: path.into(),
            cache,
            ttl: settings.products().into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty catalog, or copy the legacy one, when none exists.
    pub async fn ensure_layout(&self, legacy: &Path) -> Result<(), HutirError> {
        if seed_file(&self.path, legacy, &Vec::<Product>::new()).await? {
            tracing::info!("Created product catalog at {}", self.path.display());
        }
        Ok(())
    }

    pub async fn all(&self) -> Vec<Product> {
        self.all_shared().await.as_ref().clone()
    }

    /// Active products ordered by `SortOrder`.
    pub async fn active(&self) -> Vec<Product> {
        let Some(cache) = self.cache.as_deref() else {
            return filter_active(&self.all_shared().await);
        };
        let loaded = cache
            .get_or_load(ACTIVE_PRODUCTS_CACHE_KEY, self.ttl, || async move {
                Ok::<_, ()>(CachedValue::Products(Arc::new(filter_active(
                    &self.all_shared().await,
                ))))
            })
            .await;
        match loaded {
            Ok(CachedValue::Products(products)) => products.as_ref().clone(),
            _ => Vec::new(),
        }
    }

    pub async fn by_id(&self, id: &str) -> Option<Product> {
        self.all_shared().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn add(&self, product: Product) -> bool {
        let id = product.id.clone();
        self.modify("add", &id, |products| {
            products.push(product);
            true
        })
        .await
    }

    /// Replace the product with the same id. `CreatedAt` is kept from the
    /// stored record and `UpdatedAt` is stamped now.
    pub async fn update(&self, mut product: Product) -> bool {
        let id = product.id.clone();
        self.modify("update", &id, |products| {
            match products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => {
                    product.created_at = existing.created_at;
                    product.updated_at = Utc::now();
                    *existing = product;
                    true
                }
                None => false,
            }
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> bool {
        self.modify("delete", id, |products| {
            let before = products.len();
            products.retain(|p| p.id != id);
            products.len() != before
        })
        .await
    }

    /// Flip `IsActive`. Returns the new state, or `None` when not found or
    /// the write failed.
    pub async fn toggle(&self, id: &str) -> Option<bool> {
        let mut state = None;
        let saved = self
            .modify("toggle", id, |products| {
                let Some(product) = products.iter_mut().find(|p| p.id == id) else {
                    return false;
                };
                product.is_active = !product.is_active;
                product.updated_at = Utc::now();
                state = Some(product.is_active);
                true
            })
            .await;
        if saved {
            state
        } else {
            None
        }
    }

    async fn all_shared(&self) -> Arc<Vec<Product>> {
        let Some(cache) = self.cache.as_deref() else {
            return Arc::new(self.load().await.unwrap_or_default());
        };
        let loaded = cache
            .get_or_load(PRODUCTS_CACHE_KEY, self.ttl, || async move {
                self.load()
                    .await
                    .map(|p| CachedValue::Products(Arc::new(p)))
                    .ok_or(())
            })
            .await;
        match loaded {
            Ok(CachedValue::Products(products)) => products,
            _ => Arc::new(Vec::new()),
        }
    }

    async fn load(&self) -> Option<Vec<Product>> {
        match read_json::<Vec<Product>>(&self.path).await {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::error!("Error loading products from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    // Writes always start from the file, never from a possibly stale cache
    async fn load_for_write(&self) -> Result<Vec<Product>, HutirError> {
        match read_json::<Vec<Product>>(&self.path).await {
            Err(HutirError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            other => other,
        }
    }

    async fn modify<F>(&self, action: &str, id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Vec<Product>) -> bool,
    {
        let mut products = match self.load_for_write().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!("Error reading products before {} {}: {}", action, id, e);
                return false;
            }
        };
        if !apply(&mut products) {
            tracing::warn!("Product {} not found for {}", id, action);
            return false;
        }
        if let Err(e) = write_json(&self.path, &products).await {
            tracing::error!("Error saving products after {} {}: {}", action, id, e);
            return false;
        }
        self.clear_cache();
        tracing::info!("Product {} {}", id, past_tense(action));
        true
    }

    fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.remove(PRODUCTS_CACHE_KEY);
            cache.remove(ACTIVE_PRODUCTS_CACHE_KEY);
        }
    }
}

fn filter_active(products: &[Product]) -> Vec<Product> {
    let mut active: Vec<Product> = products.iter().filter(|p| p.is_active).cloned().collect();
    active.sort_by_key(|p| p.sort_order);
    active
}

fn past_tense(action: &str) -> &str {
    match action {
        "add" => "added",
        "update" => "updated",
        "delete" => "deleted",
        "toggle" => "toggled",
        other => other,
    }
}
