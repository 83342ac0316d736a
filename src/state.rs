use crate::application::catalog::ProductService;
use crate::application::contacts::ContactsService;
use crate::application::editor::LocalizationEditor;
use crate::application::language::LanguageService;
use crate::application::localizer::Localizer;
use crate::domain::error::HutirError;
use crate::domain::traits::ResourceStore;
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::cache::MemoryCache;
use crate::infrastructure::storage::resources::JsonResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Option<Arc<MemoryCache>>,
    pub store: Arc<JsonResourceStore>,
    pub localizer: Localizer,
    pub editor: LocalizationEditor,
    pub languages: LanguageService,
    pub products: ProductService,
    pub contacts: ContactsService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cache = config.cache.enabled.then(|| Arc::new(MemoryCache::new()));
        let store = Arc::new(JsonResourceStore::new(
            config.resources_dir(),
            config.default_language.clone(),
            config.supported_languages.clone(),
        ));
        let dyn_store: Arc<dyn ResourceStore> = store.clone();

        Self {
            localizer: Localizer::new(dyn_store.clone(), cache.clone(), &config.cache),
            editor: LocalizationEditor::new(dyn_store, cache.clone(), config.default_language.clone()),
            languages: LanguageService::new(
                config.supported_languages.clone(),
                config.default_language.clone(),
            ),
            products: ProductService::new(
                config.data_dir().join("products.json"),
                cache.clone(),
                &config.cache,
            ),
            contacts: ContactsService::new(
                config.data_dir().join("contacts.json"),
                cache.clone(),
                &config.cache,
            ),
            store,
            cache,
            config: Arc::new(config),
        }
    }

    /// Build the state and make sure the persistent layout exists.
    pub async fn init(config: Config) -> Result<Self, HutirError> {
        let state = Self::new(config);
        state
            .store
            .ensure_layout(&state.config.legacy_resources_dir())
            .await?;
        state
            .products
            .ensure_layout(&state.config.legacy_data_dir().join("products.json"))
            .await?;
        state
            .contacts
            .ensure_layout(&state.config.legacy_data_dir().join("contacts.json"))
            .await?;
        Ok(state)
    }
}
