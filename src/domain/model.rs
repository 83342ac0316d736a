use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One flattened translation: dotted key and its string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub key: String,
    pub value: String,
}

impl LocalizedString {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// Admin editor tree view of a translation document
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceEntry {
    pub key: String,
    pub value: String,
    pub path: String,
}

impl ResourceEntry {
    pub fn full_key(&self) -> String {
        join_path(&self.path, &self.key)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceCategory {
    pub key: String,
    pub path: String,
    pub resources: Vec<ResourceEntry>,
    pub categories: Vec<ResourceCategory>,
}

impl ResourceCategory {
    pub fn full_path(&self) -> String {
        join_path(&self.path, &self.key)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LocalizationView {
    pub current_language: String,
    pub available_languages: Vec<String>,
    pub categories: Vec<ResourceCategory>,
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

// Catalog product, persisted as an element of Data/products.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(default = "new_product_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, name_en: impl Into<String>, category: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_product_id(),
            name: name.into(),
            name_en: name_en.into(),
            category: category.into(),
            description: String::new(),
            description_en: String::new(),
            image_path: String::new(),
            is_active: true,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name for the given language code.
    pub fn display_name(&self, language: &str) -> &str {
        if language == "en" && !self.name_en.is_empty() {
            &self.name_en
        } else {
            &self.name
        }
    }

    pub fn display_description(&self, language: &str) -> &str {
        if language == "en" && !self.description_en.is_empty() {
            &self.description_en
        } else {
            &self.description
        }
    }
}

fn new_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_is_active() -> bool {
    true
}

// Contact block, persisted as Data/contacts.json
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contacts {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default, rename = "WhatsAppUrl")]
    pub whatsapp_url: Option<String>,
}

impl Contacts {
    /// Record written when no contacts file exists yet.
    pub fn initial() -> Self {
        Self {
            email: "uakhutir@gmail.com".to_string(),
            phone: "0974018815".to_string(),
            facebook_url: Some("#".to_string()),
            instagram_url: Some("#".to_string()),
            whatsapp_url: Some("#".to_string()),
        }
    }
}
