//! Content core for the Hutir site: JSON translation documents behind a
//! versioned memory cache, the product catalog, contact info and backups.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::localizer::Localizer;
pub use domain::error::HutirError;
pub use infrastructure::config::Config;
pub use state::AppState;
