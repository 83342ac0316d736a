pub mod document;
pub mod error;
pub mod language;
pub mod model;
pub mod traits;
