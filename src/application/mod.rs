pub mod backup;
pub mod catalog;
pub mod contacts;
pub mod editor;
pub mod language;
pub mod localizer;
pub mod preload;
