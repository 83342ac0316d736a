pub mod backup;
pub mod cache;
pub mod json_file;
pub mod resources;
