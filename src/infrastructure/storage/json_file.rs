// Whole-file JSON persistence for the data records
use crate::domain::document::strip_bom;
use crate::domain::error::HutirError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, HutirError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(strip_bom(&raw))?)
}

/// Serialize indented and replace the file. No locking, last writer wins.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), HutirError> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Make sure `path` exists, seeding it from `legacy` when that file exists
/// or from `initial` otherwise. Returns true when a file was created.
pub async fn seed_file<T: Serialize + ?Sized>(
    path: &Path,
    legacy: &Path,
    initial: &T,
) -> Result<bool, HutirError> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    write_json(path, initial).await?;
    if tokio::fs::try_exists(legacy).await.unwrap_or(false) {
        match tokio::fs::copy(legacy, path).await {
            Ok(_) => tracing::info!("Moved {} to {}", legacy.display(), path.display()),
            Err(e) => tracing::error!("Failed to copy {}: {}", legacy.display(), e),
        }
    }
    Ok(true)
}
