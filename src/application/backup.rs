use crate::domain::error::HutirError;
use crate::infrastructure::storage::backup;
use crate::state::AppState;
use std::path::Path;

/// Archive the whole persistent tree.
pub async fn export_backup(state: &AppState, archive: &Path) -> Result<usize, HutirError> {
    backup::export(&state.config.persistent_root(), archive).await
}

/// Restore an archive over the persistent tree and drop every cached entry.
/// An archive without both top-level folders is rejected untouched.
pub async fn import_backup(state: &AppState, archive: &Path) -> Result<usize, HutirError> {
    let count = backup::import(archive, &state.config.persistent_root()).await?;
    if let Some(cache) = &state.cache {
        cache.clear();
        cache.bump_version();
    }
    Ok(count)
}
