// Zip export/import of the persistent tree (Data/ and Resources/)
use crate::domain::error::HutirError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Top-level folders an archive must carry to be accepted.
pub const REQUIRED_FOLDERS: [&str; 2] = ["Data", "Resources"];

/// Archive everything beneath `root` into `archive`. Returns the file count.
pub async fn export(root: &Path, archive: &Path) -> Result<usize, HutirError> {
    let root = root.to_path_buf();
    let archive = archive.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<usize, HutirError> {
        if !root.is_dir() {
            return Err(HutirError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Persistent directory not found: {}", root.display()),
            )));
        }
        if let Some(parent) = archive.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = ZipWriter::new(File::create(&archive)?);
        // Both sides canonical so `./Persistent/a.zip` and `Persistent/a.zip` match
        let root = root.canonicalize()?;
        let archive_path = archive.canonicalize()?;
        let mut count = 0;

        for entry in walkdir::WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| HutirError::Io(io::Error::other(e)))?;
            let path = entry.path();
            // Never pack the archive into itself
            if path == archive_path {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&root) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }
            let name = archive_name(relative);

            if entry.file_type().is_dir() {
                writer.add_directory(format!("{}/", name), file_options())?;
            } else if entry.file_type().is_file() {
                writer.start_file(name, file_options())?;
                let mut source = File::open(path)?;
                io::copy(&mut source, &mut writer)?;
                count += 1;
            }
        }

        writer.finish()?.flush()?;
        tracing::info!("Exported {} files to {}", count, archive.display());
        Ok(count)
    })
    .await?
}

/// Restore an archive over `root`. The archive is validated in full before
/// anything is written; an invalid one leaves `root` untouched.
pub async fn import(archive: &Path, root: &Path) -> Result<usize, HutirError> {
    let archive = archive.to_path_buf();
    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<usize, HutirError> {
        let mut zip = ZipArchive::new(File::open(&archive)?)?;
        let entries = validate(&mut zip)?;

        std::fs::create_dir_all(&root)?;
        let mut count = 0;
        for (index, relative) in entries {
            let mut file = zip.by_index(index)?;
            let outpath = root.join(&relative);

            if file.is_dir() {
                std::fs::create_dir_all(&outpath)?;
            } else {
                if let Some(p) = outpath.parent() {
                    std::fs::create_dir_all(p)?;
                }
                let mut outfile = File::create(&outpath)?;
                io::copy(&mut file, &mut outfile)?;
                count += 1;
            }
        }

        tracing::info!("Imported {} files from {}", count, archive.display());
        Ok(count)
    })
    .await?
}

fn validate<R: io::Read + io::Seek>(
    zip: &mut ZipArchive<R>,
) -> Result<Vec<(usize, PathBuf)>, HutirError> {
    let mut entries = Vec::with_capacity(zip.len());
    let mut top_level = HashSet::new();

    for index in 0..zip.len() {
        let file = zip.by_index(index)?;
        let relative = file
            .enclosed_name()
            .filter(|p| p.components().all(|c| matches!(c, Component::Normal(_))))
            .ok_or_else(|| {
                HutirError::InvalidBackup(format!("unsafe entry path: {}", file.name()))
            })?;

        let mut components = relative.components();
        if let Some(Component::Normal(first)) = components.next() {
            // A bare top-level file does not make its name a folder
            if file.is_dir() || components.next().is_some() {
                top_level.insert(first.to_string_lossy().into_owned());
            }
        }
        entries.push((index, relative));
    }

    let missing: Vec<&str> = REQUIRED_FOLDERS
        .iter()
        .copied()
        .filter(|folder| !top_level.contains(*folder))
        .collect();
    if !missing.is_empty() {
        return Err(HutirError::InvalidBackup(format!(
            "missing top-level folder(s): {}",
            missing.join(", ")
        )));
    }
    Ok(entries)
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

// Zip entry names always use forward slashes
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
