// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for gallery and cache files

use crate::constants::FILE_PREFIX;
use crate::locator::Locator;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The user's Pictures directory (~/Pictures when XDG does not name one)
pub fn pictures_directory() -> PathBuf {
    dirs::picture_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Pictures")
    })
}

/// Gallery directory (~/Pictures/<folder>)
pub fn gallery_directory(folder: &str) -> PathBuf {
    pictures_directory().join(folder)
}

/// Cache directory for captured and picked images awaiting a save
pub fn cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(env!("CARGO_PKG_NAME"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    debug!(path = %dir.display(), "Directory ready");
    Ok(dir.to_path_buf())
}

/// Whether the directory can be listed
pub fn is_readable_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok()
}

/// Whether a file can be created in the directory (writes and removes a probe file)
pub fn is_writable_dir(dir: &Path) -> bool {
    let probe = dir.join(format!(".{}-probe-{}", FILE_PREFIX, uuid::Uuid::new_v4()));
    match std::fs::File::create(&probe) {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Directory is not writable");
            false
        }
    }
}

/// Timestamped file path in `dir` that does not exist yet
///
/// Produces `IMG_YYYYMMDD_HHMMSS.<ext>`, appending `_1`, `_2`, ... when
/// several files are created within the same second.
pub fn unique_file_path(dir: &Path, extension: &str) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let base = format!("{}_{}", FILE_PREFIX, timestamp);

    let mut candidate = dir.join(format!("{}.{}", base, extension));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = dir.join(format!("{}_{}.{}", base, counter, extension));
        counter += 1;
    }
    candidate
}

/// Copy a file into `dir` under a fresh timestamped name, keeping its extension
pub fn copy_into(source: &Path, dir: &Path) -> io::Result<PathBuf> {
    if !source.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a file", source.display()),
        ));
    }

    ensure_directory(dir)?;

    let extension = source
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    let destination = unique_file_path(dir, &extension);

    std::fs::copy(source, &destination)?;
    info!(
        source = %source.display(),
        destination = %destination.display(),
        "Image copied"
    );
    Ok(destination)
}

/// Delete the cached file behind `locator`
///
/// Only files inside `cache_dir` are touched; a locator naming any other
/// file (a gallery asset, a user's original) is left alone. Returns whether
/// a file was removed.
pub fn discard_cached(locator: &Locator, cache_dir: &Path) -> bool {
    let Some(path) = locator.to_path() else {
        return false;
    };
    if !path.starts_with(cache_dir) {
        return false;
    }
    match std::fs::remove_file(&path) {
        Ok(()) => {
            debug!(path = %path.display(), "Cached image removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to remove cached image");
            false
        }
    }
}

/// Remove images an earlier run left in the cache
///
/// Returns the number of files removed. A missing cache directory is empty.
pub fn prune_cache(cache_dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(cache_dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let is_file = entry.file_type().is_ok_and(|kind| kind.is_file());
        let ours = entry
            .file_name()
            .to_string_lossy()
            .starts_with(FILE_PREFIX);
        if !is_file || !ours {
            continue;
        }
        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Failed to prune cached image")
            }
        }
    }
    if removed > 0 {
        info!(removed, path = %cache_dir.display(), "Pruned image cache");
    }
    removed
}
