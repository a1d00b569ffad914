//! Source file discovery and loading

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use importscope_core::SourceFile;

use crate::config::ScanConfig;
use crate::error::ScanError;

/// Walk `root` (honoring `.gitignore`) and return root-relative paths of
/// files with a configured extension that no exclude pattern matches,
/// sorted ascending.
pub fn discover(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot(root.to_path_buf()));
    }
    let excludes = build_globset(&config.exclude)?;

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).require_git(false).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot read entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if !config.matches_extension(relative) || excludes.is_match(relative) {
            continue;
        }
        files.push(relative.to_path_buf());
    }

    files.sort();
    tracing::debug!("Discovered {} source files under {}", files.len(), root.display());
    Ok(files)
}

/// Read one root-relative file into a [`SourceFile`] named by its
/// `/`-separated relative path.
pub fn read_source(root: &Path, relative: &Path, max_file_size: u64) -> Result<SourceFile, ScanError> {
    let path = root.join(relative);
    let metadata = std::fs::metadata(&path).map_err(|source| ScanError::Read {
        path: path.clone(),
        source,
    })?;
    if metadata.len() > max_file_size {
        return Err(ScanError::TooLarge {
            path,
            size: metadata.len(),
            limit: max_file_size,
        });
    }

    let bytes = std::fs::read(&path).map_err(|source| ScanError::Read {
        path: path.clone(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| ScanError::Decode { path })?;
    Ok(SourceFile::new(source_name(relative), content))
}

/// Display name for a root-relative path.
pub fn source_name(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ScanError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ScanError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}
