// src/watch/target.rs

//! Watch-target resolution and extension filtering.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Which files count as relevant under a watched directory root.
///
/// Immutable after construction; the extension is normalized once so the
/// per-event relevance check stays a plain suffix comparison.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    root: PathBuf,
    extension: String,
}

impl WatchTarget {
    /// Build a target from a directory root and an extension.
    ///
    /// The extension is trimmed and given a leading dot when missing, so
    /// `"rs"` and `".rs"` are equivalent.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: normalize_extension(extension),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The dotted extension, e.g. `".rs"`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Case-sensitive suffix test on a file name or path.
    pub fn is_relevant(&self, name: &str) -> bool {
        name.ends_with(&self.extension)
    }

    /// All files under the root whose name matches the extension, collected
    /// by a recursive walk. Backends that register per-file interest need
    /// this full set up front.
    pub fn matching_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        collect_matching(&self.root, &self.extension, &mut files)
            .with_context(|| format!("walking {}", self.root.display()))?;
        Ok(files)
    }
}

/// Resolve the CLI target path into the directory to watch: a file watches
/// its parent directory, a directory watches itself.
pub fn resolve_watch_root(target: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(target)
        .with_context(|| format!("inspecting {}", target.display()))?;
    if metadata.is_dir() {
        Ok(target.to_path_buf())
    } else {
        Ok(target.parent().unwrap_or(Path::new("/")).to_path_buf())
    }
}

fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}

fn collect_matching(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_matching(&path, extension, files)?;
        } else if path.to_string_lossy().ends_with(extension) {
            files.push(path);
        }
    }
    Ok(())
}
