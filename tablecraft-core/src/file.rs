use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Check whether this file is already present under `base`.
    ///
    /// Generated files are user-owned once written, so presence is all
    /// that matters. Files whose name carries a run-dependent prefix
    /// override this to match on the stable part of the name.
    fn exists(&self, base: &Path) -> bool {
        self.path(base).exists()
    }

    /// Write the file to disk unless it is already present
    fn write(&self, base: &Path) -> Result<WriteResult> {
        if self.exists(base) {
            tracing::info!(path = %self.path(base).display(), "file already exists, skipping");
            return Ok(WriteResult::Skipped);
        }
        write_if_absent(&self.path(base), &self.render())
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was created
    Created,
    /// File was skipped (already exists)
    Skipped,
}

impl WriteResult {
    pub fn is_created(&self) -> bool {
        matches!(self, WriteResult::Created)
    }
}

/// Create `path` and all of its parents. Succeeds if it already exists.
pub fn ensure_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .wrap_err_with(|| format!("failed to create directory {}", path.display()))
}

/// Write `content` to `path` unless a file is already there.
///
/// The existence check and the creation are a single `create_new` open,
/// so an existing file is never truncated.
pub fn write_if_absent(path: &Path, content: &str) -> Result<WriteResult> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            tracing::info!(path = %path.display(), "file already exists, skipping");
            return Ok(WriteResult::Skipped);
        }
        Err(e) => {
            return Err(e).wrap_err_with(|| format!("failed to create {}", path.display()));
        }
    };

    file.write_all(content.as_bytes())
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "file created");

    Ok(WriteResult::Created)
}

/// Find the first file in `dir` (by name order) whose name ends with `suffix`.
///
/// A missing directory has no matches.
pub fn find_by_suffix(dir: &Path, suffix: &str) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let entries = std::fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to read directory {}", dir.display()))?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(suffix))
        })
        .collect();
    matches.sort();

    Ok(matches.into_iter().next())
}

/// A file to be generated
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file unless it already exists
    pub fn write(&self) -> Result<WriteResult> {
        write_if_absent(&self.path, &self.content)
    }
}
