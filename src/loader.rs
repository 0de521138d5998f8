//! Document loading
//!
//! Reads every matching file of the input folder as UTF-8 text. The walk is
//! sorted by file name so identical folders always load in the same order.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{ExtractError, Result};
use crate::types::{ExtractorConfig, SourceDocument};

/// Loads text documents from a folder.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    /// Extension to match, lowercase, without the leading dot
    extension: String,
    recursive: bool,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new("txt")
    }
}

impl DocumentLoader {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
            recursive: false,
        }
    }

    pub fn from_config(cfg: &ExtractorConfig) -> Self {
        Self::new(&cfg.extension).with_recursive(cfg.recursive)
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Read all matching documents under `folder`.
    ///
    /// Fails on the first file that cannot be read; a missing folder or a
    /// path that is not a directory is reported before any file is opened.
    pub fn load(&self, folder: &Path) -> Result<Vec<SourceDocument>> {
        if !folder.exists() {
            return Err(ExtractError::FolderNotFound(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(ExtractError::NotADirectory(folder.to_path_buf()));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut documents = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ExtractError::Walk {
                path: folder.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }

            let path = entry.path().to_path_buf();
            let text = std::fs::read_to_string(&path).map_err(|source| ExtractError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let id = document_id(folder, &path);
            debug!(document = %id, bytes = text.len(), "loaded document");

            documents.push(SourceDocument { id, path, text });
        }

        Ok(documents)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.to_lowercase() == self.extension)
    }
}

/// Path relative to the folder, joined with `/` on every platform.
fn document_id(folder: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(folder).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
