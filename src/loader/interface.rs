use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A template root ready to be materialized.
///
/// Remote templates live in a scratch directory owned by this value; the
/// directory is deleted when it is dropped, on error paths too.
#[derive(Debug)]
pub struct LoadedTemplate {
    root: PathBuf,
    scratch: Option<TempDir>,
}

impl LoadedTemplate {
    /// Wraps a caller-owned directory.
    pub fn local<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), scratch: None }
    }

    /// Takes ownership of a scratch directory.
    pub fn scratch(dir: TempDir) -> Self {
        Self { root: dir.path().to_path_buf(), scratch: Some(dir) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the root is a scratch directory removed on drop.
    pub fn is_scratch(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Resolves the source into a local template root.
    fn load(&self) -> Result<LoadedTemplate>;
}
