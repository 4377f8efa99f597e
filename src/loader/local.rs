use crate::error::{Error, Result};
use crate::loader::interface::{LoadedTemplate, TemplateLoader};
use std::path::Path;

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Validates that the path is an existing directory.
    ///
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the path is missing or is not
    ///   a directory
    fn load(&self) -> Result<LoadedTemplate> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: path.display().to_string(),
            });
        }

        Ok(LoadedTemplate::local(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_loader() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = LocalLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(loaded.root(), temp_dir.path());
        assert!(!loaded.is_scratch());
    }

    #[test]
    fn test_local_loader_rejects_files_and_missing_paths() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(matches!(
            LocalLoader::new(&file).load(),
            Err(Error::TemplateDoesNotExistsError { .. })
        ));
        assert!(matches!(
            LocalLoader::new(temp_dir.path().join("missing")).load(),
            Err(Error::TemplateDoesNotExistsError { .. })
        ));
    }
}
