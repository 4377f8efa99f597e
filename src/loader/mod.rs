use crate::error::{Error, Result};
use crate::loader::interface::{LoadedTemplate, TemplateLoader};
use crate::loader::local::LocalLoader;
use crate::loader::remote::{RemoteLoader, RepoReference};
use log::debug;
use std::path::PathBuf;

pub mod interface;
pub mod local;
pub mod remote;

/// Represents the source location of a template.
#[derive(Debug)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Repository archive fetched over HTTP
    Remote(RepoReference),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Remote(reference) => {
                write!(f, "remote archive: '{}'", reference.archive_url())
            }
        }
    }
}

impl TemplateSource {
    /// Builds a source from the command line: a `--path` wins over a
    /// repository reference.
    ///
    /// # Errors
    /// * `Error::ConfigError` if neither is given or the reference is invalid
    pub fn from_args(reference: Option<&str>, path: Option<PathBuf>) -> Result<Self> {
        match (path, reference) {
            (Some(path), _) => Ok(Self::FileSystem(path)),
            (None, Some(reference)) => Ok(Self::Remote(RepoReference::from_cli(reference)?)),
            (None, None) => Err(Error::ConfigError(
                "a skeleton reference or --path is required".to_string(),
            )),
        }
    }
}

/// Returns the template root for the given source.
pub fn load_template(source: TemplateSource) -> Result<LoadedTemplate> {
    debug!("Using template from the {}", source);
    match source {
        TemplateSource::FileSystem(path) => LocalLoader::new(path).load(),
        TemplateSource::Remote(reference) => RemoteLoader::new(reference).load(),
    }
}
