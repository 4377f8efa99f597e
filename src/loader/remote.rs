//! Remote skeletons: repository references, archive URLs, download and
//! extraction into a scratch directory.

use crate::constants::DEFAULT_CHECKOUT;
use crate::error::{Error, Result};
use crate::loader::interface::{LoadedTemplate, TemplateLoader};
use log::debug;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::fmt;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use zip::ZipArchive;

/// Timeout of a whole archive download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// User agent sent with archive requests.
pub const USER_AGENT: &str = concat!("ahoy/", env!("CARGO_PKG_VERSION"));

static DIRECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^direct:([^#]+)(?:#(.+))?$").expect("valid regex"));

static HOSTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(gh|gl|bb|github|gitlab|bitbucket):)?(?:(.+):)?([^/]+)/([^#]+)(?:#(.+))?$")
        .expect("valid regex")
});

static HAS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(f|ht)tps?://").expect("valid regex"));

/// Code hosting providers with a known archive layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    GitLab,
    Bitbucket,
}

impl Provider {
    /// Resolves a provider name or its two-letter alias.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "github" | "gh" => Some(Provider::GitHub),
            "gitlab" | "gl" => Some(Provider::GitLab),
            "bitbucket" | "bb" => Some(Provider::Bitbucket),
            _ => None,
        }
    }

    pub fn default_origin(&self) -> &'static str {
        match self {
            Provider::GitHub => "github.com",
            Provider::GitLab => "gitlab.com",
            Provider::Bitbucket => "bitbucket.org",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::GitHub => f.write_str("github"),
            Provider::GitLab => f.write_str("gitlab"),
            Provider::Bitbucket => f.write_str("bitbucket"),
        }
    }
}

/// A parsed skeleton reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoReference {
    /// `direct:<url>[#<ref>]`
    Direct { url: String, checkout: String },
    /// `[provider:][origin:]owner/name[#ref]`
    Hosted { provider: Provider, origin: String, owner: String, name: String, checkout: String },
}

impl RepoReference {
    /// Parses a reference string.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the string matches neither shape
    pub fn parse(reference: &str) -> Result<Self> {
        if let Some(caps) = DIRECT.captures(reference) {
            return Ok(RepoReference::Direct {
                url: caps[1].to_string(),
                checkout: caps.get(2).map_or(DEFAULT_CHECKOUT, |m| m.as_str()).to_string(),
            });
        }

        let caps = HOSTED.captures(reference).ok_or_else(|| {
            Error::ConfigError(format!("invalid skeleton reference '{reference}'"))
        })?;
        let provider = caps
            .get(1)
            .and_then(|m| Provider::from_alias(m.as_str()))
            .unwrap_or(Provider::GitHub);
        let origin =
            caps.get(2).map_or(provider.default_origin(), |m| m.as_str()).to_string();

        Ok(RepoReference::Hosted {
            provider,
            origin,
            owner: caps[3].to_string(),
            name: caps[4].to_string(),
            checkout: caps.get(5).map_or(DEFAULT_CHECKOUT, |m| m.as_str()).to_string(),
        })
    }

    /// Parses a reference typed on the command line, where a plain URL is
    /// shorthand for `direct:<url>`.
    pub fn from_cli(reference: &str) -> Result<Self> {
        if reference.starts_with("http") {
            Self::parse(&format!("direct:{reference}"))
        } else {
            Self::parse(reference)
        }
    }

    pub fn checkout(&self) -> &str {
        match self {
            RepoReference::Direct { checkout, .. } | RepoReference::Hosted { checkout, .. } => {
                checkout
            }
        }
    }

    /// URL of the zip archive for this reference.
    pub fn archive_url(&self) -> String {
        match self {
            RepoReference::Direct { url, .. } => url.clone(),
            RepoReference::Hosted { provider, origin, owner, name, checkout } => {
                let base = format!("{}/{owner}/{name}", add_protocol(origin));
                match provider {
                    Provider::GitHub => format!("{base}/archive/{checkout}.zip"),
                    Provider::GitLab => format!("{base}/repository/archive.zip?ref={checkout}"),
                    Provider::Bitbucket => format!("{base}/get/{checkout}.zip"),
                }
            }
        }
    }
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoReference::Direct { url, checkout } => write!(f, "direct:{url}#{checkout}"),
            RepoReference::Hosted { provider, origin, owner, name, checkout } => {
                write!(f, "{provider}:{origin}:{owner}/{name}#{checkout}")
            }
        }
    }
}

fn add_protocol(origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if HAS_SCHEME.is_match(origin) {
        origin.to_string()
    } else {
        format!("https://{origin}")
    }
}

/// Downloads an archive into memory.
///
/// # Errors
/// * `Error::DownloadError` on network failures and non-success statuses
pub fn download_archive(url: &str) -> Result<Vec<u8>> {
    let download_error = |source| Error::DownloadError { url: url.to_string(), source };

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(download_error)?;

    debug!("Downloading {}", url);
    let response = client
        .get(url)
        .header(ACCEPT, "application/zip")
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(download_error)?;
    let bytes = response.bytes().map_err(download_error)?;

    debug!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Extracts a zip archive into `dest`, dropping the leading path component of
/// every entry. Entries that would land outside `dest` are skipped.
///
/// Returns the number of files written.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut written = 0;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let relative: PathBuf = match file.enclosed_name() {
            Some(path) => path.components().skip(1).collect(),
            None => {
                debug!("Skipping unsafe archive entry {}", file.name());
                continue;
            }
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            debug!("Skipping unsafe archive entry {}", file.name());
            continue;
        }

        let outpath = dest.join(&relative);
        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }
        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = fs::File::create(&outpath)?;
        io::copy(&mut file, &mut outfile)?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&outpath, fs::Permissions::from_mode((mode & 0o777) | 0o600))?;
        }
        written += 1;
    }

    Ok(written)
}

/// Loader fetching a skeleton archive over HTTP.
pub struct RemoteLoader {
    reference: RepoReference,
}

impl RemoteLoader {
    pub fn new(reference: RepoReference) -> Self {
        Self { reference }
    }
}

impl TemplateLoader for RemoteLoader {
    /// Downloads and extracts the archive into a fresh scratch directory.
    fn load(&self) -> Result<LoadedTemplate> {
        let url = self.reference.archive_url();
        let bytes = download_archive(&url)?;

        let scratch = tempfile::Builder::new().prefix("skel-").tempdir()?;
        debug!("Extracting into {}", scratch.path().display());
        let written = extract_archive(&bytes, scratch.path())?;
        debug!("Extracted {} files", written);

        Ok(LoadedTemplate::scratch(scratch))
    }
}
