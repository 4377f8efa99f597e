//! Partitioning of skeleton entries into render, copy and excluded sets.
//!
//! Patterns are matched against paths relative to the template root with `/`
//! separators. `*` stays within one path segment while `**` spans segments,
//! and `dir/**` also matches `dir` itself. A directory matched by an ignore
//! pattern is pruned with everything below it; a directory matched by a scan
//! pattern brings everything below it into the result.

use crate::error::{Error, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Pattern matching every entry of the template root.
pub const ALL_ENTRIES: &str = "**/*";

/// Compiles glob patterns into a single [`GlobSet`].
///
/// # Errors
/// * `Error::GlobError` if a pattern is invalid
pub fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = normalize_pattern(pattern.as_ref());
        if pattern.is_empty() {
            continue;
        }
        builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
        if let Some(dir) = pattern.strip_suffix("/**") {
            if !dir.is_empty() {
                builder.add(GlobBuilder::new(dir).literal_separator(true).build()?);
            }
        }
    }
    Ok(builder.build()?)
}

fn normalize_pattern(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_start_matches('/')
}

/// Result of classifying a template root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Entries whose names and contents are rendered, in preorder
    pub render: Vec<PathBuf>,
    /// Entries copied verbatim, parents before children
    pub copy: Vec<PathBuf>,
}

/// Scans a template root with a fixed base ignore list.
#[derive(Debug, Clone)]
pub struct Classifier {
    root: PathBuf,
    base_ignore: Vec<String>,
}

impl Classifier {
    /// Creates a classifier for `root`; `base_ignore` is applied to every scan.
    pub fn new<P: Into<PathBuf>>(root: P, base_ignore: Vec<String>) -> Self {
        Self { root: root.into(), base_ignore }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns every entry matching `patterns` and not matching the base
    /// ignore list or `ignore`, as paths relative to the root.
    pub fn scan<S: AsRef<str>>(&self, patterns: &[S], ignore: &[S]) -> Result<Vec<PathBuf>> {
        let mut exclude: Vec<&str> = self.base_ignore.iter().map(String::as_str).collect();
        exclude.extend(ignore.iter().map(AsRef::as_ref));
        self.walk(&build_glob_set(patterns)?, &build_glob_set(&exclude)?)
    }

    /// Splits the root into the render set and the copy set.
    ///
    /// An entry matching both a copy and an ignore pattern is excluded.
    pub fn classify<S: AsRef<str>>(&self, copy: &[S], ignore: &[S]) -> Result<Classification> {
        let mut combined: Vec<&str> = copy.iter().map(AsRef::as_ref).collect();
        combined.extend(ignore.iter().map(AsRef::as_ref));
        let render = self.scan(&[ALL_ENTRIES], &combined)?;

        let ignore: Vec<&str> = ignore.iter().map(AsRef::as_ref).collect();
        let mut copied = BTreeSet::new();
        for pattern in copy {
            copied.extend(self.scan(&[pattern.as_ref()], &ignore)?);
        }

        Ok(Classification { render, copy: copied.into_iter().collect() })
    }

    /// Lists every entry matched by the base ignore list or `ignore`.
    pub fn ignored<S: AsRef<str>>(&self, ignore: &[S]) -> Result<Vec<PathBuf>> {
        let mut patterns: Vec<&str> = self.base_ignore.iter().map(String::as_str).collect();
        patterns.extend(ignore.iter().map(AsRef::as_ref));
        let nothing: [&str; 0] = [];
        self.walk(&build_glob_set(&patterns)?, &build_glob_set(&nothing)?)
    }

    fn walk(&self, include: &GlobSet, exclude: &GlobSet) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut included_dirs: HashSet<PathBuf> = HashSet::new();
        let mut walker = WalkDir::new(&self.root).min_depth(1).sort_by_file_name().into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| Error::ConfigError(e.to_string()))?
                .to_path_buf();
            let is_dir = entry.file_type().is_dir();

            if exclude.is_match(&relative) {
                debug!("Ignoring {}", relative.display());
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }

            let inherited = relative.ancestors().skip(1).any(|dir| included_dirs.contains(dir));
            if inherited || include.is_match(&relative) {
                if is_dir {
                    included_dirs.insert(relative.clone());
                }
                found.push(relative);
            }
        }

        Ok(found)
    }
}
