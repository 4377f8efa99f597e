//! Materialization of a skeleton into a target directory.
//!
//! The [`Processor`] walks the render set and then the copy set produced by the
//! [`Classifier`], renders every destination path, creates directories and
//! writes files. Existing files are only replaced when `force` is set. Every
//! mutation of a run is journaled so a failed run is rolled back and leaves the
//! output directory as it found it.

use crate::classifier::{Classification, Classifier};
use crate::constants::TARGET_ROOT_TEMPLATE;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Number of leading bytes inspected when sniffing binary content.
const SNIFF_LEN: usize = 8000;

/// Kinds of filesystem actions reported to an [`EventSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Make,
    Remove,
    Copy,
    Render,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Action::Make => "MAKE",
            Action::Remove => "REMOVE",
            Action::Copy => "COPY",
            Action::Render => "RENDER",
        };
        f.write_str(tag)
    }
}

/// Receiver of the action records emitted by a verbose run.
pub trait EventSink {
    fn emit(&self, action: Action, target: &Path);
}

/// Sink writing one `info` log line per action.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, action: Action, target: &Path) {
        info!("{}: {}", action, target.display());
    }
}

/// Counters of what a successful run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub dirs_made: usize,
    pub files_rendered: usize,
    pub files_copied: usize,
    pub files_removed: usize,
    pub files_skipped: usize,
}

impl Summary {
    /// Number of files written by the run.
    pub fn writes(&self) -> usize {
        self.files_rendered + self.files_copied
    }
}

/// Returns true when `content` looks binary: it holds a NUL byte near the
/// start or is not valid UTF-8.
pub fn is_binary(content: &[u8]) -> bool {
    let head = &content[..content.len().min(SNIFF_LEN)];
    head.contains(&0) || std::str::from_utf8(content).is_err()
}

#[derive(Debug)]
enum Change {
    CreatedDir(PathBuf),
    WroteFile(PathBuf),
    /// The original file was moved aside to `backup`
    Replaced { target: PathBuf, backup: PathBuf },
}

impl Change {
    fn path(&self) -> &Path {
        match self {
            Change::CreatedDir(path) | Change::WroteFile(path) => path,
            Change::Replaced { target, .. } => target,
        }
    }
}

/// Mutations made by a run, undone in reverse order on failure.
#[derive(Debug, Default)]
struct Journal {
    changes: Vec<Change>,
}

impl Journal {
    fn record(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Drops the backups of replaced files once a run succeeded.
    fn commit(self) {
        for change in self.changes {
            if let Change::Replaced { backup, .. } = change {
                if let Err(e) = fs::remove_file(&backup) {
                    warn!("Cannot remove backup {}: {}", backup.display(), e);
                }
            }
        }
    }

    fn rollback(self) {
        for change in self.changes.into_iter().rev() {
            let outcome = match &change {
                Change::CreatedDir(path) => fs::remove_dir(path),
                Change::WroteFile(path) => remove_if_exists(path),
                // Renaming back keeps the original contents and mode.
                Change::Replaced { target, backup } => {
                    remove_if_exists(target).and_then(|()| fs::rename(backup, target))
                }
            };
            match outcome {
                Ok(()) => debug!("Rolled back {}", change.path().display()),
                Err(e) => warn!("Rollback of {} failed: {}", change.path().display(), e),
            }
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Free sibling path a replaced file is moved to until the run ends.
fn backup_path(target: &Path) -> PathBuf {
    let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let mut attempt = 0;
    loop {
        let candidate = target.with_file_name(format!(".{name}.ahoy-backup.{attempt}"));
        if fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
        attempt += 1;
    }
}

/// How file contents reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    /// Binary files are copied, text files are rendered
    Sniff,
    /// Always copied byte for byte
    Verbatim,
}

/// State of a single run.
struct Run {
    force: bool,
    verbose: bool,
    journal: Journal,
    summary: Summary,
}

/// Skeleton materialization engine.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    sink: &'a dyn EventSink,
    classifier: Classifier,
    output_dir: PathBuf,
    context: &'a serde_json::Value,
}

impl<'a> Processor<'a> {
    /// Creates an engine writing below `output_dir`.
    ///
    /// # Arguments
    /// * `renderer` - Engine used for paths and text contents
    /// * `sink` - Receiver of action records when a run is verbose
    /// * `classifier` - Classifier bound to the template root
    /// * `output_dir` - Directory the target root is created in
    /// * `context` - Answers the templates are rendered with
    pub fn new<P: Into<PathBuf>>(
        renderer: &'a dyn TemplateRenderer,
        sink: &'a dyn EventSink,
        classifier: Classifier,
        output_dir: P,
        context: &'a serde_json::Value,
    ) -> Self {
        Self { renderer, sink, classifier, output_dir: output_dir.into(), context }
    }

    /// Renders the target root path from the project name.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the name renders to nothing or to a path
    pub fn target_root(&self) -> Result<PathBuf> {
        match self.render_segment(TARGET_ROOT_TEMPLATE)? {
            Some(name) => Ok(self.output_dir.join(name)),
            None => Err(Error::TemplateError("project name renders to an empty path".into())),
        }
    }

    /// Renders every segment of a template-root-relative path.
    ///
    /// Returns `None` when a segment renders to an empty string, which drops
    /// the entry and, for directories, everything below it.
    pub fn render_destination(&self, relative: &Path) -> Result<Option<PathBuf>> {
        let mut destination = PathBuf::new();
        for component in relative.components() {
            let segment = component.as_os_str().to_str().ok_or_else(|| {
                Error::TemplateError(format!("path '{}' is not valid UTF-8", relative.display()))
            })?;
            match self.render_segment(segment)? {
                Some(rendered) => destination.push(rendered),
                None => return Ok(None),
            }
        }
        Ok(Some(destination))
    }

    fn render_segment(&self, segment: &str) -> Result<Option<String>> {
        let rendered = self.renderer.render(segment, self.context)?;
        if rendered.trim().is_empty() {
            return Ok(None);
        }
        if rendered == "." || rendered == ".." || rendered.contains(['/', '\\']) {
            return Err(Error::TemplateError(format!(
                "'{segment}' renders to '{rendered}', which is not a single path segment"
            )));
        }
        Ok(Some(rendered))
    }

    /// Materializes the skeleton.
    ///
    /// Render-set entries are processed first, then, if `copy` is not empty,
    /// the copy set. On error every change made by this run is undone before
    /// the error is returned.
    ///
    /// # Arguments
    /// * `copy` - Patterns of files copied verbatim
    /// * `ignore` - Patterns of entries never visited
    /// * `force` - Replace files that already exist in the target
    /// * `verbose` - Emit action records to the sink
    pub fn generate<S: AsRef<str>>(
        &self,
        copy: &[S],
        ignore: &[S],
        force: bool,
        verbose: bool,
    ) -> Result<Summary> {
        let classification = self.classifier.classify(copy, ignore)?;
        let mut run = Run { force, verbose, journal: Journal::default(), summary: Summary::default() };

        match self.materialize(&classification, !copy.is_empty(), &mut run) {
            Ok(()) => {
                debug!("Generation finished: {:?}", run.summary);
                run.journal.commit();
                Ok(run.summary)
            }
            Err(e) => {
                warn!("Generation failed, rolling back {} change(s)", run.journal.changes.len());
                run.journal.rollback();
                Err(e)
            }
        }
    }

    fn materialize(
        &self,
        classification: &Classification,
        copy_phase: bool,
        run: &mut Run,
    ) -> Result<()> {
        let target_root = self.target_root()?;
        self.make_dir(&target_root, true, run)?;

        debug!("Rendering {} entries", classification.render.len());
        for relative in &classification.render {
            self.process_entry(relative, &target_root, Transfer::Sniff, run)?;
        }

        if copy_phase {
            debug!("Copying {} entries", classification.copy.len());
            for relative in &classification.copy {
                self.process_entry(relative, &target_root, Transfer::Verbatim, run)?;
            }
        }
        Ok(())
    }

    fn process_entry(
        &self,
        relative: &Path,
        target_root: &Path,
        transfer: Transfer,
        run: &mut Run,
    ) -> Result<()> {
        let source = self.classifier.root().join(relative);
        let target = match self.render_destination(relative)? {
            Some(destination) => target_root.join(destination),
            None => {
                debug!("Skipping {}, its path renders empty", relative.display());
                return Ok(());
            }
        };

        let metadata = fs::metadata(&source)?;
        if metadata.is_dir() {
            return self.make_dir(&target, false, run);
        }

        if target.exists() {
            if !run.force {
                debug!("Skipping existing file {}", target.display());
                run.summary.files_skipped += 1;
                return Ok(());
            }
            let backup = backup_path(&target);
            fs::rename(&target, &backup)?;
            run.journal.record(Change::Replaced { target: target.clone(), backup });
            run.summary.files_removed += 1;
            self.emit(run, Action::Remove, &target);
        } else {
            run.journal.record(Change::WroteFile(target.clone()));
        }

        let content = fs::read(&source)?;
        if transfer == Transfer::Verbatim || is_binary(&content) {
            fs::copy(&source, &target)?;
            run.summary.files_copied += 1;
            self.emit(run, Action::Copy, &target);
        } else {
            let text = String::from_utf8(content)
                .map_err(|e| Error::TemplateError(format!("{}: {e}", source.display())))?;
            let rendered = self.renderer.render(&text, self.context)?;
            fs::write(&target, rendered)?;
            fs::set_permissions(&target, metadata.permissions())?;
            run.summary.files_rendered += 1;
            self.emit(run, Action::Render, &target);
        }
        Ok(())
    }

    fn make_dir(&self, target: &Path, with_parents: bool, run: &mut Run) -> Result<()> {
        if target.exists() {
            return Ok(());
        }
        if with_parents {
            fs::create_dir_all(target)?;
        } else {
            fs::create_dir(target)?;
        }
        run.journal.record(Change::CreatedDir(target.to_path_buf()));
        run.summary.dirs_made += 1;
        self.emit(run, Action::Make, target);
        Ok(())
    }

    fn emit(&self, run: &Run, action: Action, target: &Path) {
        if run.verbose {
            self.sink.emit(action, target);
        }
    }
}
