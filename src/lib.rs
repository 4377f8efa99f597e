//! ahoy starts projects from skeleton templates.
//! A skeleton is a directory tree whose paths and file contents hold template
//! expressions; ahoy asks the skeleton's questions and writes the rendered
//! tree into a new project directory.

/// Partitioning of skeleton entries into render, copy and ignore sets
pub mod classifier;

/// Command-line interface module for the ahoy application
pub mod cli;

/// Skeleton descriptor handling
/// Supports `.ahoy/skeleton.json` and `.ahoy/skeleton.yml`
pub mod config;

/// Common constants: descriptor names, reserved fields, licenses
pub mod constants;

/// Error types and handling for the ahoy application
pub mod error;

/// Skeleton sources: local directories and remote archives
pub mod loader;

/// Question handling and answer context construction
pub mod parser;

/// Skeleton materialization
/// Writes the rendered tree into the target directory
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering of paths and file contents
pub mod renderer;

/// User-level settings
pub mod settings;

/// Answer validators
pub mod validation;
