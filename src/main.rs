//! ahoy's main application entry point and orchestration logic.
//! Handles command-line argument parsing and coordinates loading, questions
//! and materialization.

use std::path::PathBuf;

use ahoy::{
    classifier::Classifier,
    cli::{get_args, Args, Commands, SourceArgs, StartArgs},
    config::get_config,
    error::{default_error_handler, Result},
    loader::{load_template, TemplateSource},
    parser::{build_context, get_answers_from},
    processor::{LogSink, Processor},
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    settings::Settings,
};
use log::debug;

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();

    if let Err(err) = run(args) {
        eprintln!("\nSkeleton build failed\n");
        default_error_handler(err);
    }
}

/// Main application logic execution.
fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    match args.command {
        Commands::Start(start) => start_project(start, &settings, args.verbose),
        Commands::Inspect(source) => inspect(source, &settings),
    }
}

/// Generates a project.
///
/// # Flow
/// 1. Resolves the skeleton (local path or downloaded archive)
/// 2. Loads the skeleton descriptor
/// 3. Builds the answer context from preloaded answers and prompts
/// 4. Materializes the skeleton into the output directory
///
/// A downloaded skeleton is removed when `template` goes out of scope.
fn start_project(args: StartArgs, settings: &Settings, verbose: bool) -> Result<()> {
    let source = TemplateSource::from_args(args.source.name.as_deref(), args.source.path)?;
    let template = load_template(source)?;
    let config = get_config(template.root())?;

    debug!("Question prompt");
    let preloaded = get_answers_from(args.stdin)?;
    let prompt = DialoguerPrompter::new();
    let context = build_context(&config, settings, &prompt, &preloaded)?;

    let renderer = MiniJinjaRenderer::new();
    let classifier = Classifier::new(template.root(), settings.ignore.clone());
    let processor = Processor::new(&renderer, &LogSink, classifier, args.output_dir, &context);
    let summary = processor.generate(&config.copy, &config.ignore, args.force, verbose)?;
    debug!("{:?}", summary);

    println!("\nSkeleton built successfully in {}\n", processor.target_root()?.display());
    Ok(())
}

/// Prints the render, copy and ignore sets of a skeleton.
fn inspect(args: SourceArgs, settings: &Settings) -> Result<()> {
    let template = load_template(TemplateSource::from_args(args.name.as_deref(), args.path)?)?;
    let config = get_config(template.root())?;
    let classifier = Classifier::new(template.root(), settings.ignore.clone());
    let classification = classifier.classify(&config.copy, &config.ignore)?;

    print_paths("Render Paths:", &classification.render);
    print_paths("Copy Paths:", &classification.copy);
    print_paths("Ignore Paths:", &classifier.ignored(&config.ignore)?);
    Ok(())
}

fn print_paths(heading: &str, paths: &[PathBuf]) {
    println!("\n{heading}");
    for path in paths {
        println!("{}", path.display());
    }
}
