use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::cli::Args;
use crate::config::ReportConfig;
use crate::error::XSecError;
use crate::render;
use crate::report::{ReportBuilder, RunContext, RunSummary, SourceLabel};
use crate::store::CurveStore;

/// Opens the sources, builds every comparison page and writes the report.
pub fn run(args: &Args) -> Result<RunSummary, XSecError> {
    let config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    config.validate()?;

    // fail on an unusable output name before any source is read
    render::OutputFormat::from_path(&args.output)?;

    info!(
        "Plotting data from {} ({})",
        args.current.path.display(),
        args.current.label
    );
    let store = CurveStore::open(
        &args.current.path,
        args.reference.as_ref().map(|r| r.path.as_path()),
    )?;

    let context = RunContext {
        current: SourceLabel {
            path: args.current.path.clone(),
            label: args.current.label.clone(),
        },
        reference: args
            .reference
            .as_ref()
            .filter(|_| store.has_reference())
            .map(|r| SourceLabel {
                path: r.path.clone(),
                label: r.label.clone(),
            }),
        config,
    };

    let directories: Vec<&str> = store.directories().collect();
    if directories.is_empty() {
        warn!("{} holds no directories", args.current.path.display());
    }

    let progress = if context.config.progress {
        let bar = ProgressBar::new(directories.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut builder = ReportBuilder::new(&context)?;
    for directory in directories {
        progress.set_message(directory.to_owned());
        builder.add_directory(&store, directory);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let (report, summary) = builder.finish();
    render::write_report(&report, &args.output, &context.config.page)?;

    info!(
        "Done: {} directory(ies), {} page(s) written to {}",
        summary.directories,
        report.page_count(),
        args.output.display()
    );
    Ok(summary)
}
