// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bogen — collect images, arrange them, export them as one PDF.
//
// Entry point. Initialises logging, loads config, imports the given files
// through the desktop bridge, applies the requested arrangement, and exports.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bogen_bridge::FsBridge;
use bogen_core::error::{BogenError, Result};
use bogen_core::human_errors::humanize_error;
use bogen_core::types::{PageSizePolicy, SortOrder};
use bogen_session::{
    AcquireRequest, CollectionEvent, FileExportSink, ScanSession, data_dir, settings,
};
use clap::Parser;

/// Turn a list of images into a PDF with one aspect-fit image per page.
///
/// Edits run in a fixed order: removals, then moves to the front, then the
/// sort. Positions are 1-based and refer to the list as it is at that point.
#[derive(Debug, Parser)]
#[command(name = "bogen", version, about)]
struct Cli {
    /// Images to import, in page order.
    images: Vec<PathBuf>,

    /// Page size: a4, letter, or auto (largest image width x height).
    #[arg(long, value_parser = parse_policy)]
    page_size: Option<PageSizePolicy>,

    /// Remove the image at this position (repeatable).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    remove: Vec<u32>,

    /// Move the image at this position to the front (repeatable).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    front: Vec<u32>,

    /// asc keeps import order, desc reverses it.
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SortOrder>,

    /// Directory to write the PDF into.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Title stored in the PDF metadata.
    #[arg(long)]
    title: Option<String>,

    /// Save --page-size, --output, and --title as the new defaults.
    #[arg(long)]
    save_config: bool,
}

fn parse_policy(value: &str) -> std::result::Result<PageSizePolicy, String> {
    PageSizePolicy::from_keyword(value)
        .ok_or_else(|| format!("unknown page size `{value}` (expected a4, letter, or auto)"))
}

fn parse_sort(value: &str) -> std::result::Result<SortOrder, String> {
    match value.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortOrder::Ascending),
        "desc" | "descending" => Ok(SortOrder::Descending),
        _ => Err(format!("unknown sort order `{value}` (expected asc or desc)")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Bogen starting");

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let dir = data_dir::data_dir();
    let mut config = settings::load_config(&dir);
    if let Some(policy) = cli.page_size {
        config.default_page_policy = policy;
    }
    if let Some(output) = &cli.output {
        config.export_dir = Some(output.clone());
    }
    if let Some(title) = &cli.title {
        config.document_title = title.clone();
    }
    if cli.save_config {
        settings::persist_config(&dir, &config)?;
        tracing::info!(path = %dir.display(), "config saved");
    }

    let export_dir = settings::export_dir(&config, &dir);
    let mut session = ScanSession::new(config);
    session.subscribe(|event| {
        if let CollectionEvent::Added { index, .. } = event {
            tracing::debug!(page = index + 1, "page queued");
        }
    });

    if !cli.images.is_empty() {
        let bridge = Arc::new(FsBridge::new());
        bridge.queue_selection(cli.images.iter().map(|p| p.to_string_lossy().into_owned()))?;
        let task = session.acquirer(bridge).spawn(AcquireRequest::Files);
        if let Some(acquired) = session.next_acquisition().await {
            acquired.errors.iter().for_each(report);
        }
        if let Err(err) = task.await {
            report(&BogenError::Bridge(format!("import task failed: {err}")));
        }
    }

    for position in cli.remove {
        if let Err(err) = session.remove_image(position as usize - 1) {
            report(&err);
        }
    }
    for position in cli.front {
        if let Err(err) = session.move_to_front(position as usize - 1) {
            report(&err);
        }
    }
    if let Some(order) = cli.sort {
        session.sort_images(order);
    }

    let receipt = session.export_default(&FileExportSink::new(export_dir))?;
    for skipped in &receipt.skipped {
        report(&BogenError::from(*skipped));
    }

    if receipt.is_empty() {
        println!("No images to export; wrote a blank page to {}", receipt.location.display());
    } else {
        println!(
            "Wrote {} page(s) to {} (sha256 {})",
            receipt.page_count,
            receipt.location.display(),
            receipt.sha256
        );
    }
    Ok(())
}

/// Print a plain-language version of `err`, unless it is not worth showing.
fn report(err: &BogenError) {
    tracing::debug!(error = %err, "reporting error");
    let human = humanize_error(err);
    if human.should_display() {
        eprintln!("{} {}", human.message, human.suggestion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_arrangement_flags() {
        let cli = Cli::try_parse_from([
            "bogen", "a.png", "b.png", "--page-size", "auto", "--remove", "2", "--front", "1",
            "--front", "3", "--sort", "desc",
        ])
        .unwrap();
        assert_eq!(cli.images.len(), 2);
        assert_eq!(cli.page_size, Some(PageSizePolicy::AutoFit));
        assert_eq!(cli.remove, vec![2]);
        assert_eq!(cli.front, vec![1, 3]);
        assert_eq!(cli.sort, Some(SortOrder::Descending));
    }

    #[test]
    fn zero_position_is_rejected() {
        assert!(Cli::try_parse_from(["bogen", "--remove", "0"]).is_err());
    }

    #[test]
    fn unknown_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["bogen", "--page-size", "tabloid"]).is_err());
    }
}
