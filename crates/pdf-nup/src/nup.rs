//! N-up entry points
//!
//! This module orchestrates a run:
//! 1. Validate options and resolve the output target
//! 2. Read the source document and its page geometry
//! 3. Lay out sheets
//! 4. Render sheets to a new document and write it

use crate::io::{Sink, Source, read_document, resolve_output, write_document};
use crate::layout::layout;
use crate::options::NupOptions;
use crate::render::{SheetRenderer, read_source_pages};
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Build the n-up document for an already parsed source.
pub fn nup_document(source: &Document, options: &NupOptions) -> Result<Document> {
    options.validate()?;

    let pages = read_source_pages(source)?;
    let sheets = layout(&pages, options)?;

    let mut renderer = SheetRenderer::new(source);
    for sheet in sheets {
        renderer.render(&sheet)?;
    }
    Ok(renderer.finish())
}

/// Lay out `source` n-up and write the result.
///
/// Without a sink the output path is derived from the source path and
/// `options.output_pattern`; a stream source without a sink is a
/// validation error. Options are checked before the output is touched.
///
/// Returns the written path, or `None` when the sink was a stream.
pub fn layout_nup(
    mut source: Source<'_>,
    sink: Option<Sink<'_>>,
    options: &NupOptions,
) -> Result<Option<PathBuf>> {
    options.validate()?;
    let mut target = resolve_output(&source, sink, &options.output_pattern, options.pages_per_sheet)?;

    let input = read_document(&mut source)?;
    let mut output = nup_document(&input, options)?;
    write_document(&mut target, &mut output)?;

    let written = match target {
        Sink::Path(path) => Some(path),
        Sink::Stream(_) => None,
    };

    let label = written
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stream>".to_string());
    log::info!(
        "{}-up: {} source pages on {} sheets -> {}",
        options.pages_per_sheet,
        input.get_pages().len(),
        output.get_pages().len(),
        label
    );
    if options.verbose {
        println!("written: {}", label);
    }

    Ok(written)
}

/// Async wrapper around [`layout_nup`] for path inputs.
///
/// Runs the whole invocation on tokio's blocking pool.
pub async fn nup_file(
    input: impl AsRef<Path>,
    output: Option<PathBuf>,
    options: &NupOptions,
) -> Result<Option<PathBuf>> {
    let input = input.as_ref().to_owned();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        layout_nup(Source::Path(input), output.map(Sink::Path), &options)
    })
    .await?
}
