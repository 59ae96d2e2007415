//! Stages behind the CLI commands.
//!
//! `generate` runs one of the two regeneration engines depending on the
//! requested mode. Single mode scans its one document so overrides resolve
//! against parsed values and the plan's line-item decisions apply; bulk mode
//! passes every document through with shared overrides and per-index control
//! numbers. Date offsets follow the mode: single recomputes the scanned
//! registry from its originals, bulk shifts the documents themselves before
//! the walk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use tracing::{debug, info};

use x12_model::{
    BulkOptions, DateRegistry, Document, ProcessingMode, RegenerateOptions, RegeneratedDocument,
};
use x12_parse::{DocumentBatch, scan_document, tokenize};
use x12_transform::{
    BatchDocument, apply_registry_offset, regenerate_batch, regenerate_document,
    shift_document_dates,
};

use crate::plan::RunPlan;

/// One document after a standalone date shift.
#[derive(Debug, Clone)]
pub struct ShiftedFile {
    pub file_name: String,
    pub content: String,
    pub segments: usize,
    pub dates_shifted: usize,
}

/// Files written (or skipped) by [`write_outputs`].
#[derive(Debug, Default)]
pub struct WrittenOutputs {
    /// Output paths, including the ones a dry run would have written.
    pub paths: Vec<PathBuf>,
    /// One record per file that could not be written.
    pub errors: Vec<String>,
}

/// Regenerate a loaded batch in the requested mode.
///
/// Single mode runs the first (only) file through the scanning engine; bulk
/// mode runs every file through the pass-through engine in batch order.
pub fn generate(
    batch: &DocumentBatch,
    plan: &RunPlan,
    mode: ProcessingMode,
    now: NaiveDateTime,
) -> Result<Vec<RegeneratedDocument>> {
    if batch.is_empty() {
        bail!("no readable inputs: {}", batch.errors.join("; "));
    }
    match mode {
        ProcessingMode::Single => {
            let file = &batch.files[0];
            let (document, options) = prepare_single(&file.content, plan);
            let output = regenerate_document(&document, &file.file_name, &options, now)?;
            Ok(vec![output])
        }
        ProcessingMode::Bulk => {
            let (documents, options) = prepare_bulk(batch, plan, now);
            Ok(regenerate_batch(&documents, &options, now)?)
        }
    }
}

/// Scan one document and fold the plan into regeneration options.
pub fn prepare_single(content: &str, plan: &RunPlan) -> (Document, RegenerateOptions) {
    let document = tokenize(content);
    let mut scan = scan_document(&document);
    plan.apply_line_items(&mut scan.line_items);
    plan.apply_dates(&mut scan.dates);
    if plan.date_offset_days != 0 {
        apply_registry_offset(&mut scan.dates, plan.date_offset_days);
    }
    let options = RegenerateOptions {
        envelope: scan.envelope,
        overrides: plan.envelope.clone(),
        dates: scan.dates,
        line_items: scan.line_items,
        batch_index: 0,
    };
    (document, options)
}

/// Tokenize every loaded file and build the shared bulk options.
///
/// The shared date registry starts from the default entry for the run date;
/// a plan offset is applied to the documents themselves so G62 dates move
/// along with DTM ones.
pub fn prepare_bulk(
    batch: &DocumentBatch,
    plan: &RunPlan,
    now: NaiveDateTime,
) -> (Vec<BatchDocument>, BulkOptions) {
    let mut dates = DateRegistry::with_default_entry(now.date());
    plan.apply_dates(&mut dates);

    let documents = batch
        .files
        .iter()
        .map(|file| {
            let mut document = tokenize(&file.content);
            if plan.date_offset_days != 0 {
                document = shift_document_dates(&document, plan.date_offset_days);
            }
            BatchDocument::new(file.file_name.clone(), document)
        })
        .collect();

    let options = BulkOptions {
        overrides: plan.envelope.clone(),
        dates,
    };
    (documents, options)
}

/// Shift every DTM/G62 date in every loaded file by `days`, keeping file
/// names and layout.
pub fn shift_batch(batch: &DocumentBatch, days: i64) -> Vec<ShiftedFile> {
    batch
        .files
        .iter()
        .map(|file| {
            let document = tokenize(&file.content);
            let shifted = shift_document_dates(&document, days);
            let dates_shifted = document
                .segments
                .iter()
                .zip(&shifted.segments)
                .filter(|(before, after)| before != after)
                .count();
            ShiftedFile {
                file_name: file.file_name.clone(),
                content: shifted.render(),
                segments: shifted.len(),
                dates_shifted,
            }
        })
        .collect()
}

/// Write `(file name, content)` pairs into `output_dir`.
///
/// A dry run returns the paths it would have written without touching the
/// filesystem. Per-file write failures are recorded rather than aborting the
/// rest of the batch.
pub fn write_outputs(
    output_dir: &Path,
    documents: &[(String, String)],
    dry_run: bool,
) -> Result<WrittenOutputs> {
    let mut written = WrittenOutputs::default();
    if !dry_run && !documents.is_empty() {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("create {}", output_dir.display()))?;
    }
    for (file_name, content) in documents {
        let path = output_dir.join(file_name);
        if dry_run {
            debug!(path = %path.display(), "dry run, skipping write");
            written.paths.push(path);
            continue;
        }
        match std::fs::write(&path, content) {
            Ok(()) => {
                info!(path = %path.display(), bytes = content.len(), "wrote output");
                written.paths.push(path);
            }
            Err(error) => written.errors.push(format!("{}: {error}", path.display())),
        }
    }
    Ok(written)
}
