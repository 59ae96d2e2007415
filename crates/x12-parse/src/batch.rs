//! Concurrent batch loading.
//!
//! Bulk runs read every input file independently: one reader per file fans
//! out, outcomes fan in over a channel in whatever order the reads finish,
//! and a completion counter decides when the batch is done. The merge is
//! order-independent (contents keyed by batch index, transaction sets a set
//! union), one failed read is recorded against its file and never blocks the
//! others, and there is no cancellation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Sender, channel};
use std::thread;

use tracing::{debug, info_span, warn};

use x12_model::{Result, TransactionSetRegistry, X12Error};

use crate::scan::scan_document;
use crate::tokenizer::tokenize;

/// One successfully loaded input file, in batch order.
#[derive(Debug, Clone)]
pub struct BatchFile {
    /// Position in the caller's input list; drives per-document control
    /// numbers and PO-number suffixes downstream.
    pub index: usize,
    pub file_name: String,
    pub content: String,
}

/// Merged outcome of a batch load.
#[derive(Debug, Default)]
pub struct DocumentBatch {
    /// Readable files in input order.
    pub files: Vec<BatchFile>,
    /// Union of transaction-set codes across all readable files.
    pub transaction_sets: TransactionSetRegistry,
    /// One record per file that could not be read.
    pub errors: Vec<String>,
}

impl DocumentBatch {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File name to raw content, for callers that look documents up by name.
    pub fn content_map(&self) -> BTreeMap<&str, &str> {
        self.files
            .iter()
            .map(|file| (file.file_name.as_str(), file.content.as_str()))
            .collect()
    }
}

enum LoadUpdate {
    Loaded {
        index: usize,
        file_name: String,
        content: String,
    },
    Failed {
        error: X12Error,
    },
}

/// Read every path concurrently and merge the outcomes.
///
/// Returns [`X12Error::NoDocuments`] for an empty path list; individual read
/// failures land in [`DocumentBatch::errors`] instead of failing the call.
pub fn load_batch(paths: &[PathBuf]) -> Result<DocumentBatch> {
    if paths.is_empty() {
        return Err(X12Error::NoDocuments);
    }

    let span = info_span!("load_batch", files = paths.len());
    let _entered = span.enter();

    let (sender, receiver) = channel();
    for (index, path) in paths.iter().enumerate() {
        spawn_reader(index, path.clone(), sender.clone());
    }
    drop(sender);

    let mut loaded: BTreeMap<usize, BatchFile> = BTreeMap::new();
    let mut batch = DocumentBatch::default();
    let mut completed = 0usize;
    while completed < paths.len() {
        let Ok(update) = receiver.recv() else {
            break;
        };
        completed += 1;
        match update {
            LoadUpdate::Loaded {
                index,
                file_name,
                content,
            } => {
                let scan = scan_document(&tokenize(&content));
                batch.transaction_sets.merge(&scan.transaction_sets);
                debug!(file = %file_name, line_items = scan.line_items.len(), "loaded");
                loaded.insert(
                    index,
                    BatchFile {
                        index,
                        file_name,
                        content,
                    },
                );
            }
            LoadUpdate::Failed { error } => {
                warn!(%error, "batch read failed");
                batch.errors.push(error.to_string());
            }
        }
    }

    batch.files = loaded.into_values().collect();
    Ok(batch)
}

fn spawn_reader(index: usize, path: PathBuf, sender: Sender<LoadUpdate>) {
    thread::spawn(move || {
        let update = match std::fs::read_to_string(&path) {
            Ok(content) => LoadUpdate::Loaded {
                index,
                file_name: display_name(&path),
                content,
            },
            Err(source) => LoadUpdate::Failed {
                error: X12Error::ReadFile { path, source },
            },
        };
        let _ = sender.send(update);
    });
}

/// Final path component as a display/file name.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
