use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::{info, info_span};

use x12_cli::pipeline::{generate, shift_batch, write_outputs};
use x12_cli::plan::RunPlan;
use x12_model::{DateRegistry, EnvelopeHeader, Po1Group, ProcessingMode};
use x12_parse::{load_batch, scan_document, tokenize};

use crate::cli::{GenerateArgs, InspectArgs, ShiftDatesArgs};
use crate::summary::apply_table_style;
use crate::types::{FileOutcome, RunMode, RunResult};

pub fn run_generate(args: &GenerateArgs) -> Result<RunResult> {
    let mode = if args.files.len() > 1 {
        ProcessingMode::Bulk
    } else {
        ProcessingMode::Single
    };
    let span = info_span!("generate", mode = %mode, files = args.files.len());
    let _guard = span.enter();

    // =========================================================================
    // Stage 1: Load inputs
    // =========================================================================
    let load_start = Instant::now();
    let batch = load_batch(&args.files).context("load inputs")?;
    info!(
        loaded = batch.files.len(),
        failed = batch.errors.len(),
        transaction_sets = %batch.transaction_sets.label(),
        duration_ms = load_start.elapsed().as_millis(),
        "inputs loaded"
    );

    // =========================================================================
    // Stage 2: Resolve the run plan
    // =========================================================================
    let mut plan = match &args.plan {
        Some(path) => RunPlan::load(path)?,
        None => RunPlan::default(),
    };
    merge_flag_overrides(&mut plan, args);

    // =========================================================================
    // Stage 3: Regenerate
    // =========================================================================
    let generate_start = Instant::now();
    let now = Local::now().naive_local();
    let documents = generate(&batch, &plan, mode, now)?;
    info!(
        documents = documents.len(),
        duration_ms = generate_start.elapsed().as_millis(),
        "regeneration complete"
    );

    // =========================================================================
    // Stage 4: Write outputs
    // =========================================================================
    let output_dir = resolve_output_dir(args.output_dir.as_deref(), &args.files);
    let pairs: Vec<(String, String)> = documents
        .iter()
        .map(|document| (document.file_name.clone(), document.content.clone()))
        .collect();
    let written = write_outputs(&output_dir, &pairs, args.dry_run)?;

    let files = batch
        .files
        .iter()
        .zip(&documents)
        .map(|(input, output)| FileOutcome {
            input_name: input.file_name.clone(),
            output_name: output.file_name.clone(),
            control_number: Some(output.control_number.clone()),
            segments: output.segments_emitted,
            line_items: Some(output.line_items_emitted),
            dates_shifted: None,
        })
        .collect();

    let transaction_sets = batch.transaction_sets.label();
    let mut errors = batch.errors;
    errors.extend(written.errors);
    let has_errors = !errors.is_empty();
    Ok(RunResult {
        mode: match mode {
            ProcessingMode::Single => RunMode::Single,
            ProcessingMode::Bulk => RunMode::Bulk,
        },
        output_dir,
        transaction_sets,
        files,
        errors,
        dry_run: args.dry_run,
        has_errors,
    })
}

pub fn run_shift_dates(args: &ShiftDatesArgs) -> Result<RunResult> {
    let span = info_span!("shift_dates", days = args.days, files = args.files.len());
    let _guard = span.enter();

    let shift_start = Instant::now();
    let batch = load_batch(&args.files).context("load inputs")?;
    let shifted = shift_batch(&batch, args.days);
    info!(
        files = shifted.len(),
        failed = batch.errors.len(),
        duration_ms = shift_start.elapsed().as_millis(),
        "dates shifted"
    );

    let output_dir = resolve_output_dir(args.output_dir.as_deref(), &args.files);
    let pairs: Vec<(String, String)> = shifted
        .iter()
        .map(|file| (file.file_name.clone(), file.content.clone()))
        .collect();
    let written = write_outputs(&output_dir, &pairs, args.dry_run)?;

    let files = shifted
        .iter()
        .map(|file| FileOutcome {
            input_name: file.file_name.clone(),
            output_name: file.file_name.clone(),
            control_number: None,
            segments: file.segments,
            line_items: None,
            dates_shifted: Some(file.dates_shifted),
        })
        .collect();

    let transaction_sets = batch.transaction_sets.label();
    let mut errors = batch.errors;
    errors.extend(written.errors);
    let has_errors = !errors.is_empty();
    Ok(RunResult {
        mode: RunMode::Shift,
        output_dir,
        transaction_sets,
        files,
        errors,
        dry_run: args.dry_run,
        has_errors,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let document = tokenize(&content);
    let scan = scan_document(&document);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }

    println!("File: {}", args.file.display());
    println!("Layout: {}", document.layout.as_str());
    println!("Segments: {}", document.len());
    if !scan.transaction_sets.is_empty() {
        println!(
            "Transaction sets: {} ({} dates)",
            scan.transaction_sets.label(),
            scan.transaction_sets.date_vocabulary()
        );
    }
    print_envelope(&scan.envelope);
    print_dates(&scan.dates);
    print_line_items(&scan.line_items);
    Ok(())
}

fn print_envelope(envelope: &EnvelopeHeader) {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    apply_table_style(&mut table);
    let rows: [(&str, &str); 13] = [
        ("ISA sender qualifier", &envelope.isa_sender_qualifier),
        ("ISA sender ID", &envelope.isa_sender_id),
        ("ISA receiver qualifier", &envelope.isa_receiver_qualifier),
        ("ISA receiver ID", &envelope.isa_receiver_id),
        ("Usage indicator", &envelope.usage_indicator),
        ("ISA version", &envelope.isa_version),
        ("GS sender ID", &envelope.gs_sender_id),
        ("GS receiver ID", &envelope.gs_receiver_id),
        ("PO number", &envelope.po_number),
        ("PO date", &envelope.po_date),
        ("ISA control number", &envelope.isa_control_number),
        ("GS control number", &envelope.gs_control_number),
        ("ST control number", &envelope.st_control_number),
    ];
    for (field, value) in rows {
        table.add_row(vec![field, if value.is_empty() { "-" } else { value }]);
    }
    println!();
    println!("Envelope:");
    println!("{table}");
}

fn print_dates(dates: &DateRegistry) {
    if dates.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Segment", "Qualifier", "Date"]);
    apply_table_style(&mut table);
    for entry in &dates.entries {
        table.add_row(vec![
            entry.segment_type.as_str(),
            if entry.qualifier_id.is_empty() {
                "-"
            } else {
                entry.qualifier_id.as_str()
            },
            entry.date.as_str(),
        ]);
    }
    println!();
    println!("Dates:");
    println!("{table}");
}

fn print_line_items(line_items: &[Po1Group]) {
    if line_items.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "PO1", "Dependents"]);
    apply_table_style(&mut table);
    for (index, group) in line_items.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            group.anchor_line.clone(),
            if group.dependent_segments.is_empty() {
                "-".to_string()
            } else {
                group.dependent_segments.join("; ")
            },
        ]);
    }
    println!();
    println!("Line items:");
    println!("{table}");
}

/// CLI flags override whatever the plan file carries.
fn merge_flag_overrides(plan: &mut RunPlan, args: &GenerateArgs) {
    overlay(&mut plan.envelope.isa_sender_qualifier, &args.sender_qualifier);
    overlay(&mut plan.envelope.isa_sender_id, &args.sender_id);
    overlay(
        &mut plan.envelope.isa_receiver_qualifier,
        &args.receiver_qualifier,
    );
    overlay(&mut plan.envelope.isa_receiver_id, &args.receiver_id);
    overlay(&mut plan.envelope.gs_sender_id, &args.gs_sender);
    overlay(&mut plan.envelope.gs_receiver_id, &args.gs_receiver);
    overlay(&mut plan.envelope.po_number, &args.po_number);
    overlay(&mut plan.envelope.po_date, &args.po_date);
}

fn overlay(target: &mut Option<String>, flag: &Option<String>) {
    if flag.is_some() {
        *target = flag.clone();
    }
}

/// Explicit --output-dir, else `output/` beside the first input.
fn resolve_output_dir(explicit: Option<&Path>, inputs: &[PathBuf]) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    inputs
        .first()
        .and_then(|path| path.parent())
        .map(|parent| parent.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}
