use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::types::{RunMode, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Mode: {}", result.mode.as_str());
    println!("Output: {}", result.output_dir.display());
    if !result.transaction_sets.is_empty() {
        println!("Transaction sets: {}", result.transaction_sets);
    }
    if result.dry_run {
        println!("Dry run: nothing written");
    }

    let detail_header = match result.mode {
        RunMode::Shift => "Dates shifted",
        _ => "Line items",
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Output"),
        header_cell("Control #"),
        header_cell("Segments"),
        header_cell(detail_header),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_segments = 0usize;
    let mut total_detail = 0usize;
    for outcome in &result.files {
        let detail = match result.mode {
            RunMode::Shift => outcome.dates_shifted,
            _ => outcome.line_items,
        };
        total_segments += outcome.segments;
        total_detail += detail.unwrap_or(0);
        table.add_row(vec![
            Cell::new(&outcome.input_name),
            Cell::new(&outcome.output_name).fg(Color::Green),
            control_cell(outcome.control_number.as_deref()),
            Cell::new(outcome.segments),
            count_cell(detail),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} file(s)", result.files.len())),
        dim_cell("-"),
        Cell::new(total_segments).add_attribute(Attribute::Bold),
        Cell::new(total_detail).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(13)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn control_cell(control: Option<&str>) -> Cell {
    match control {
        Some(value) => Cell::new(value)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
