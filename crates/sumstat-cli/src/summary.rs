use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use sumstat_cli::pipeline::{FileStatus, SkipReason};

use crate::types::ReconcileReport;

pub fn print_summary(report: &ReconcileReport) {
    if report.dry_run {
        println!("Dry run: mapping artifact not written");
    } else {
        println!("Metadata: {}", report.summary.metadata_path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Columns"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);

    for outcome in &report.outcomes {
        let (status_cell, columns_cell, detail_cell) = match &outcome.status {
            FileStatus::Accepted(record) => (
                Cell::new("accepted")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                Cell::new(record.columns.len()),
                dim_cell("-"),
            ),
            FileStatus::Skipped(reason) => (
                Cell::new("skipped")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                dim_cell("-"),
                skip_detail_cell(reason),
            ),
        };
        table.add_row(vec![
            Cell::new(outcome.filename.clone()),
            status_cell,
            columns_cell,
            detail_cell,
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} accepted / {} skipped",
            report.summary.accepted, report.summary.skipped
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(report.summary.scanned).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn skip_detail_cell(reason: &SkipReason) -> Cell {
    match reason {
        SkipReason::MissingRequired(_) => Cell::new(reason.to_string()).fg(Color::Red),
        SkipReason::HeaderRead(_) | SkipReason::Unexpected(_) => {
            Cell::new(reason.to_string()).fg(Color::Yellow)
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
