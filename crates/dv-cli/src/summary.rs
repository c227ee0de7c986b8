use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dv_convert::ColumnMetadata;
use dv_infer::BatchItem;
use dv_validate::{Severity, ValidationReport};

use crate::types::ConvertResult;

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    if result.dry_run {
        println!("Output: {} (dry run, not written)", result.output.display());
    } else {
        println!("Output: {}", result.output.display());
    }
    if let Some(path) = &result.outcome.metadata_path {
        println!("Metadata: {}", path.display());
    }
    if let Some(version) = &result.outcome.schema_version {
        println!("Schema version: {version}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Original"),
        header_cell("Standardized"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for rename in &result.outcome.renames {
        table.add_row(vec![
            Cell::new(&rename.original),
            Cell::new(&rename.standardized),
            status_cell(rename.changed()),
        ]);
    }
    println!("{table}");
    println!(
        "{} of {} columns standardized",
        result.outcome.renamed_count(),
        result.outcome.renames.len()
    );
    print_review_table(&result.outcome.columns);
}

fn print_review_table(columns: &[(String, ColumnMetadata)]) {
    let flagged: Vec<_> = columns
        .iter()
        .filter(|(_, column)| column.meta.needs_review)
        .collect();
    if flagged.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Category"),
        header_cell("Unit"),
        header_cell("Confidence"),
        header_cell("Matched rules"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for (name, column) in flagged {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(column.meta.category.as_str()),
            Cell::new(&column.meta.primary_unit),
            Cell::new(format!("{:.2}", column.meta.confidence)),
            rules_cell(&column.meta.matched_rules),
        ]);
    }
    println!();
    println!("Needs review:");
    println!("{table}");
}

pub fn print_infer_table(items: &[BatchItem]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Category"),
        header_cell("Unit"),
        header_cell("Scale"),
        header_cell("Direction"),
        header_cell("Confidence"),
        header_cell("Review"),
        header_cell("Matched rules"),
    ]);
    apply_infer_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.label),
            Cell::new(item.meta.category.as_str()),
            Cell::new(&item.meta.primary_unit),
            Cell::new(item.meta.scale_type.as_str()),
            Cell::new(item.meta.direction.as_str()),
            Cell::new(format!("{:.2}", item.meta.confidence)),
            review_cell(item.needs_review),
            rules_cell(&item.meta.matched_rules),
        ]);
    }
    println!("{table}");
    let flagged = items.iter().filter(|item| item.needs_review).count();
    if flagged > 0 {
        println!("{flagged} of {} labels flagged for review", items.len());
    }
}

pub fn print_validation_report(report: &ValidationReport) {
    if report.issues.is_empty() {
        println!("No issues found ({} format).", report.format);
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Category"),
        header_cell("Entry"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in &report.issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.category),
            Cell::new(issue.entry.clone().unwrap_or_else(|| "-".to_string())),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
    println!(
        "{} errors, {} warnings ({} format)",
        report.error_count(),
        report.warning_count(),
        report.format
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_infer_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(changed: bool) -> Cell {
    if changed {
        Cell::new("renamed")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("unchanged")
    }
}

fn review_cell(needs_review: bool) -> Cell {
    if needs_review {
        Cell::new("yes")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn rules_cell(rules: &[String]) -> Cell {
    if rules.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(rules.join(", "))
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
