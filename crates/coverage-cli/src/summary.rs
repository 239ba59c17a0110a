use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use coverage_cli::types::{AddOutcome, AddResult};
use coverage_rules::RuleEvaluation;
use coverage_validate::{DoctorReport, RuleReport};

pub fn print_add_result(result: &AddResult) {
    println!("Request: {}", result.request);
    println!("Price date: {}", result.evaluation_date);
    match &result.outcome {
        AddOutcome::Added(record) => {
            println!(
                "Added coverage type {} with amount {} to contract {}",
                record.coverage_type_id, record.amount, record.contract_id
            );
        }
        AddOutcome::Validated => println!("Dry run: all checks passed, nothing written"),
        AddOutcome::Rejected(error) => {
            eprintln!("Rejected ({}): {error}", error.kind().as_str());
        }
    }
}

pub fn print_rule_report(report: &RuleReport) {
    println!("Coverage type: {}", report.coverage_type_id);
    match report.customer_age {
        Some(age) => println!("Customer age at contract start: {age}"),
        None => {
            println!("No rejection rules.");
            return;
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("LfdNr"),
        header_cell("Age rule"),
        header_cell("Amount rule"),
        header_cell("Age"),
        header_cell("Amount"),
        header_cell("Result"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);

    let first = report.first_violation().map(|eval| eval.sequence);
    for eval in &report.evaluations {
        table.add_row(vec![
            Cell::new(eval.sequence),
            age_rule_cell(eval),
            Cell::new(&eval.amount_rule),
            match_cell(eval.age_satisfied),
            match_cell(eval.amount_satisfied),
            result_cell(eval, first == Some(eval.sequence)),
        ]);
    }
    println!("{table}");
}

pub fn print_doctor_report(report: &DoctorReport) {
    println!("Database: {}", report.database);
    println!("SQLite: {}", report.sqlite_version);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Present"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for status in &report.tables {
        let (present, rows) = if status.present {
            (
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
                Cell::new(status.rows.unwrap_or_default()),
            )
        } else if status.required {
            (
                Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold),
                dim_cell("-"),
            )
        } else {
            (dim_cell("optional"), dim_cell("-"))
        };
        table.add_row(vec![Cell::new(&status.name), present, rows]);
    }
    println!("{table}");

    if report.is_empty_schema() {
        eprintln!("No tables found. Create the schema and load the seed data first.");
        return;
    }
    let missing = report.missing_tables();
    if !missing.is_empty() {
        eprintln!("Missing tables: {}", missing.join(", "));
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn age_rule_cell(eval: &RuleEvaluation) -> Cell {
    match (&eval.age_rule, &eval.age_anomaly) {
        (Some(rule), _) => Cell::new(rule),
        (None, Some(anomaly)) => Cell::new(format!("{anomaly} (ignored)")).fg(Color::Yellow),
        (None, None) => dim_cell("-"),
    }
}

fn match_cell(matched: bool) -> Cell {
    if matched {
        Cell::new("match").fg(Color::Red)
    } else {
        dim_cell("-")
    }
}

fn result_cell(eval: &RuleEvaluation, is_first_violation: bool) -> Cell {
    if is_first_violation {
        Cell::new("REJECT")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else if eval.is_violated() {
        Cell::new("reject").fg(Color::Red)
    } else {
        Cell::new("pass").fg(Color::Green)
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
