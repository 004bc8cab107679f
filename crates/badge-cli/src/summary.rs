use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use badge_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {} ({} bytes)", result.output.display(), result.bytes);
    println!("{}", summary_table(result));
}

fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Rows read"), Cell::new(result.source_rows)]);
    table.add_row(vec![
        Cell::new("Packed rows"),
        count_cell(result.packed_rows, Color::Reset),
    ]);
    table.add_row(vec![
        Cell::new("Badges")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.badges).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Blank badges"),
        count_cell(result.blank, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Pages"), Cell::new(result.pages)]);
    table.add_row(vec![
        Cell::new("Annotated"),
        count_cell(result.annotated, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates"),
        count_cell(result.duplicates, Color::Yellow),
    ]);
    table
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn lists_every_count() {
        let result = RunResult {
            input: PathBuf::from("attendees.csv"),
            output: PathBuf::from("badges.docx"),
            source_rows: 7,
            packed_rows: 2,
            badges: 11,
            blank: 0,
            pages: 2,
            annotated: 3,
            duplicates: 1,
            bytes: 4096,
        };
        let mut table = summary_table(&result);
        table.force_no_tty();
        let rendered = table.to_string();
        for label in [
            "Rows read",
            "Packed rows",
            "Badges",
            "Blank badges",
            "Pages",
            "Annotated",
            "Duplicates",
        ] {
            assert!(rendered.contains(label), "missing {label}");
        }
        assert!(rendered.contains("11"));
        assert_eq!(table.row_count(), 7);
    }
}
