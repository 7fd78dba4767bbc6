use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use formshare_model::{DependencyManifest, Reference, ReferenceKind};

use formshare_cli::types::ShareOutcome;

pub fn print_share_summary(outcome: &ShareOutcome) {
    println!("Shared markup: {}", outcome.shared_markup.display());
    println!("Manifest: {}", outcome.manifest_path.display());
    print_manifest(&outcome.manifest);
}

pub fn print_manifest(manifest: &DependencyManifest) {
    if manifest.dependencies.is_empty() {
        println!("No dependencies found.");
        return;
    }
    println!("{}", reference_table(&manifest.dependencies));
    println!("{}", kind_count_table(manifest));
}

fn reference_table(references: &[Reference]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("UUID"),
        header_cell("Name"),
    ]);
    apply_table_style(&mut table);
    for reference in references {
        table.add_row(vec![
            kind_cell(reference.kind()),
            Cell::new(reference.external_id()),
            match reference.display_name() {
                Some(name) => Cell::new(name),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

fn kind_count_table(manifest: &DependencyManifest) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Count")]);
    apply_table_style(&mut table);
    for kind in ReferenceKind::ALL {
        let count = manifest.count_of(kind);
        let cell = if count > 0 {
            Cell::new(count).add_attribute(Attribute::Bold)
        } else {
            dim_cell(count)
        };
        table.add_row(vec![kind_cell(kind), cell]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(manifest.dependencies.len()).add_attribute(Attribute::Bold),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn kind_cell(kind: ReferenceKind) -> Cell {
    let color = match kind {
        ReferenceKind::Concept => Color::Green,
        ReferenceKind::Location => Color::Blue,
        ReferenceKind::Program => Color::Magenta,
        ReferenceKind::Person => Color::Yellow,
        ReferenceKind::Drug => Color::Red,
    };
    Cell::new(kind.as_str()).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
