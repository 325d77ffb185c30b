use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use labfon_model::SectionKey;
use labfon_query::{Facet, FacetIndex};
use labfon_render::{RenderOutcome, SkipReason};

use crate::types::{ListingResult, SiteResult};

pub fn print_site_summary(result: &SiteResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    println!("{}", site_table(result));
}

/// One row per section: what its render did.
pub fn site_table(result: &SiteResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Section"), header_cell("Result")]);
    apply_table_style(&mut table);
    for key in SectionKey::all() {
        let outcome_cell = match result.report.outcome(*key) {
            Some(outcome) => outcome_cell(outcome),
            None => dim_cell("absent"),
        };
        table.add_row(vec![section_cell(key.as_str()), outcome_cell]);
    }
    if let Some(outcome) = &result.publications {
        table.add_row(vec![section_cell("publicacoes"), outcome_cell(outcome)]);
    }
    table
}

pub fn print_listing(result: &ListingResult) {
    println!("{}", result.headline);
    println!("Página {} de {}", result.current_page, result.total_pages);
    if result.rows.is_empty() {
        return;
    }
    println!("{}", listing_table(result));
}

pub fn listing_table(result: &ListingResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("ID"),
        header_cell("Ano"),
        header_cell("Tipo"),
        header_cell("Citação"),
    ]);
    apply_listing_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in &result.rows {
        table.add_row(vec![
            dim_cell(row.position),
            Cell::new(&row.id).fg(Color::Blue),
            Cell::new(&row.year),
            Cell::new(row.kind),
            Cell::new(&row.citation),
        ]);
    }
    table
}

pub fn print_facets(index: &FacetIndex) {
    println!("{}", facets_table(index));
}

/// One row per facet with its options in display order.
pub fn facets_table(index: &FacetIndex) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Facet"),
        header_cell("Options"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for facet in Facet::all() {
        let options = index.options(*facet);
        let values = options
            .iter()
            .map(|option| {
                if option.value == option.label {
                    option.value.clone()
                } else {
                    format!("{} ({})", option.value, option.label)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let values_cell = if values.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(values)
        };
        table.add_row(vec![
            Cell::new(facet.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(options.len()),
            values_cell,
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_listing_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn outcome_cell(outcome: &RenderOutcome) -> Cell {
    match outcome {
        RenderOutcome::Rendered => Cell::new("rendered").fg(Color::Green),
        RenderOutcome::Empty => Cell::new("empty").fg(Color::Yellow),
        RenderOutcome::Skipped(reason) => dim_cell(format!("skipped ({})", skip_label(*reason))),
        RenderOutcome::Failed(message) => Cell::new(format!("failed: {message}"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::AlreadyRendering => "render in progress",
        SkipReason::MissingRegion => "missing region",
        SkipReason::NotRendered => "not rendered",
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn section_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
