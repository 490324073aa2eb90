use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

const HEADERS: [&str; 6] = [
    "Name",
    "Favorites",
    "Episodes",
    "Type",
    "Demographics",
    "Themes",
];

/// Tabular listing of the filtered records.
pub fn filtered_table(ui: &mut Ui, view: &FilteredView<'_>) {
    if view.is_empty() {
        ui.weak("No data for the current filters.");
        return;
    }

    let records: Vec<_> = view.records().collect();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(200.0))
        .columns(Column::auto().at_least(70.0), 3)
        .columns(Column::auto().at_least(120.0), 2)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let record = records[row.index()];
                row.col(|ui| {
                    ui.label(&record.name);
                });
                row.col(|ui| {
                    ui.label(numeric_cell(record.favorites));
                });
                row.col(|ui| {
                    ui.label(numeric_cell(record.episodes));
                });
                row.col(|ui| {
                    ui.label(record.kind.as_deref().unwrap_or("–"));
                });
                row.col(|ui| {
                    ui.label(record.demographics.join(", "));
                });
                row.col(|ui| {
                    ui.label(record.themes.join(", "));
                });
            });
        });
}

fn numeric_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => "–".to_string(),
    }
}
