use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{Column, TableView};

const ROW_HEIGHT: f32 = 18.0;
const MAX_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

/// Render the rows of `view` restricted to `columns`.
///
/// `id` must be unique per table on the page.
pub fn data_table(ui: &mut Ui, id: &str, view: &TableView<'_>, columns: &[Column]) {
    if view.is_empty() {
        ui.weak("No matching companies.");
        return;
    }
    let table = view.table();

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(TableColumn::auto().at_least(60.0), columns.len())
            .max_scroll_height(MAX_HEIGHT)
            .header(20.0, |mut header| {
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col.header(table));
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let Some(record) = view.get(row.index()) else {
                        return;
                    };
                    for col in columns {
                        row.col(|ui: &mut Ui| {
                            let text = col.cell(record);
                            if col.is_numeric() {
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    ui.label(text);
                                });
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });
}
