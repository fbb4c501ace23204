use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::filter::SectorChoice;
use crate::data::model::Column;
use crate::state::{AppState, Event};
use crate::ui::{plot, table};

const DATA_SOURCE_URL: &str = "https://www.kaggle.com/datasets/priteshraj10/sp-500-companies";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar. Interactions are pushed to `events`, not applied.
pub fn side_panel(ui: &mut Ui, state: &AppState, events: &mut Vec<Event>) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Filter by Sector");
            ui.separator();

            if state.sectors.is_empty() {
                ui.label("No sectors in dataset.");
                return;
            }

            // ---- Single sector ----
            ui.strong("Select a sector:");
            egui::ComboBox::from_id_salt("sector")
                .selected_text(&state.params.sector)
                .show_ui(ui, |ui: &mut Ui| {
                    for sector in &state.sectors {
                        if ui
                            .selectable_label(*sector == state.params.sector, sector)
                            .clicked()
                        {
                            events.push(Event::SelectSector(sector.clone()));
                        }
                    }
                });

            // ---- P/E ceiling ----
            let (lo, hi) = state.pe_range;
            let mut pe_max = state.params.pe_ceiling;
            if ui
                .add(egui::Slider::new(&mut pe_max, lo..=hi).text("Max P/E"))
                .changed()
            {
                events.push(Event::SetPeCeiling(pe_max));
            }
            ui.separator();

            // ---- Multiple sectors ----
            let n_selected = state.params.selected_sectors.len();
            let header_text = format!(
                "Select multiple sectors  ({n_selected}/{})",
                state.sectors.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("sectors")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for sector in &state.sectors {
                        let mut checked = state.params.selected_sectors.contains(sector);
                        if ui.checkbox(&mut checked, sector).changed() {
                            events.push(Event::ToggleSector(sector.clone()));
                        }
                    }
                });
            if ui.button("Show").clicked() {
                events.push(Event::ShowSelectedSectors);
            }
            ui.separator();

            // ---- Strong stocks ----
            ui.heading("Strong Stocks Filter");
            ui.strong("Select Sector for Strong Stocks:");
            let current = &state.params.strong_sector;
            egui::ComboBox::from_id_salt("strong_sector")
                .selected_text(current.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    let choices = std::iter::once(SectorChoice::All).chain(
                        state
                            .strong_sectors
                            .iter()
                            .map(|s| SectorChoice::Sector(s.clone())),
                    );
                    for choice in choices {
                        let label = choice.to_string();
                        if ui.selectable_label(*current == choice, label).clicked() {
                            events.push(Event::SelectStrongSector(choice));
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Central panel – tables and charts
// ---------------------------------------------------------------------------

/// Render the page body, section by section.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(RichText::new("📊 S&P 500 Company Financials").size(28.0));
                ui.label(RichText::new("Explore sectors, EPS, and P/E ratios!").size(16.0));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Data source:");
                ui.hyperlink_to(
                    "S&P 500 Companies – Constituents Financials (Kaggle)",
                    DATA_SOURCE_URL,
                );
            });
            ui.add_space(8.0);

            // ---- Raw data ----
            ui.heading("Raw data");
            let base = state.table();
            table::data_table(ui, "raw", &base.full_view(), &base.columns());
            section_divider(ui);

            // ---- Sector / P/E filter ----
            ui.heading("Filter by Sector and P/E Ratio");
            ui.label("Filter from the sidebar to see companies in a specific sector:");
            table::data_table(ui, "sector_pe", &state.sector_pe_view(), &base.columns());

            if let Some(view) = state.multi_sector_view() {
                ui.add_space(8.0);
                ui.strong(format!("Selected sectors ({} companies)", view.len()));
                table::data_table(ui, "multi_sector", &view, &base.columns());
            }
            section_divider(ui);

            // ---- Strong stocks ----
            ui.heading("Strong Stocks: High EPS & Low P/E Ratio");
            plot::scatter_plot(ui, &state.scatter_view(), &state.color_map);

            match state.strong_view() {
                Ok(view) => {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("Showing");
                        ui.strong(view.len().to_string());
                        ui.label("strong companies in sector:");
                        ui.strong(state.params.strong_sector.to_string());
                    });
                    table::data_table(ui, "strong", &view, &Column::SUMMARY);
                }
                Err(e) => {
                    ui.weak(format!("No data: {e}"));
                }
            }
            section_divider(ui);

            // ---- Sector counts ----
            ui.heading("Number of Companies per Sector");
            plot::sector_count_chart(ui, &state.sector_counts);
        });
}

fn section_divider(ui: &mut Ui) {
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status line above the page.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} companies loaded, {} sectors, {} in current filter",
            state.table().len(),
            state.sectors.len(),
            state.scatter_view().len()
        ));
    });
}
