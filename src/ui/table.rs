use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Table of the records currently plotted in the scatter chart.
pub fn scattered_table(ui: &mut Ui, state: &AppState) {
    let records = state.scattered_records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("class");
            });
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = records[row.index()];
                row.col(|ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{} ({})", rec.outcome, rec.outcome.label()));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass));
                });
                row.col(|ui| {
                    ui.label(&rec.booster_version_category);
                });
            });
        });
}
