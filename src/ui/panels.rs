use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{site_options, SiteFilter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// "All Sites" followed by every site present in the data.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let current = state.selection.site.clone();
    let mut chosen: Option<SiteFilter> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Launch site:");
        egui::ComboBox::from_id_salt("site-dropdown")
            .selected_text(current.label())
            .width(220.0)
            .show_ui(ui, |ui: &mut Ui| {
                for option in site_options(&state.dataset) {
                    if ui
                        .selectable_label(option == current, option.label())
                        .clicked()
                    {
                        chosen = Some(option);
                    }
                }
            });
    });

    if let Some(site) = chosen {
        state.select_site(site);
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Two sliders forming the inclusive payload range, plus the tick marks.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.label("Payload range (Kg):");

    let range = state.slider.min..=state.slider.max;
    let step = state.slider.step;
    let mut lo = state.payload_lo;
    let mut hi = state.payload_hi;

    let lo_changed = ui
        .add(
            egui::Slider::new(&mut lo, range.clone())
                .step_by(step)
                .text("min"),
        )
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, range).step_by(step).text("max"))
        .changed();

    if lo_changed || hi_changed {
        state.set_payload_bounds(lo, hi, lo_changed);
    }

    ui.horizontal(|ui: &mut Ui| {
        for mark in &state.slider.marks {
            ui.label(RichText::new(format!("{mark:.0}")).weak().small());
        }
    });
}

// ---------------------------------------------------------------------------
// Booster legend
// ---------------------------------------------------------------------------

pub fn booster_legend(ui: &mut Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Booster version:");
        for (label, color) in state.booster_colors.legend_entries() {
            ui.label(RichText::new(format!("● {label}")).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let summary = state.summary();
        ui.label(format!(
            "{} launches loaded, {} in range",
            state.dataset.len(),
            state.scattered_count()
        ));
        if let Some(rate) = summary.success_rate() {
            ui.separator();
            ui.label(format!(
                "{}: {}/{} successful ({:.1}%)",
                state.selection.site.label(),
                summary.successes,
                summary.launches,
                rate * 100.0
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
