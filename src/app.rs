use eframe::egui::{self, ScrollArea, Ui};

use crate::callbacks::OutputTarget;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub title: String,
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(title: String, state: AppState) -> Self {
        Self { title, state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: dropdown, pie, slider, scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.heading(egui::RichText::new(&self.title).size(32.0));
                    });
                    ui.add_space(8.0);

                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::figure(
                        ui,
                        "success-pie-chart",
                        self.state.figure(OutputTarget::SuccessPieChart),
                        320.0,
                        &self.state,
                    );
                    ui.separator();

                    panels::payload_slider(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::figure(
                        ui,
                        "success-payload-scatter-chart",
                        self.state.figure(OutputTarget::SuccessPayloadScatterChart),
                        360.0,
                        &self.state,
                    );
                    panels::booster_legend(ui, &self.state);
                    ui.separator();

                    egui::CollapsingHeader::new("Launches in range")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            table::scattered_table(ui, &self.state);
                        });
                });
        });
    }
}
