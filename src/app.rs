use eframe::egui::{self, ScrollArea, Ui};

use crate::state::{AppState, ScenarioId};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Side panels: one per scenario ----
        egui::SidePanel::left("scenario_1_filters")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::scenario_filters(ui, &mut self.state, ScenarioId::First);
            });
        egui::SidePanel::right("scenario_2_filters")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::scenario_filters(ui, &mut self.state, ScenarioId::Second);
            });

        // ---- Central panel: results and comparison ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = self.state.session.as_mut() else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a sequence file to begin  (File → Open…)");
                });
                return;
            };

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.columns(2, |columns: &mut [Ui]| {
                        for (col, id) in columns.iter_mut().zip(ScenarioId::BOTH) {
                            panels::scenario_results(col, session, id);
                        }
                    });
                    ui.separator();
                    panels::comparison(ui, &session.comparison);
                });
        });
    }
}
