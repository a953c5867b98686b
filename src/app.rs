use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CdpdApp {
    pub state: AppState,
}

impl CdpdApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for CdpdApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: current view header ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Timeline => views::timeline(ui, &self.state),
            View::Map => views::map(ui, &self.state),
            View::Trend => views::trend(ui, &self.state),
        });
    }
}
