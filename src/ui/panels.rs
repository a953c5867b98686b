use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::MAP_YEARS;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the side navigation: view selector, the map's decade selector,
/// and a short dataset summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Death Penalty Data Visuals");
    ui.separator();

    ui.strong("Go to");
    for view in View::ALL {
        ui.radio_value(&mut state.view, view, view.label());
    }

    if state.view == View::Map {
        ui.separator();
        ui.strong("Select Year");
        egui::ComboBox::from_id_salt("map_year")
            .selected_text(state.map_year.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for year in MAP_YEARS {
                    ui.selectable_value(&mut state.map_year, year, year.to_string());
                }
            });
    }

    ui.separator();
    dataset_summary(ui, state);
}

fn dataset_summary(ui: &mut Ui, state: &AppState) {
    let ds = &state.dataset;
    ui.label(format!("{} country-year rows", ds.len()));
    ui.label(format!("{} countries", ds.country_count()));
    if let Some((min, max)) = ds.year_span() {
        ui.label(format!("Years {min}–{max}"));
    }
    if ds.unmapped_count() > 0 {
        ui.label(
            RichText::new(format!("{} rows without ISO3 code", ds.unmapped_count())).weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Thin header bar: current view title plus the visible row count.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(state.view.label());
        ui.separator();
        match state.view {
            View::Timeline => {
                ui.label(format!("{} charted years", state.timeline.len()));
            }
            View::Map => {
                ui.label(format!(
                    "{} countries in {}",
                    state.map_records().len(),
                    state.map_year
                ));
            }
            View::Trend => {
                ui.label(format!("{} (year, status) groups", state.trend.len()));
            }
        }
    });
}
