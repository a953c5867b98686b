mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use app::CdpdApp;
use eframe::egui;
use state::AppState;

const DEFAULT_PRIMARY: &str = "death_penalty_2024.xlsx";
const DEFAULT_MAPPING: &str = "cow2iso.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Two optional positional paths: the country-year table and the lookup.
    let mut args = std::env::args().skip(1);
    let primary = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_PRIMARY.to_string()));
    let mapping = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_MAPPING.to_string()));

    // Load and join once; everything downstream shares the result read-only.
    let dataset = data::loader::load(&primary, &mapping).with_context(|| {
        format!(
            "loading dataset from {} and {}",
            primary.display(),
            mapping.display()
        )
    })?;
    let state = AppState::new(Arc::new(dataset));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Death Penalty Data Visuals",
        options,
        Box::new(|_cc| Ok(Box::new(CdpdApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with an error: {e}"))
}
