use eframe::egui::{Align2, Color32, FontId, RichText, ScrollArea, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color;
use crate::data::aggregate::CHART_YEAR_RANGE;
use crate::data::model::{CountryYear, Status};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Timeline view – non-abolition line chart + latest-year distribution bars
// ---------------------------------------------------------------------------

/// Render the time-series/bar combo view.
pub fn timeline(ui: &mut Ui, state: &AppState) {
    let (lo, hi) = CHART_YEAR_RANGE;
    ui.heading(format!("Global Death Penalty Statistics ({lo} - {hi})"));
    ui.add_space(4.0);

    if state.timeline.is_empty() && state.distribution.is_none() {
        empty_placeholder(ui, "No data in the charted year range.");
        return;
    }

    let half_height = ui.available_height() * 0.6;
    ui.columns(2, |cols: &mut [Ui]| {
        non_abolition_chart(&mut cols[0], state, half_height);
        distribution_chart(&mut cols[1], state, half_height);
    });

    ui.add_space(8.0);
    status_legend(ui);
}

fn non_abolition_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.label("Number of Countries That Have Not Abolished the Death Penalty");

    let points: PlotPoints = state
        .timeline
        .iter()
        .map(|c| [c.year as f64, c.count as f64])
        .collect();

    Plot::new("non_abolition_over_time")
        .height(height)
        .x_axis_label("Year")
        .y_axis_label("Countries with Death Penalty")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(1.5));
        });
}

fn distribution_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let Some((year, counts)) = &state.distribution else {
        empty_placeholder(ui, "No data for the distribution chart.");
        return;
    };
    ui.label(format!("Distribution of Death Penalty Status in {year}"));

    let bars: Vec<Bar> = counts
        .iter()
        .map(|c| {
            Bar::new(c.status.code() as f64, c.count as f64)
                .width(0.7)
                .fill(color::status_color(c.status))
                .name(c.status.label())
        })
        .collect();

    Plot::new("status_distribution")
        .height(height)
        .x_axis_label("Death Penalty Status")
        .y_axis_label("Number of Countries")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Map view – one tile per country, colored by status
// ---------------------------------------------------------------------------

/// Render the world status view for the selected year. The choropleth of the
/// original is drawn as a tile grid: one colored tile per ISO3-mapped
/// country. Rows without an ISO3 code cannot be placed and are skipped.
pub fn map(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("Global Death Penalty Status in {}", state.map_year));
    ui.add_space(4.0);

    let records = state.map_records();
    let mut mapped: Vec<&CountryYear> = records
        .iter()
        .copied()
        .filter(|r| r.iso3.is_some())
        .collect();
    mapped.sort_by(|a, b| a.iso3.cmp(&b.iso3));
    let skipped = records.len() - mapped.len();

    if mapped.is_empty() {
        empty_placeholder(
            ui,
            &format!("No mappable data for {}.", state.map_year),
        );
        return;
    }

    if skipped > 0 {
        ui.label(
            RichText::new(format!(
                "{skipped} countries have no ISO3 code and are not shown"
            ))
            .weak(),
        );
        ui.add_space(4.0);
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.spacing_mut().item_spacing = Vec2::splat(4.0);
                for rec in &mapped {
                    country_tile(ui, rec);
                }
            });
            ui.add_space(8.0);
            status_legend(ui);
        });
}

fn country_tile(ui: &mut Ui, rec: &CountryYear) {
    // mapped rows only reach this point
    let iso3 = rec.iso3.as_deref().unwrap_or("???");
    let fill = color::status_color(rec.status);

    let (rect, response) = ui.allocate_exact_size(Vec2::new(56.0, 34.0), Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 3.0, fill);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            iso3,
            FontId::monospace(13.0),
            contrast_text_color(fill),
        );
    }
    response.on_hover_text(format!("{} — {}", rec.country, rec.status.label()));
}

/// Black on light tiles, white on dark ones.
fn contrast_text_color(fill: Color32) -> Color32 {
    let luma =
        0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

// ---------------------------------------------------------------------------
// Trend view – one line per status code over the full year range
// ---------------------------------------------------------------------------

/// Render the status-trend view.
pub fn trend(ui: &mut Ui, state: &AppState) {
    ui.heading("Trends in Death Penalty Policies Over Time");
    ui.add_space(4.0);

    if state.trend.is_empty() {
        empty_placeholder(ui, "No trend data.");
        return;
    }

    let plot_height = ui.available_height() * 0.7;
    Plot::new("status_trend")
        .height(plot_height)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of Countries")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            for status in Status::ALL {
                let points: PlotPoints = state
                    .trend
                    .iter()
                    .filter(|p| p.status == status)
                    .map(|p| [p.year as f64, p.count as f64])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .name(status.to_string())
                        .color(color::status_color(status))
                        .width(1.5),
                );
            }
        });

    ui.add_space(8.0);
    status_legend(ui);
}

// ---------------------------------------------------------------------------
// Shared bits
// ---------------------------------------------------------------------------

/// The status-code legend shown under every view, in the wording of the
/// source dataset's documentation.
fn status_legend(ui: &mut Ui) {
    ui.strong("Death Penalty Status Values:");
    for (label, swatch) in color::legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::new(12.0, 12.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, swatch);
            ui.label(label);
        });
    }
}

fn empty_placeholder(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(message);
    });
}
