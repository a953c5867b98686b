use std::sync::Arc;

use crate::data::aggregate::{
    self, StatusCount, TrendPoint, YearCount, CHART_YEAR_RANGE, MAP_YEARS,
};
use crate::data::model::{CountryYear, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The three views, mirroring the side navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Non-abolition time series plus latest-year distribution bars.
    Timeline,
    /// World status map for a selected decade year.
    Map,
    /// Status counts over time, one line per code.
    Trend,
}

impl View {
    pub const ALL: [View; 3] = [View::Timeline, View::Map, View::Trend];

    pub fn label(self) -> &'static str {
        match self {
            View::Timeline => "Time-Series Chart and Bar",
            View::Map => "Global Map",
            View::Trend => "Status Comparison",
        }
    }
}

/// The full UI state. The dataset is loaded once in `main` and shared
/// read-only; every chart series it implies is computed here, once.
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub view: View,
    /// Year the map view shows; constrained to `MAP_YEARS`.
    pub map_year: i32,

    /// Non-abolition counts restricted to the chart window (1924–2024).
    pub timeline: Vec<YearCount>,
    /// Latest-year status distribution, with the year it refers to.
    pub distribution: Option<(i32, Vec<StatusCount>)>,
    /// Full (year, status) trend series.
    pub trend: Vec<TrendPoint>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let (lo, hi) = CHART_YEAR_RANGE;
        let timeline = aggregate::count_non_abolished(&dataset.records)
            .into_iter()
            .filter(|c| (lo..=hi).contains(&c.year))
            .collect();
        let distribution = aggregate::status_distribution(&dataset.records);
        let trend = aggregate::status_trend(&dataset.records);

        AppState {
            dataset,
            view: View::Timeline,
            map_year: MAP_YEARS[0],
            timeline,
            distribution,
            trend,
        }
    }

    /// Rows for the currently selected map year (any ISO3 state; the map
    /// renderer itself skips rows without a code).
    pub fn map_records(&self) -> Vec<&CountryYear> {
        aggregate::filter_by_year(&self.dataset.records, self.map_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Status;

    fn dataset() -> Arc<Dataset> {
        let row = |year, code, iso3: Option<&str>| CountryYear {
            cow_code: 2,
            year,
            status: Status::from_code(code).unwrap(),
            country: "United States".into(),
            iso3: iso3.map(str::to_string),
        };
        Arc::new(Dataset::from_records(vec![
            row(1900, 4, Some("USA")), // before the chart window
            row(1950, 4, Some("USA")),
            row(2020, 4, Some("USA")),
            row(2020, 4, None),
        ]))
    }

    #[test]
    fn timeline_is_restricted_to_chart_window() {
        let state = AppState::new(dataset());
        let years: Vec<i32> = state.timeline.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![1950, 2020]);
    }

    #[test]
    fn distribution_targets_latest_year() {
        let state = AppState::new(dataset());
        let (year, counts) = state.distribution.expect("non-empty dataset");
        assert_eq!(year, 2020);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 2);
    }

    #[test]
    fn map_records_follow_selected_year() {
        let mut state = AppState::new(dataset());
        assert_eq!(state.map_year, 1950);
        assert_eq!(state.map_records().len(), 1);

        state.map_year = 2020;
        assert_eq!(state.map_records().len(), 2);

        state.map_year = 1960; // no data: empty, not an error
        assert!(state.map_records().is_empty());
    }
}
