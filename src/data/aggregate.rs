use std::collections::BTreeMap;

use super::model::{CountryYear, Status};

/// Inclusive year window the time-series view restricts itself to.
pub const CHART_YEAR_RANGE: (i32, i32) = (1924, 2024);

/// Years offered by the map view's selector (decade steps).
pub const MAP_YEARS: [i32; 8] = [1950, 1960, 1970, 1980, 1990, 2000, 2010, 2020];

// ---------------------------------------------------------------------------
// Aggregate row types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub year: i32,
    pub status: Status,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Transforms – all pure functions over the joined rows
// ---------------------------------------------------------------------------

/// Rows for one year, original relative order preserved.
/// An empty result is a valid answer, not an error.
pub fn filter_by_year(records: &[CountryYear], year: i32) -> Vec<&CountryYear> {
    records.iter().filter(|r| r.year == year).collect()
}

/// Per-year count of countries that have not abolished the death penalty
/// (status code > 0), ascending by year. Years with no qualifying rows are
/// simply absent; there is no zero-fill.
pub fn count_non_abolished(records: &[CountryYear]) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for r in records.iter().filter(|r| r.status.is_non_abolition()) {
        *by_year.entry(r.year).or_default() += 1;
    }
    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Distribution of status codes in the most recent year present in the data.
/// Returns the chosen year alongside the counts (ascending by status code,
/// absent statuses omitted). The year is always the dataset maximum, never a
/// UI selection; see the design notes on this.
pub fn status_distribution(records: &[CountryYear]) -> Option<(i32, Vec<StatusCount>)> {
    let latest = records.iter().map(|r| r.year).max()?;
    let mut by_status: BTreeMap<Status, usize> = BTreeMap::new();
    for r in records.iter().filter(|r| r.year == latest) {
        *by_status.entry(r.status).or_default() += 1;
    }
    let counts = by_status
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();
    Some((latest, counts))
}

/// Count of countries per (year, status) pair over the full year range,
/// ascending by year then status code.
pub fn status_trend(records: &[CountryYear]) -> Vec<TrendPoint> {
    let mut by_pair: BTreeMap<(i32, Status), usize> = BTreeMap::new();
    for r in records {
        *by_pair.entry((r.year, r.status)).or_default() += 1;
    }
    by_pair
        .into_iter()
        .map(|((year, status), count)| TrendPoint {
            year,
            status,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, code: i64) -> CountryYear {
        CountryYear {
            cow_code: 100 + code,
            year,
            status: Status::from_code(code).unwrap(),
            country: format!("country-{code}"),
            iso3: Some(format!("C{code:02}")),
        }
    }

    /// The worked example: two non-abolition rows and one abolished row
    /// in the year 2000.
    fn example() -> Vec<CountryYear> {
        vec![row(2000, 1), row(2000, 1), row(2000, 0)]
    }

    #[test]
    fn filter_by_year_preserves_order_and_membership() {
        let records = vec![row(1990, 0), row(2000, 4), row(1990, 3), row(2010, 2)];
        let hits = filter_by_year(&records, 1990);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.year == 1990));
        assert_eq!(hits[0].status, Status::Abolished);
        assert_eq!(hits[1].status, Status::AbolishedInPractice);

        assert!(filter_by_year(&records, 1850).is_empty());
    }

    #[test]
    fn count_non_abolished_excludes_code_zero() {
        let counts = count_non_abolished(&example());
        assert_eq!(counts, vec![YearCount { year: 2000, count: 2 }]);
    }

    #[test]
    fn count_non_abolished_omits_all_abolished_years() {
        let records = vec![row(1990, 0), row(1990, 0), row(2000, 4)];
        let counts = count_non_abolished(&records);
        // 1990 has only code-0 rows, so no pair for it at all.
        assert_eq!(counts, vec![YearCount { year: 2000, count: 1 }]);
    }

    #[test]
    fn count_non_abolished_orders_ascending_by_year() {
        let records = vec![row(2010, 4), row(1950, 4), row(1980, 3)];
        let years: Vec<i32> = count_non_abolished(&records).iter().map(|c| c.year).collect();
        assert_eq!(years, vec![1950, 1980, 2010]);
    }

    #[test]
    fn distribution_uses_latest_year_and_sums_to_year_total() {
        let mut records = example();
        records.push(row(1995, 4)); // older year, must be ignored
        let (year, counts) = status_distribution(&records).unwrap();
        assert_eq!(year, 2000);
        assert_eq!(
            counts,
            vec![
                StatusCount { status: Status::Abolished, count: 1 },
                StatusCount { status: Status::AbolishedOrdinaryCrimes, count: 2 },
            ]
        );
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn distribution_of_empty_input_is_none() {
        assert_eq!(status_distribution(&[]), None);
    }

    #[test]
    fn trend_matches_worked_example() {
        let points = status_trend(&example());
        assert_eq!(
            points,
            vec![
                TrendPoint { year: 2000, status: Status::Abolished, count: 1 },
                TrendPoint { year: 2000, status: Status::AbolishedOrdinaryCrimes, count: 2 },
            ]
        );
    }

    #[test]
    fn trend_counts_sum_to_record_count() {
        let records = vec![
            row(1990, 0),
            row(1990, 4),
            row(2000, 4),
            row(2000, 4),
            row(2010, 3),
        ];
        let points = status_trend(&records);
        let total: usize = points.iter().map(|p| p.count).sum();
        assert_eq!(total, records.len());

        // Ordered by year, then status code within a year.
        let keys: Vec<(i32, u8)> = points.iter().map(|p| (p.year, p.status.code())).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
