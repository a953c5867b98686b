use std::fmt;

// ---------------------------------------------------------------------------
// Status – the CDPD death-penalty legal status code (0–4)
// ---------------------------------------------------------------------------

/// Legal status of the death penalty for one country in one year,
/// per the CDPD coding scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// 0 – fully abolished.
    Abolished,
    /// 1 – abolished for ordinary crimes only.
    AbolishedOrdinaryCrimes,
    /// 2 – abolished for ordinary crimes only, but used during the last 10 years.
    AbolishedOrdinaryCrimesRecentUse,
    /// 3 – abolished in practice (legally retained, not actively used).
    AbolishedInPractice,
    /// 4 – retained and used.
    Retained,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Abolished,
        Status::AbolishedOrdinaryCrimes,
        Status::AbolishedOrdinaryCrimesRecentUse,
        Status::AbolishedInPractice,
        Status::Retained,
    ];

    /// Parse a raw CDPD code. Anything outside 0–4 is rejected.
    pub fn from_code(code: i64) -> Option<Status> {
        match code {
            0 => Some(Status::Abolished),
            1 => Some(Status::AbolishedOrdinaryCrimes),
            2 => Some(Status::AbolishedOrdinaryCrimesRecentUse),
            3 => Some(Status::AbolishedInPractice),
            4 => Some(Status::Retained),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Status::Abolished => 0,
            Status::AbolishedOrdinaryCrimes => 1,
            Status::AbolishedOrdinaryCrimesRecentUse => 2,
            Status::AbolishedInPractice => 3,
            Status::Retained => 4,
        }
    }

    /// Human-readable label matching the original dataset documentation.
    pub fn label(self) -> &'static str {
        match self {
            Status::Abolished => "Abolished",
            Status::AbolishedOrdinaryCrimes => "Abolished for ordinary crimes only",
            Status::AbolishedOrdinaryCrimesRecentUse => {
                "Abolished for ordinary crimes only, but used during the last 10 years"
            }
            Status::AbolishedInPractice => "Abolished in practice",
            Status::Retained => "Retained",
        }
    }

    /// Whether the death penalty still exists in any form (code > 0).
    pub fn is_non_abolition(self) -> bool {
        self != Status::Abolished
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.code(), self.label())
    }
}

// ---------------------------------------------------------------------------
// CountryYear – one joined row
// ---------------------------------------------------------------------------

/// One country-year observation, already joined against the COW→ISO3 lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryYear {
    /// Correlates of War numeric country identifier (the join key).
    pub cow_code: i64,
    pub year: i32,
    pub status: Status,
    pub country: String,
    /// ISO 3166-1 alpha-3 code; `None` when the lookup had no entry.
    /// The row is kept either way (left join), the map view just skips it.
    pub iso3: Option<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete joined table
// ---------------------------------------------------------------------------

/// The full joined dataset. Built once at startup and never mutated;
/// views share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All country-year rows, in primary-source order.
    pub records: Vec<CountryYear>,
    /// Most recent year present, `None` for an empty dataset.
    latest_year: Option<i32>,
    /// Rows without an ISO3 mapping (excluded from the map view).
    unmapped: usize,
}

impl Dataset {
    pub fn from_records(records: Vec<CountryYear>) -> Self {
        let latest_year = records.iter().map(|r| r.year).max();
        let unmapped = records.iter().filter(|r| r.iso3.is_none()).count();
        Dataset {
            records,
            latest_year,
            unmapped,
        }
    }

    /// Most recent year in the data. The distribution view always uses this.
    pub fn latest_year(&self) -> Option<i32> {
        self.latest_year
    }

    /// Inclusive (min, max) year span, `None` when empty.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        Some((min, self.latest_year?))
    }

    /// Number of rows missing an ISO3 code (a data-quality gap, not an error).
    pub fn unmapped_count(&self) -> usize {
        self.unmapped
    }

    /// Number of distinct countries, by COW code.
    pub fn country_count(&self) -> usize {
        let mut codes: Vec<i64> = self.records.iter().map(|r| r.cow_code).collect();
        codes.sort_unstable();
        codes.dedup();
        codes.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::from_code(status.code() as i64), Some(status));
        }
        assert_eq!(Status::from_code(5), None);
        assert_eq!(Status::from_code(-1), None);
    }

    #[test]
    fn only_abolished_counts_as_abolition() {
        assert!(!Status::Abolished.is_non_abolition());
        for status in &Status::ALL[1..] {
            assert!(status.is_non_abolition());
        }
    }

    #[test]
    fn dataset_indices() {
        let ds = Dataset::from_records(vec![
            row(2, 1990, Status::Retained, Some("USA")),
            row(2, 2000, Status::Retained, Some("USA")),
            row(999, 1990, Status::Abolished, None),
        ]);
        assert_eq!(ds.latest_year(), Some(2000));
        assert_eq!(ds.year_span(), Some((1990, 2000)));
        assert_eq!(ds.unmapped_count(), 1);
        assert_eq!(ds.country_count(), 2);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.latest_year(), None);
        assert_eq!(ds.year_span(), None);
    }

    fn row(cow: i64, year: i32, status: Status, iso3: Option<&str>) -> CountryYear {
        CountryYear {
            cow_code: cow,
            year,
            status,
            country: format!("c{cow}"),
            iso3: iso3.map(str::to_string),
        }
    }
}
