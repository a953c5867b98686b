use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use serde::Deserialize;
use thiserror::Error;

use super::model::{CountryYear, Dataset, Status};

/// Sheet holding the country-year table in the published CDPD workbook.
pub const DEFAULT_SHEET: &str = "CDPD version 1 June 2024 (7)";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure while reading or joining the two source tables.
/// Any error aborts the load; there is no partial or degraded dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("failed to read workbook")]
    Workbook(#[from] calamine::XlsxError),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("failed to read CSV")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}: cannot coerce {column}='{value}'")]
    BadField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the primary country-year table and the COW→ISO3 lookup, then
/// left-join them on the integer country code.
///
/// Pure function of the two files; `main` calls it once and the result is
/// shared read-only for the rest of the process.
pub fn load(primary: &Path, mapping: &Path) -> Result<Dataset, LoadError> {
    let rows = load_primary(primary)?;
    let iso3_by_cow = load_mapping_file(mapping)?;
    Ok(join(rows, &iso3_by_cow))
}

/// One row of the primary table before the join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryRow {
    pub cow_code: i64,
    pub year: i32,
    pub status: Status,
    pub country: String,
}

/// Read the primary table. Dispatch by extension: the published CDPD is an
/// .xlsx workbook; .csv is accepted so synthetic data works too.
pub fn load_primary(path: &Path) -> Result<Vec<PrimaryRow>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" => load_primary_xlsx(path),
        "csv" => {
            let file = std::fs::File::open(path).map_err(|e| LoadError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
            load_primary_csv(file)
        }
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// XLSX primary loader
// ---------------------------------------------------------------------------

fn load_primary_xlsx(path: &Path) -> Result<Vec<PrimaryRow>, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet = if workbook.sheet_names().iter().any(|s| s == DEFAULT_SHEET) {
        DEFAULT_SHEET.to_string()
    } else {
        let first = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::NoWorksheet)?;
        log::warn!("worksheet '{DEFAULT_SHEET}' not found, falling back to '{first}'");
        first
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::NoWorksheet)?
        .iter()
        .map(|c| c.as_string().unwrap_or_default().trim().to_string())
        .collect();

    let cow_idx = column_index(&headers, "COWCODE")?;
    let year_idx = column_index(&headers, "Year")?;
    let status_idx = column_index(&headers, "Deathpenalty")?;
    let country_idx = column_index(&headers, "Country")?;

    let mut out = Vec::new();
    for (row_no, row) in rows.enumerate() {
        // Trailing blank rows are common in hand-maintained workbooks.
        if row.iter().all(|c| c.is_empty()) {
            continue;
        }
        let cow_code = cell_to_int(row.get(cow_idx)).ok_or_else(|| LoadError::BadField {
            row: row_no,
            column: "COWCODE",
            value: cell_text(row.get(cow_idx)),
        })?;
        let year = cell_to_int(row.get(year_idx)).ok_or_else(|| LoadError::BadField {
            row: row_no,
            column: "Year",
            value: cell_text(row.get(year_idx)),
        })? as i32;
        let status = cell_to_int(row.get(status_idx))
            .and_then(Status::from_code)
            .ok_or_else(|| LoadError::BadField {
                row: row_no,
                column: "Deathpenalty",
                value: cell_text(row.get(status_idx)),
            })?;
        let country = row
            .get(country_idx)
            .and_then(|c| c.as_string())
            .unwrap_or_default()
            .trim()
            .to_string();

        out.push(PrimaryRow {
            cow_code,
            year,
            status,
            country,
        });
    }

    Ok(out)
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn { column: name })
}

/// Coerce a spreadsheet cell to an integer. Excel stores numeric cells as
/// floats; an integral float coerces, a fractional one is a bad field.
/// Matches the variants directly: `as_i64` would truncate a fractional
/// float before the guard gets a chance to reject it.
fn cell_to_int(cell: Option<&Data>) -> Option<i64> {
    match cell? {
        Data::Int(i) => Some(*i),
        Data::Float(f) => (f.fract() == 0.0 && f.is_finite()).then_some(*f as i64),
        Data::String(s) => parse_int(s),
        _ => None,
    }
}

fn cell_text(cell: Option<&Data>) -> String {
    cell.map(|c| c.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// CSV primary loader
// ---------------------------------------------------------------------------

fn load_primary_csv<R: Read>(input: R) -> Result<Vec<PrimaryRow>, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let cow_idx = column_index(&headers, "COWCODE")?;
    let year_idx = column_index(&headers, "Year")?;
    let status_idx = column_index(&headers, "Deathpenalty")?;
    let country_idx = column_index(&headers, "Country")?;

    let mut out = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let cow_code = parse_int(field(cow_idx)).ok_or_else(|| LoadError::BadField {
            row: row_no,
            column: "COWCODE",
            value: field(cow_idx).to_string(),
        })?;
        let year = parse_int(field(year_idx)).ok_or_else(|| LoadError::BadField {
            row: row_no,
            column: "Year",
            value: field(year_idx).to_string(),
        })? as i32;
        let status = parse_int(field(status_idx))
            .and_then(Status::from_code)
            .ok_or_else(|| LoadError::BadField {
                row: row_no,
                column: "Deathpenalty",
                value: field(status_idx).to_string(),
            })?;

        out.push(PrimaryRow {
            cow_code,
            year,
            status,
            country: field(country_idx).to_string(),
        });
    }

    Ok(out)
}

/// Parse an integer, accepting the float spellings spreadsheets export
/// ("255" and "255.0" both coerce; "255.5" and "abc" do not).
fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    let f = s.parse::<f64>().ok()?;
    (f.fract() == 0.0 && f.is_finite()).then_some(f as i64)
}

// ---------------------------------------------------------------------------
// Mapping loader (cow2iso.csv)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MappingRow {
    cowcode: String,
    #[serde(rename = "Iso3")]
    iso3: String,
}

fn load_mapping_file(path: &Path) -> Result<HashMap<i64, String>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_mapping(file)
}

/// Read the COW→ISO3 lookup into a map. `cowcode` is unique by contract;
/// on a duplicate the first occurrence wins and a warning is logged.
pub fn load_mapping<R: Read>(input: R) -> Result<HashMap<i64, String>, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let mut out: HashMap<i64, String> = HashMap::new();

    for (row_no, result) in reader.deserialize::<MappingRow>().enumerate() {
        let row = result?;
        let cow_code = parse_int(&row.cowcode).ok_or_else(|| LoadError::BadField {
            row: row_no,
            column: "cowcode",
            value: row.cowcode.clone(),
        })?;
        let iso3 = row.iso3.trim().to_string();
        if let Some(existing) = out.get(&cow_code) {
            log::warn!(
                "duplicate cowcode {cow_code} in mapping ('{existing}' kept, '{iso3}' ignored)"
            );
            continue;
        }
        out.insert(cow_code, iso3);
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Left-join the primary rows onto the lookup. Every primary row is kept;
/// a missing match leaves `iso3` as `None` for the map view to skip.
pub fn join(rows: Vec<PrimaryRow>, iso3_by_cow: &HashMap<i64, String>) -> Dataset {
    let records: Vec<CountryYear> = rows
        .into_iter()
        .map(|r| CountryYear {
            iso3: iso3_by_cow.get(&r.cow_code).cloned(),
            cow_code: r.cow_code,
            year: r.year,
            status: r.status,
            country: r.country,
        })
        .collect();

    let dataset = Dataset::from_records(records);
    log::info!(
        "loaded {} rows ({} countries, years {:?})",
        dataset.len(),
        dataset.country_count(),
        dataset.year_span()
    );
    if dataset.unmapped_count() > 0 {
        log::warn!(
            "{} rows have no ISO3 mapping and will be absent from the map view",
            dataset.unmapped_count()
        );
    }
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: &str = "\
COWCODE,Year,Deathpenalty,Country
2,2000,4,United States
2,2001,4,United States
255.0,2000,0,Germany
999,2000,1,Nowhere
";

    const MAPPING: &str = "\
cowcode,Iso3
2,USA
255,DEU
";

    #[test]
    fn join_keeps_every_primary_row() {
        let rows = load_primary_csv(PRIMARY.as_bytes()).unwrap();
        let map = load_mapping(MAPPING.as_bytes()).unwrap();
        let ds = join(rows, &map);

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[0].iso3.as_deref(), Some("USA"));
        assert_eq!(ds.records[2].iso3.as_deref(), Some("DEU"));
        // No lookup entry for 999: row kept, iso3 absent.
        assert_eq!(ds.records[3].iso3, None);
        assert_eq!(ds.unmapped_count(), 1);
    }

    #[test]
    fn integral_float_key_coerces() {
        let rows = load_primary_csv(PRIMARY.as_bytes()).unwrap();
        assert_eq!(rows[2].cow_code, 255);
        assert_eq!(rows[2].country, "Germany");
    }

    #[test]
    fn non_numeric_key_is_a_bad_field() {
        let csv = "COWCODE,Year,Deathpenalty,Country\nabc,2000,0,X\n";
        let err = load_primary_csv(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::BadField { row, column, value } => {
                assert_eq!(row, 0);
                assert_eq!(column, "COWCODE");
                assert_eq!(value, "abc");
            }
            other => panic!("expected BadField, got {other:?}"),
        }
    }

    #[test]
    fn fractional_key_is_a_bad_field() {
        let csv = "COWCODE,Year,Deathpenalty,Country\n2.5,2000,0,X\n";
        assert!(matches!(
            load_primary_csv(csv.as_bytes()),
            Err(LoadError::BadField { column: "COWCODE", .. })
        ));
    }

    #[test]
    fn out_of_range_status_is_a_bad_field() {
        let csv = "COWCODE,Year,Deathpenalty,Country\n2,2000,7,X\n";
        assert!(matches!(
            load_primary_csv(csv.as_bytes()),
            Err(LoadError::BadField { column: "Deathpenalty", .. })
        ));
    }

    #[test]
    fn missing_column_aborts() {
        let csv = "COWCODE,Year,Country\n2,2000,X\n";
        assert!(matches!(
            load_primary_csv(csv.as_bytes()),
            Err(LoadError::MissingColumn { column: "Deathpenalty" })
        ));
    }

    #[test]
    fn duplicate_mapping_key_first_wins() {
        let csv = "cowcode,Iso3\n2,USA\n2,XXX\n";
        let map = load_mapping(csv.as_bytes()).unwrap();
        assert_eq!(map.get(&2).map(String::as_str), Some("USA"));
    }

    #[test]
    fn loading_twice_is_deterministic() {
        let a = join(
            load_primary_csv(PRIMARY.as_bytes()).unwrap(),
            &load_mapping(MAPPING.as_bytes()).unwrap(),
        );
        let b = join(
            load_primary_csv(PRIMARY.as_bytes()).unwrap(),
            &load_mapping(MAPPING.as_bytes()).unwrap(),
        );
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn xlsx_cell_coercion_rejects_fractional_floats() {
        assert_eq!(cell_to_int(Some(&Data::Int(42))), Some(42));
        assert_eq!(cell_to_int(Some(&Data::Float(255.0))), Some(255));
        assert_eq!(cell_to_int(Some(&Data::Float(2.5))), None);
        assert_eq!(cell_to_int(Some(&Data::Float(f64::NAN))), None);
        assert_eq!(cell_to_int(Some(&Data::String("42.0".into()))), Some(42));
        assert_eq!(cell_to_int(Some(&Data::String("abc".into()))), None);
        assert_eq!(cell_to_int(Some(&Data::Empty)), None);
        assert_eq!(cell_to_int(None), None);
    }

    #[test]
    fn parse_int_spellings() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" 42.0 "), Some(42));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("42.5"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("NaN"), None);
    }
}
