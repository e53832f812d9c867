//! Metric CSV loading.
//!
//! Reads the cleaned metric dataset into [`RawRecord`]s. Every column other
//! than the three key columns is kept verbatim; numeric interpretation is
//! left to [`crate::parsing`] at lookup time.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;

use school_map_district_models::RawRecord;

use crate::IngestError;
use crate::parsing::parse_year;

/// Header of the district code column.
pub const CODE_COLUMN: &str = "District Code";
/// Header of the district name column.
pub const NAME_COLUMN: &str = "District Name";
/// Header of the year column.
pub const YEAR_COLUMN: &str = "Year";

/// Parses CSV text from `reader` into records, in file order.
///
/// Rows whose year does not parse are skipped with a warning. Codes are
/// kept raw; rows with malformed codes are dropped later, when indexes are
/// built. Cells that are not valid UTF-8 are decoded lossily, so a bad
/// value normalizes to absent instead of failing the whole file.
///
/// # Errors
///
/// * [`IngestError::Csv`] if the CSV is malformed.
/// * [`IngestError::MissingColumn`] if a key column is absent from the
///   header row.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode(h).trim().to_owned())
        .collect();

    let code_idx = column_index(&headers, CODE_COLUMN)?;
    let name_idx = column_index(&headers, NAME_COLUMN)?;
    let year_idx = column_index(&headers, YEAR_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped: u64 = 0;

    for (row, result) in reader.byte_records().enumerate() {
        let row_data = result?;
        let cell = |i: usize| row_data.get(i).map_or(Cow::Borrowed(""), decode);

        let Some(year) = parse_year(&cell(year_idx)) else {
            skipped += 1;
            log::warn!(
                "Skipping CSV row {}: unparseable year '{}'",
                row + 2,
                cell(year_idx)
            );
            continue;
        };

        let values: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != code_idx && *i != name_idx && *i != year_idx)
            .filter_map(|(i, header)| {
                row_data
                    .get(i)
                    .map(|v| (header.clone(), decode(v).into_owned()))
            })
            .collect();

        records.push(RawRecord {
            code: cell(code_idx).trim().to_owned(),
            name: cell(name_idx).trim().to_owned(),
            year,
            values,
        });
    }

    log::info!(
        "Read {} metric rows ({skipped} skipped, {} metric columns)",
        records.len(),
        headers.len().saturating_sub(3)
    );

    Ok(records)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(IngestError::MissingColumn { column: name })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
District Code,District Name,Year,grad_# Graduated,sal_Average Salary
350000,Boston,2021,78.4%,\"$90,123\"
00010000,Abington,2021,93.1%,
10000,Abington,2020,92.0%,\"$75,000\"
";

    #[test]
    fn reads_rows_in_order() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].code, "350000");
        assert_eq!(records[0].name, "Boston");
        assert_eq!(records[0].year, 2021);
        assert_eq!(records[0].value("grad_# Graduated"), Some("78.4%"));
        assert_eq!(records[0].value("sal_Average Salary"), Some("$90,123"));

        assert_eq!(records[1].value("sal_Average Salary"), Some(""));
        assert_eq!(records[2].year, 2020);
    }

    #[test]
    fn key_columns_are_not_metric_values() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records[0].value(CODE_COLUMN), None);
        assert_eq!(records[0].value(YEAR_COLUMN), None);
        assert_eq!(records[0].values.len(), 2);
    }

    #[test]
    fn skips_rows_with_bad_years() {
        let csv = "District Code,District Name,Year,x\n1,A,2021,1\n2,B,,2\n3,C,soon,3\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "District Code,District Name,Year,x,y\n1,A,2021,5\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].value("x"), Some("5"));
        assert_eq!(records[0].value("y"), None);
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let csv = "Code,District Name,Year\n1,A,2021\n";
        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(IngestError::MissingColumn {
                column: "District Code"
            })
        ));
    }

    #[test]
    fn invalid_utf8_cells_load_as_unparseable_values() {
        let csv: &[u8] = b"District Code,District Name,Year,x,y\n1,Caf\xe9,2021,9\xff%,7\n";
        let records = read_records(csv).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Caf\u{fffd}");
        assert_eq!(records[0].value("x"), Some("9\u{fffd}%"));
        assert_eq!(crate::parsing::normalize_field(&records[0], "x"), None);
        assert_eq!(crate::parsing::normalize_field(&records[0], "y"), Some(7.0));
    }

    #[test]
    fn trims_headers() {
        let csv = " District Code , District Name ,Year, x \n1,A,2021,5\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].value("x"), Some("5"));
    }
}
