//! The loaded, read-only dataset shared by every view.

use std::collections::{BTreeMap, BTreeSet};

use school_map_district_models::{DistrictCode, RawRecord, YearRange};

use crate::IngestError;

/// All metric rows plus lookups derived from them at load time.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<RawRecord>,
    years: Vec<i32>,
    year_range: YearRange,
    names: BTreeMap<DistrictCode, String>,
}

impl Dataset {
    /// Builds the dataset from records in input order.
    ///
    /// The name for a district is taken from its last row with a
    /// non-empty name, matching the index tie-break.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::NoRecords`] if `records` is empty, since no
    /// year range can be derived.
    pub fn new(records: Vec<RawRecord>) -> Result<Self, IngestError> {
        let years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let year_range =
            YearRange::from_years(years.iter().copied()).ok_or(IngestError::NoRecords)?;

        let mut names = BTreeMap::new();
        let mut rejected_codes: u64 = 0;
        for record in &records {
            let Some(code) = record.district_code() else {
                rejected_codes += 1;
                continue;
            };
            if record.name.is_empty() {
                names.entry(code).or_default();
            } else {
                names.insert(code, record.name.clone());
            }
        }

        if rejected_codes > 0 {
            log::warn!("{rejected_codes} rows have district codes that do not normalize");
        }
        log::info!(
            "Dataset: {} rows, {} districts, years {}-{}",
            records.len(),
            names.len(),
            year_range.min,
            year_range.max
        );

        Ok(Self {
            records,
            years,
            year_range,
            names,
        })
    }

    /// Rows in input order.
    #[must_use]
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Observed year range.
    #[must_use]
    pub const fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Display name recorded for `code`, if any.
    #[must_use]
    pub fn district_name(&self, code: &DistrictCode) -> Option<&str> {
        self.names
            .get(code)
            .map(String::as_str)
            .filter(|n| !n.is_empty())
    }

    /// Whether any row carries `code`.
    #[must_use]
    pub fn contains_district(&self, code: &DistrictCode) -> bool {
        self.names.contains_key(code)
    }

    /// Every district with a valid code, ordered by name and then code.
    #[must_use]
    pub fn districts_by_name(&self) -> Vec<(&DistrictCode, &str)> {
        let mut districts: Vec<(&DistrictCode, &str)> = self
            .names
            .iter()
            .map(|(code, name)| (code, name.as_str()))
            .collect();
        districts.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        districts
    }
}
