#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Code-keyed metric index scoped to one metric and year.
//!
//! Indexes are rebuilt from the raw records on every year or metric change
//! rather than patched in place. At a few thousand rows a rebuild is far
//! cheaper than a user interaction, and a fresh build cannot leak entries
//! from a previous selection.
//!
//! # Tie-break
//!
//! When the same canonical code appears in more than one row for the
//! indexed year, the row that comes later in input order wins.

use std::collections::BTreeMap;

use school_map_district_models::{DistrictCode, RawRecord};
use school_map_ingest::normalize_field;
use school_map_metrics_models::MetricDefinition;
use serde::Serialize;

/// Identifies what a [`MetricIndex`] was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexScope {
    /// Catalog key of the metric.
    pub metric_key: String,
    /// CSV column the values came from.
    pub column: String,
    /// Year the rows were filtered to.
    pub year: i32,
}

/// Counters from one index build, logged at `debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows whose year matched.
    pub matched_rows: usize,
    /// Matching rows dropped because the code did not normalize.
    pub rejected_codes: usize,
    /// Matching rows dropped because the value was absent.
    pub absent_values: usize,
    /// Inserts that replaced an earlier row for the same code.
    pub overwritten: usize,
}

/// Builds the code → value mapping for `column` in `year`.
///
/// A code is present iff at least one of its rows for `year` has a value
/// that normalizes to a finite number; see the crate docs for the
/// tie-break. Returns an empty map when no row matches the year.
#[must_use]
pub fn build_index(records: &[RawRecord], column: &str, year: i32) -> BTreeMap<DistrictCode, f64> {
    build_index_with_stats(records, column, year).0
}

fn build_index_with_stats(
    records: &[RawRecord],
    column: &str,
    year: i32,
) -> (BTreeMap<DistrictCode, f64>, BuildStats) {
    let mut values = BTreeMap::new();
    let mut stats = BuildStats::default();

    for record in records.iter().filter(|r| r.year == year) {
        stats.matched_rows += 1;

        let Some(code) = record.district_code() else {
            stats.rejected_codes += 1;
            continue;
        };
        let Some(value) = normalize_field(record, column) else {
            stats.absent_values += 1;
            continue;
        };

        if values.insert(code, value).is_some() {
            stats.overwritten += 1;
        }
    }

    (values, stats)
}

/// Metric values for one (metric, year) pair keyed by canonical code.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricIndex {
    scope: IndexScope,
    values: BTreeMap<DistrictCode, f64>,
}

impl MetricIndex {
    /// Builds a fresh index of `def`'s column for `year`.
    #[must_use]
    pub fn build(records: &[RawRecord], def: &MetricDefinition, year: i32) -> Self {
        let (values, stats) = build_index_with_stats(records, &def.column, year);

        log::debug!(
            "Built index {}@{year}: {} entries from {} rows \
             ({} bad codes, {} absent, {} overwritten)",
            def.key,
            values.len(),
            stats.matched_rows,
            stats.rejected_codes,
            stats.absent_values,
            stats.overwritten,
        );

        Self {
            scope: IndexScope {
                metric_key: def.key.clone(),
                column: def.column.clone(),
                year,
            },
            values,
        }
    }

    /// What this index was built for.
    #[must_use]
    pub const fn scope(&self) -> &IndexScope {
        &self.scope
    }

    /// Value for `code`, or `None` when the district has no data for this
    /// metric and year. `None` is never the same thing as `0.0`.
    #[must_use]
    pub fn get_value(&self, code: &DistrictCode) -> Option<f64> {
        self.values.get(code).copied()
    }

    /// Whether `code` has a value.
    #[must_use]
    pub fn contains(&self, code: &DistrictCode) -> bool {
        self.values.contains_key(code)
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&DistrictCode, f64)> {
        self.values.iter().map(|(code, v)| (code, *v))
    }

    /// Values in code order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().copied()
    }

    /// Number of districts with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no district has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One point of a district's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearValue {
    /// School year.
    pub year: i32,
    /// Normalized value.
    pub value: f64,
}

/// Collects every year's value of `column` for `code`, ascending by year.
///
/// Years with no finite value are omitted. Duplicate rows for a year follow
/// the same later-wins tie-break as [`build_index`].
#[must_use]
pub fn district_series(records: &[RawRecord], column: &str, code: &DistrictCode) -> Vec<YearValue> {
    let mut by_year = BTreeMap::new();

    for record in records {
        if record.district_code().as_ref() != Some(code) {
            continue;
        }
        if let Some(value) = normalize_field(record, column) {
            by_year.insert(record.year, value);
        }
    }

    by_year
        .into_iter()
        .map(|(year, value)| YearValue { year, value })
        .collect()
}
