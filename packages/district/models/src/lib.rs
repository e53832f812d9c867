#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! School district identifier and raw metric record types.
//!
//! These are the shapes data takes before any metric has been selected: one
//! [`RawRecord`] per CSV row, one [`DistrictFeature`] per boundary polygon,
//! both joined through the canonical [`DistrictCode`].

pub mod code;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use code::{CODE_WIDTH, DistrictCode, InvalidDistrictCode};

/// One row of the metric dataset.
///
/// `(code, year)` is not guaranteed unique in source data. Consumers that
/// key by code apply last-write-wins in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// District code exactly as it appeared in the source (may be unpadded).
    pub code: String,
    /// District display name.
    pub name: String,
    /// School year the row describes.
    pub year: i32,
    /// Metric columns keyed by header name, values verbatim.
    pub values: BTreeMap<String, String>,
}

impl RawRecord {
    /// Returns the verbatim value of `column`, if the row has one.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Returns the canonical code for this row, or `None` if the raw code
    /// does not normalize.
    #[must_use]
    pub fn district_code(&self) -> Option<DistrictCode> {
        DistrictCode::parse(&self.code).ok()
    }
}

/// A district boundary feature reduced to its join keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictFeature {
    /// Canonical code, `None` when the feature's code property is missing
    /// or malformed. Such features always render as no-data.
    pub code: Option<DistrictCode>,
    /// Display name from the boundary file.
    pub name: Option<String>,
}

impl DistrictFeature {
    /// Whether the feature carries a usable display name.
    ///
    /// Boundary files label unassigned polygons `"Unknown"`.
    #[must_use]
    pub fn has_known_name(&self) -> bool {
        self.name
            .as_deref()
            .map(str::trim)
            .is_some_and(|n| !n.is_empty() && n != "Unknown")
    }
}

/// Inclusive range of years observed in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// Earliest observed year.
    pub min: i32,
    /// Latest observed year.
    pub max: i32,
}

impl YearRange {
    /// Computes the range spanned by `years`, or `None` if it is empty.
    #[must_use]
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Option<Self> {
        years.into_iter().fold(None, |range, year| {
            Some(match range {
                None => Self {
                    min: year,
                    max: year,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(year),
                    max: max.max(year),
                },
            })
        })
    }

    /// Whether `year` lies within the range, inclusive.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}
