#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared cross-view selection state.
//!
//! [`SelectionState`] is the one place that records which year, metrics,
//! districts, and highlighted district the dashboard is showing. It is
//! changed only through named setters that validate their input and
//! report the [`Change`] they made, so the owner can re-render exactly
//! once per change.

pub mod state;

use school_map_district_models::DistrictCode;
use school_map_metrics::CatalogError;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub use state::{SelectionSnapshot, SelectionState};

/// Errors returned by rejected selection changes.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The metric key does not resolve in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The year lies outside the observed data.
    #[error("Year {year} is outside the available range {min}-{max}")]
    YearOutOfRange {
        /// Requested year.
        year: i32,
        /// Earliest available year.
        min: i32,
        /// Latest available year.
        max: i32,
    },

    /// The district does not appear in the dataset.
    #[error("Unknown district code '{code}'")]
    UnknownDistrict {
        /// Requested code.
        code: DistrictCode,
    },
}

/// Which part of the selection a successful setter changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Change {
    /// Initial render after load.
    Initial,
    /// Selected year.
    Year,
    /// Map metric.
    MapMetric,
    /// Scatterplot X metric.
    XMetric,
    /// Scatterplot Y metric.
    YMetric,
    /// Districts plotted in the trend view.
    SelectedDistricts,
    /// Highlighted district.
    Highlight,
}

impl Change {
    /// Whether metric indexes must be rebuilt after this change.
    #[must_use]
    pub const fn invalidates_indexes(self) -> bool {
        matches!(
            self,
            Self::Initial | Self::Year | Self::MapMetric | Self::XMetric | Self::YMetric
        )
    }
}
