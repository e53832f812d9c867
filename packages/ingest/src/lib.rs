#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric CSV and district boundary loading with value normalization.
//!
//! Input files are read once at startup: the cleaned metric CSV becomes a
//! [`Dataset`], the district polygons become [`DistrictFeature`]s, and the
//! optional state outline layer is carried as a plain `FeatureCollection`.
//! Malformed cells never fail a load; they normalize to "absent" in
//! [`parsing`].

pub mod boundaries;
pub mod dataset;
pub mod parsing;
pub mod records;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geojson::FeatureCollection;
use school_map_district_models::DistrictFeature;
use thiserror::Error;

pub use boundaries::FeatureProperties;
pub use dataset::Dataset;
pub use parsing::{normalize_field, normalize_value};

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A required CSV column is missing from the header row.
    #[error("Missing required CSV column '{column}'")]
    MissingColumn {
        /// Header that was expected.
        column: &'static str,
    },

    /// The metric CSV contained no usable rows.
    #[error("Metric dataset contains no rows")]
    NoRecords,
}

/// Loads the metric CSV at `path` into a [`Dataset`].
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed, or holds
/// no rows.
pub fn load_dataset(path: &Path) -> Result<Dataset, IngestError> {
    log::info!("Loading metric data from {}", path.display());
    let file = File::open(path)?;
    Dataset::new(records::read_records(BufReader::new(file))?)
}

/// Loads district boundary features from the `GeoJSON` file at `path`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or is not a
/// `FeatureCollection`.
pub fn load_district_features(
    path: &Path,
    properties: &FeatureProperties,
) -> Result<Vec<DistrictFeature>, IngestError> {
    log::info!("Loading district boundaries from {}", path.display());
    let collection = load_feature_collection(path)?;
    Ok(boundaries::district_features(&collection, properties))
}

/// Loads any `GeoJSON` `FeatureCollection`, e.g. the outline layer.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or is not a
/// `FeatureCollection`.
pub fn load_feature_collection(path: &Path) -> Result<FeatureCollection, IngestError> {
    let file = File::open(path)?;
    boundaries::read_feature_collection(BufReader::new(file))
}
