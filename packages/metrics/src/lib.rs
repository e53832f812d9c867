#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric catalog registry, legend domain policy, and quantize color scale.
//!
//! The catalog is defined in `catalog.toml`, embedded at compile time, and
//! validated once at startup. Unknown keys and duplicate definitions are
//! configuration errors surfaced as [`CatalogError`], never defaulted.

pub mod catalog;
pub mod legend;
pub mod scale;

use thiserror::Error;

pub use catalog::MetricCatalog;
pub use legend::{LEGEND_TICKS, extent, legend_domain, legend_ticks};
pub use scale::QuantizeScale;

/// Errors raised while building or querying a [`MetricCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog TOML could not be parsed.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Catalog contains no metrics.
    #[error("Catalog contains no metrics")]
    Empty,

    /// Two definitions share a key.
    #[error("Duplicate metric key '{key}'")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },

    /// A definition failed validation.
    #[error("Invalid metric definition '{key}': {reason}")]
    InvalidDefinition {
        /// Key of the offending definition.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A key did not resolve to any definition.
    #[error("Unknown metric key '{key}'")]
    UnknownMetric {
        /// The unresolved key.
        key: String,
    },
}
