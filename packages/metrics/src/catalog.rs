//! Registry of selectable metrics.
//!
//! The default catalog is a TOML file embedded at compile time. A catalog
//! is validated once when constructed and never changes afterwards, so a
//! lookup either resolves to exactly one definition or is a configuration
//! error.

use std::collections::BTreeMap;

use school_map_metrics_models::MetricDefinition;
use serde::Deserialize;

use crate::CatalogError;

/// Number of metrics in the embedded catalog. Enforced by a test.
#[cfg(test)]
const EXPECTED_METRIC_COUNT: usize = 12;

/// Embedded default catalog.
const BUILTIN_CATALOG_TOML: &str = include_str!("../catalog.toml");

#[derive(Deserialize)]
struct CatalogFile {
    metrics: Vec<MetricDefinition>,
}

/// An ordered, immutable set of metric definitions with unique keys.
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    metrics: Vec<MetricDefinition>,
    by_key: BTreeMap<String, usize>,
}

impl MetricCatalog {
    /// Returns the embedded default catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse or validate. Since it is
    /// a compile-time constant, a failure indicates a development error and
    /// is caught by the tests in this module.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_CATALOG_TOML)
            .unwrap_or_else(|e| panic!("Failed to load built-in metric catalog: {e}"))
    }

    /// Parses and validates a catalog from TOML text containing
    /// `[[metrics]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed TOML and any
    /// validation error from [`Self::new`].
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::de::from_str(toml_str)?;
        Self::new(file.metrics)
    }

    /// Validates `metrics` and builds the key lookup.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::Empty`] if no metrics are given.
    /// * [`CatalogError::DuplicateKey`] if two definitions share a key.
    /// * [`CatalogError::InvalidDefinition`] if a key, label, or column is
    ///   blank, or a fixed domain is not strictly increasing.
    pub fn new(metrics: Vec<MetricDefinition>) -> Result<Self, CatalogError> {
        if metrics.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_key = BTreeMap::new();
        for (i, metric) in metrics.iter().enumerate() {
            validate_definition(metric)?;
            if by_key.insert(metric.key.clone(), i).is_some() {
                return Err(CatalogError::DuplicateKey {
                    key: metric.key.clone(),
                });
            }
        }

        log::debug!("Loaded metric catalog with {} metrics", metrics.len());

        Ok(Self { metrics, by_key })
    }

    /// Resolves `key` to its definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMetric`] if no definition has that key.
    pub fn get(&self, key: &str) -> Result<&MetricDefinition, CatalogError> {
        self.by_key
            .get(key)
            .map(|&i| &self.metrics[i])
            .ok_or_else(|| CatalogError::UnknownMetric {
                key: key.to_owned(),
            })
    }

    /// Whether `key` resolves.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// All definitions in catalog order.
    #[must_use]
    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Always `false` for a constructed catalog; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Returns the definition at `position` in catalog order.
    #[must_use]
    pub fn nth(&self, position: usize) -> Option<&MetricDefinition> {
        self.metrics.get(position)
    }
}

fn validate_definition(metric: &MetricDefinition) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidDefinition {
        key: metric.key.clone(),
        reason: reason.to_owned(),
    };

    if metric.key.trim().is_empty() {
        return Err(invalid("key is blank"));
    }
    if metric.label.trim().is_empty() {
        return Err(invalid("label is blank"));
    }
    if metric.column.trim().is_empty() {
        return Err(invalid("column is blank"));
    }
    if let Some([min, max]) = metric.fixed_domain
        && !(min.is_finite() && max.is_finite() && min < max)
    {
        return Err(invalid("fixed_domain must be finite and increasing"));
    }
    Ok(())
}
