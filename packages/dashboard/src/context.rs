//! What a view sees during one render pass.

use std::collections::BTreeMap;

use school_map_district_models::{DistrictCode, DistrictFeature};
use school_map_index::MetricIndex;
use school_map_ingest::Dataset;
use school_map_metrics::{CatalogError, MetricCatalog};
use school_map_metrics_models::MetricDefinition;
use school_map_selection::{Change, SelectionState};

/// The three indexes backing the map and the scatterplot axes.
///
/// All three are rebuilt together whenever the year or any metric
/// changes, so they are always scoped to the same year.
#[derive(Debug, Clone)]
pub struct MetricIndexes {
    /// Map metric.
    pub map: MetricIndex,
    /// Scatterplot X metric.
    pub x: MetricIndex,
    /// Scatterplot Y metric.
    pub y: MetricIndex,
}

impl MetricIndexes {
    /// Builds all three indexes for the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a selected key no longer resolves.
    pub fn build(dataset: &Dataset, selection: &SelectionState) -> Result<Self, CatalogError> {
        let records = dataset.records();
        let year = selection.year();

        Ok(Self {
            map: MetricIndex::build(records, selection.map_metric()?, year),
            x: MetricIndex::build(records, selection.x_metric()?, year),
            y: MetricIndex::build(records, selection.y_metric()?, year),
        })
    }
}

/// Read-only inputs for one render pass.
///
/// Views only ever get a shared reference, so nothing they do during a
/// pass can change the selection or the indexes other views will read.
#[derive(Debug)]
pub struct RenderContext<'a> {
    selection: &'a SelectionState,
    dataset: &'a Dataset,
    features: &'a [DistrictFeature],
    feature_names: &'a BTreeMap<DistrictCode, String>,
    indexes: &'a MetricIndexes,
    outline_features: usize,
    change: Change,
    map_metric: &'a MetricDefinition,
    x_metric: &'a MetricDefinition,
    y_metric: &'a MetricDefinition,
}

impl<'a> RenderContext<'a> {
    /// Resolves the selected metrics and bundles the pass inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a selected key no longer resolves.
    pub fn new(
        selection: &'a SelectionState,
        dataset: &'a Dataset,
        boundaries: &'a Boundaries,
        indexes: &'a MetricIndexes,
        change: Change,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            selection,
            dataset,
            features: &boundaries.features,
            feature_names: &boundaries.names,
            indexes,
            outline_features: boundaries.outline_features,
            change,
            map_metric: selection.map_metric()?,
            x_metric: selection.x_metric()?,
            y_metric: selection.y_metric()?,
        })
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &'a SelectionState {
        self.selection
    }

    /// Metric catalog.
    #[must_use]
    pub fn catalog(&self) -> &'a MetricCatalog {
        self.selection.catalog()
    }

    /// Loaded metric rows.
    #[must_use]
    pub const fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// District boundary features in file order.
    #[must_use]
    pub const fn features(&self) -> &'a [DistrictFeature] {
        self.features
    }

    /// Number of outline features under the district layer.
    #[must_use]
    pub const fn outline_features(&self) -> usize {
        self.outline_features
    }

    /// What triggered this pass.
    #[must_use]
    pub const fn change(&self) -> Change {
        self.change
    }

    /// Index of the map metric.
    #[must_use]
    pub const fn map_index(&self) -> &'a MetricIndex {
        &self.indexes.map
    }

    /// Index of the X metric.
    #[must_use]
    pub const fn x_index(&self) -> &'a MetricIndex {
        &self.indexes.x
    }

    /// Index of the Y metric.
    #[must_use]
    pub const fn y_index(&self) -> &'a MetricIndex {
        &self.indexes.y
    }

    /// Definition of the map metric.
    #[must_use]
    pub const fn map_metric(&self) -> &'a MetricDefinition {
        self.map_metric
    }

    /// Definition of the X metric.
    #[must_use]
    pub const fn x_metric(&self) -> &'a MetricDefinition {
        self.x_metric
    }

    /// Definition of the Y metric.
    #[must_use]
    pub const fn y_metric(&self) -> &'a MetricDefinition {
        self.y_metric
    }

    /// Known name of the boundary feature for `code`.
    ///
    /// Features named empty or `"Unknown"` are not listed.
    #[must_use]
    pub fn feature_name(&self, code: &DistrictCode) -> Option<&'a str> {
        self.feature_names.get(code).map(String::as_str)
    }

    /// Best display name for `code`: the boundary name, else the name
    /// from the metric rows.
    #[must_use]
    pub fn district_name(&self, code: &DistrictCode) -> Option<&'a str> {
        self.feature_name(code)
            .or_else(|| self.dataset.district_name(code))
    }
}

/// District polygons reduced to their join keys, plus the outline layer
/// size.
#[derive(Debug, Clone, Default)]
pub struct Boundaries {
    features: Vec<DistrictFeature>,
    names: BTreeMap<DistrictCode, String>,
    outline_features: usize,
}

impl Boundaries {
    /// Indexes the known names of `features`. When several features share
    /// a code, the first named one wins.
    #[must_use]
    pub fn new(features: Vec<DistrictFeature>) -> Self {
        let mut names = BTreeMap::new();
        for feature in &features {
            if let Some(code) = &feature.code
                && feature.has_known_name()
                && let Some(name) = &feature.name
            {
                names
                    .entry(code.clone())
                    .or_insert_with(|| name.trim().to_owned());
            }
        }

        Self {
            features,
            names,
            outline_features: 0,
        }
    }

    /// Records the size of the outline context layer.
    #[must_use]
    pub fn with_outline(mut self, outline: &geojson::FeatureCollection) -> Self {
        self.outline_features = outline.features.len();
        self
    }

    /// Features in file order.
    #[must_use]
    pub fn features(&self) -> &[DistrictFeature] {
        &self.features
    }
}
