//! The selection state and its setters.

use std::collections::BTreeSet;
use std::rc::Rc;

use school_map_district_models::{DistrictCode, YearRange};
use school_map_ingest::Dataset;
use school_map_metrics::{CatalogError, MetricCatalog};
use school_map_metrics_models::MetricDefinition;
use serde::Serialize;

use crate::{Change, SelectionError};

/// Number of districts plotted in the trend view at load time.
const DEFAULT_TREND_DISTRICTS: usize = 2;

/// Year, metrics, districts, and highlight shown by every view.
///
/// Setters validate before mutating: a rejected call leaves the state
/// untouched. Out-of-range years are rejected rather than clamped; keeping
/// controls in range is the UI's job.
#[derive(Debug, Clone)]
pub struct SelectionState {
    catalog: Rc<MetricCatalog>,
    year_range: YearRange,
    known_districts: BTreeSet<DistrictCode>,

    year: i32,
    map_metric: String,
    x_metric: String,
    y_metric: String,
    selected_districts: Vec<DistrictCode>,
    highlighted: Option<DistrictCode>,
    highlight_pinned: bool,
}

impl SelectionState {
    /// Initializes the selection from data-derived defaults: the most
    /// recent year, the first catalog metric on the map and X axis, the
    /// second on the Y axis, and the first two districts by name in the
    /// trend view. Nothing is highlighted.
    #[must_use]
    pub fn from_dataset(catalog: Rc<MetricCatalog>, dataset: &Dataset) -> Self {
        let year_range = dataset.year_range();
        let districts = dataset.districts_by_name();

        let first = catalog.metrics()[0].key.clone();
        let second = catalog
            .nth(1)
            .map_or_else(|| first.clone(), |m| m.key.clone());

        let selected_districts: Vec<DistrictCode> = districts
            .iter()
            .take(DEFAULT_TREND_DISTRICTS)
            .map(|(code, _)| (*code).clone())
            .collect();
        let known_districts = districts.into_iter().map(|(code, _)| code.clone()).collect();

        Self {
            catalog,
            year_range,
            known_districts,
            year: year_range.max,
            map_metric: first.clone(),
            x_metric: first,
            y_metric: second,
            selected_districts,
            highlighted: None,
            highlight_pinned: false,
        }
    }

    /// Selected year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Year range the selection is bounded by.
    #[must_use]
    pub const fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Catalog every metric key is checked against.
    #[must_use]
    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// Catalog key of the map metric.
    #[must_use]
    pub fn map_metric_key(&self) -> &str {
        &self.map_metric
    }

    /// Catalog key of the scatterplot X metric.
    #[must_use]
    pub fn x_metric_key(&self) -> &str {
        &self.x_metric
    }

    /// Catalog key of the scatterplot Y metric.
    #[must_use]
    pub fn y_metric_key(&self) -> &str {
        &self.y_metric
    }

    /// Definition of the map metric.
    ///
    /// # Errors
    ///
    /// Never in practice: keys are validated when set.
    pub fn map_metric(&self) -> Result<&MetricDefinition, CatalogError> {
        self.catalog.get(&self.map_metric)
    }

    /// Definition of the X metric.
    ///
    /// # Errors
    ///
    /// Never in practice: keys are validated when set.
    pub fn x_metric(&self) -> Result<&MetricDefinition, CatalogError> {
        self.catalog.get(&self.x_metric)
    }

    /// Definition of the Y metric.
    ///
    /// # Errors
    ///
    /// Never in practice: keys are validated when set.
    pub fn y_metric(&self) -> Result<&MetricDefinition, CatalogError> {
        self.catalog.get(&self.y_metric)
    }

    /// Districts plotted in the trend view, in selection order.
    #[must_use]
    pub fn selected_districts(&self) -> &[DistrictCode] {
        &self.selected_districts
    }

    /// The highlighted district, if any.
    #[must_use]
    pub const fn highlighted(&self) -> Option<&DistrictCode> {
        self.highlighted.as_ref()
    }

    /// Whether `code` is the highlighted district.
    #[must_use]
    pub fn is_highlighted(&self, code: &DistrictCode) -> bool {
        self.highlighted.as_ref() == Some(code)
    }

    /// Selects `year`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::YearOutOfRange`] if `year` lies outside
    /// the observed range.
    pub fn set_year(&mut self, year: i32) -> Result<Change, SelectionError> {
        if !self.year_range.contains(year) {
            return Err(SelectionError::YearOutOfRange {
                year,
                min: self.year_range.min,
                max: self.year_range.max,
            });
        }
        log::debug!("Selection: year {} -> {year}", self.year);
        self.year = year;
        Ok(Change::Year)
    }

    /// Selects the map metric.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Catalog`] if `key` is not in the catalog.
    pub fn set_map_metric(&mut self, key: &str) -> Result<Change, SelectionError> {
        self.map_metric = self.resolve(key)?;
        log::debug!("Selection: map metric -> {key}");
        Ok(Change::MapMetric)
    }

    /// Selects the scatterplot X metric.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Catalog`] if `key` is not in the catalog.
    pub fn set_x_metric(&mut self, key: &str) -> Result<Change, SelectionError> {
        self.x_metric = self.resolve(key)?;
        log::debug!("Selection: x metric -> {key}");
        Ok(Change::XMetric)
    }

    /// Selects the scatterplot Y metric.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Catalog`] if `key` is not in the catalog.
    pub fn set_y_metric(&mut self, key: &str) -> Result<Change, SelectionError> {
        self.y_metric = self.resolve(key)?;
        log::debug!("Selection: y metric -> {key}");
        Ok(Change::YMetric)
    }

    /// Replaces the trend view's districts. Order is kept; repeats after
    /// the first occurrence are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownDistrict`] for the first code that
    /// does not appear in the dataset.
    pub fn set_selected_districts(
        &mut self,
        codes: impl IntoIterator<Item = DistrictCode>,
    ) -> Result<Change, SelectionError> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();

        for code in codes {
            if !self.known_districts.contains(&code) {
                return Err(SelectionError::UnknownDistrict { code });
            }
            if seen.insert(code.clone()) {
                ordered.push(code);
            }
        }

        log::debug!("Selection: {} trend districts", ordered.len());
        self.selected_districts = ordered;
        Ok(Change::SelectedDistricts)
    }

    /// Sets or clears the highlight. A code set here is pinned: hover
    /// previews leave it alone until it is cleared or replaced.
    ///
    /// Any canonical code is accepted: boundary features may be clicked
    /// even when the metric dataset has no row for them.
    pub fn set_highlight(&mut self, code: Option<DistrictCode>) -> Change {
        log::debug!(
            "Selection: highlight -> {}",
            code.as_ref().map_or("none", DistrictCode::as_str)
        );
        self.highlight_pinned = code.is_some();
        self.highlighted = code;
        Change::Highlight
    }

    /// Clears the highlight if `code` is the pinned highlight, otherwise
    /// pins `code`. A district that is only previewed gets pinned, so a
    /// hover followed by a click selects it.
    pub fn toggle_highlight(&mut self, code: DistrictCode) -> Change {
        if self.highlight_pinned && self.is_highlighted(&code) {
            self.set_highlight(None)
        } else {
            self.set_highlight(Some(code))
        }
    }

    /// Previews `code` as the highlight while the pointer is over it.
    ///
    /// Returns `None` without changing anything if a highlight is pinned
    /// or `code` is already the highlight.
    pub fn preview_highlight(&mut self, code: DistrictCode) -> Option<Change> {
        if self.highlight_pinned || self.is_highlighted(&code) {
            return None;
        }
        log::debug!("Selection: highlight preview -> {code}");
        self.highlighted = Some(code);
        Some(Change::Highlight)
    }

    /// Ends the preview of `code` when the pointer leaves it.
    ///
    /// Returns `None` without changing anything if a highlight is pinned
    /// or `code` is not the previewed district.
    pub fn end_preview(&mut self, code: &DistrictCode) -> Option<Change> {
        if self.highlight_pinned || !self.is_highlighted(code) {
            return None;
        }
        log::debug!("Selection: highlight preview of {code} ended");
        self.highlighted = None;
        Some(Change::Highlight)
    }

    /// Whether the highlight was set by a click or [`Self::set_highlight`]
    /// rather than a hover preview.
    #[must_use]
    pub const fn is_highlight_pinned(&self) -> bool {
        self.highlight_pinned
    }

    /// Serializable copy of the current values.
    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            year: self.year,
            min_year: self.year_range.min,
            max_year: self.year_range.max,
            map_metric: self.map_metric.clone(),
            x_metric: self.x_metric.clone(),
            y_metric: self.y_metric.clone(),
            selected_districts: self.selected_districts.clone(),
            highlighted: self.highlighted.clone(),
            highlight_pinned: self.highlight_pinned,
        }
    }

    fn resolve(&self, key: &str) -> Result<String, SelectionError> {
        Ok(self.catalog.get(key)?.key.clone())
    }
}

/// Plain-data view of a [`SelectionState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    /// Selected year.
    pub year: i32,
    /// Earliest selectable year.
    pub min_year: i32,
    /// Latest selectable year.
    pub max_year: i32,
    /// Map metric key.
    pub map_metric: String,
    /// X metric key.
    pub x_metric: String,
    /// Y metric key.
    pub y_metric: String,
    /// Trend districts.
    pub selected_districts: Vec<DistrictCode>,
    /// Highlighted district.
    pub highlighted: Option<DistrictCode>,
    /// Whether the highlight is pinned rather than a hover preview.
    pub highlight_pinned: bool,
}
