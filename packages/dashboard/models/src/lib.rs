#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Render models produced by the dashboard views.
//!
//! Each view turns the shared selection into one of these plain data
//! structures. They hold everything a drawing layer needs (titles, fills,
//! axis domains, formatted values) and are serialized to JSON for the CLI
//! snapshot output. They never reference the selection state itself.

use school_map_district_models::{DistrictCode, YearRange};
use school_map_metrics_models::{ColorScheme, LegendClass, LegendDomain, LegendTick};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Fill color for districts with no value for the current metric and year.
///
/// Not part of any [`ColorScheme`] palette.
pub const NO_DATA_FILL: &str = "#ccc";

/// Message the scatterplot shows when no district has both values.
pub const SCATTER_EMPTY_MESSAGE: &str = "No data available for this year.";

/// Fallback name for a highlighted district nobody can name.
pub const UNKNOWN_DISTRICT: &str = "Unknown District";

/// Identifies one of the built-in views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewKind {
    /// Choropleth map.
    Map,
    /// Two-metric scatterplot.
    Scatter,
    /// Per-district time series.
    Trend,
    /// Details of the highlighted district.
    InfoPanel,
}

/// How one map feature is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    /// The district has no value. Drawn with [`NO_DATA_FILL`].
    NoData,
    /// The district's value falls in bucket `index` of the color ramp.
    Bucket {
        /// Bucket index, `0` for the lowest.
        index: usize,
        /// Hex color of the bucket.
        color: String,
    },
}

impl Fill {
    /// CSS color string for this fill.
    #[must_use]
    pub fn color(&self) -> &str {
        match self {
            Self::NoData => NO_DATA_FILL,
            Self::Bucket { color, .. } => color,
        }
    }
}

/// Color legend drawn beside the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendModel {
    /// Metric label.
    pub title: String,
    /// Legend class of the metric.
    pub legend_class: LegendClass,
    /// Color ramp.
    pub scheme: ColorScheme,
    /// Ramp colors, lowest bucket first.
    pub colors: Vec<String>,
    /// Color domain, `None` when there is nothing to scale.
    pub domain: Option<LegendDomain>,
    /// Minimum, midpoint, and maximum labels. Empty without a domain.
    pub ticks: Vec<LegendTick>,
}

/// One boundary polygon on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFeature {
    /// Canonical code, if the feature had a usable one.
    pub code: Option<DistrictCode>,
    /// Name from the boundary file.
    pub name: Option<String>,
    /// Indexed value.
    pub value: Option<f64>,
    /// Formatted value for tooltips.
    pub display_value: String,
    /// Fill.
    pub fill: Fill,
    /// Whether this is the highlighted district.
    pub highlighted: bool,
}

/// Choropleth map of the map metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapModel {
    /// Title, e.g. `"Graduation Rate: 2021"`.
    pub title: String,
    /// Catalog key of the mapped metric.
    pub metric_key: String,
    /// Year shown.
    pub year: i32,
    /// Color legend.
    pub legend: LegendModel,
    /// One entry per district boundary feature, in file order.
    pub features: Vec<MapFeature>,
    /// Number of state outline features drawn underneath.
    pub outline_features: usize,
}

/// One scatterplot axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisModel {
    /// Catalog key of the metric.
    pub metric_key: String,
    /// Axis label.
    pub label: String,
    /// Padded data extent, `None` when the plot is empty.
    pub domain: Option<LegendDomain>,
}

/// One district on the scatterplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// District code.
    pub code: DistrictCode,
    /// District name.
    pub name: String,
    /// X value.
    pub x: f64,
    /// Y value.
    pub y: f64,
    /// Formatted X value.
    pub x_display: String,
    /// Formatted Y value.
    pub y_display: String,
    /// Whether this is the highlighted district.
    pub highlighted: bool,
}

/// Scatterplot of two metrics for the selected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterModel {
    /// Title, e.g. `"Average Salary vs. Graduation Rate (2021)"`.
    pub title: String,
    /// Year shown.
    pub year: i32,
    /// Horizontal axis.
    pub x_axis: AxisModel,
    /// Vertical axis.
    pub y_axis: AxisModel,
    /// Plotted districts in code order.
    pub points: Vec<ScatterPoint>,
    /// Set instead of drawing axes when there are no points.
    pub empty_message: Option<String>,
}

/// One `(year, value)` point of a trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// School year.
    pub year: i32,
    /// Value.
    pub value: f64,
}

/// The history of one selected district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    /// District code.
    pub code: DistrictCode,
    /// District name.
    pub name: String,
    /// Points ascending by year. Years without data are skipped.
    pub points: Vec<TrendPoint>,
    /// Whether this is the highlighted district.
    pub highlighted: bool,
}

/// Line chart of the map metric over time for the selected districts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendModel {
    /// Title, e.g. `"Graduation Rate over time"`.
    pub title: String,
    /// Catalog key of the plotted metric.
    pub metric_key: String,
    /// Y axis label.
    pub y_label: String,
    /// Years spanned by all series.
    pub year_extent: Option<YearRange>,
    /// Y axis domain.
    pub y_domain: Option<LegendDomain>,
    /// One series per selected district, in selection order.
    pub series: Vec<TrendSeries>,
}

/// One labelled line of the info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoRow {
    /// Label.
    pub label: String,
    /// Formatted value, `N/A` when absent.
    pub value: String,
}

/// Details of the highlighted district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoPanel {
    /// District code.
    pub code: DistrictCode,
    /// District name.
    pub name: String,
    /// Current map, X, and Y values.
    pub rows: Vec<InfoRow>,
}

/// The latest model of one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", content = "model", rename_all = "snake_case")]
pub enum ViewModel {
    /// See [`MapModel`].
    Map(MapModel),
    /// See [`ScatterModel`].
    Scatter(ScatterModel),
    /// See [`TrendModel`].
    Trend(TrendModel),
    /// See [`InfoPanel`]. `None` when nothing is highlighted.
    InfoPanel(Option<InfoPanel>),
}

impl ViewModel {
    /// Which view produced this model.
    #[must_use]
    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Map(_) => ViewKind::Map,
            Self::Scatter(_) => ViewKind::Scatter,
            Self::Trend(_) => ViewKind::Trend,
            Self::InfoPanel(_) => ViewKind::InfoPanel,
        }
    }
}
