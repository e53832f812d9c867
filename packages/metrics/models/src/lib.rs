#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric definition, legend class, and value formatting types.
//!
//! A [`MetricDefinition`] ties a short key used by the UI controls to the
//! CSV column holding its values, plus everything a view needs to present
//! it: a label, a [`LegendClass`] that picks the color ramp and domain
//! rounding policy, and a [`ValueFormat`] for tooltips and axes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Text shown wherever a value is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display-scale category of a metric.
///
/// Determines both the color family and how the legend domain is rounded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LegendClass {
    /// Rates expressed as 0-100 percentages (graduation rate).
    Percent,
    /// Currency amounts (salaries, per-pupil spending).
    Dollars,
    /// Share of the student body belonging to a demographic group.
    DemographicPercent,
    /// Standardized test scores.
    Score,
    /// Anything else numeric.
    DefaultNumeric,
}

impl LegendClass {
    /// Returns the sequential color family used for this class.
    #[must_use]
    pub const fn color_scheme(self) -> ColorScheme {
        match self {
            Self::Percent => ColorScheme::Blues,
            Self::Dollars => ColorScheme::Greens,
            Self::DemographicPercent => ColorScheme::PurpleRed,
            Self::Score | Self::DefaultNumeric => ColorScheme::Oranges,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Percent,
            Self::Dollars,
            Self::DemographicPercent,
            Self::Score,
            Self::DefaultNumeric,
        ]
    }
}

/// Sequential color families, seven classes each (`ColorBrewer`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorScheme {
    /// Light to dark blue.
    Blues,
    /// Light to dark green.
    Greens,
    /// Light purple to dark red.
    PurpleRed,
    /// Light to dark orange.
    Oranges,
}

/// Number of color classes in every [`ColorScheme`].
pub const SCHEME_CLASSES: usize = 7;

impl ColorScheme {
    /// Returns the seven hex colors of this scheme, lightest first.
    #[must_use]
    pub const fn colors(self) -> [&'static str; SCHEME_CLASSES] {
        match self {
            Self::Blues => [
                "#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594",
            ],
            Self::Greens => [
                "#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32",
            ],
            Self::PurpleRed => [
                "#f1eef6", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#91003f",
            ],
            Self::Oranges => [
                "#feedde", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#8c2d04",
            ],
        }
    }
}

/// How a metric value is turned into display text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValueFormat {
    /// One decimal followed by `%` (e.g. `"91.3%"`).
    Percent,
    /// Whole dollars with thousands separators (e.g. `"$54,321"`).
    Dollars,
    /// One decimal (e.g. `"502.4"`).
    Decimal,
}

impl ValueFormat {
    /// Formats `value`, rendering `None` as [`NOT_AVAILABLE`].
    #[must_use]
    pub fn format(self, value: Option<f64>) -> String {
        let Some(value) = value else {
            return NOT_AVAILABLE.to_owned();
        };
        match self {
            Self::Percent => format!("{value:.1}%"),
            Self::Dollars => format!("${}", group_thousands(value)),
            Self::Decimal => format!("{value:.1}"),
        }
    }
}

/// Rounds `value` to a whole number and inserts `,` between thousands
/// groups.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && digits.bytes().any(|b| b != b'0') {
        grouped.insert(0, '-');
    }
    grouped
}

/// An inclusive `[min, max]` legend/color domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendDomain {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl LegendDomain {
    /// Creates a domain from its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the domain.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One labelled position on a legend ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendTick {
    /// Position on the domain.
    pub value: f64,
    /// Display text.
    pub label: String,
}

/// Static descriptor of one selectable metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricDefinition {
    /// Short unique identifier used by UI controls (e.g. `"grad"`).
    pub key: String,
    /// Human-readable label (e.g. `"Graduation Rate"`).
    pub label: String,
    /// CSV column holding the values.
    pub column: String,
    /// Legend class.
    pub legend: LegendClass,
    /// Value formatter.
    pub format: ValueFormat,
    /// Legend domain that overrides the class policy regardless of data.
    #[serde(default)]
    pub fixed_domain: Option<[f64; 2]>,
}

impl MetricDefinition {
    /// Formats a value of this metric for display.
    #[must_use]
    pub fn format_value(&self, value: Option<f64>) -> String {
        self.format.format(value)
    }

    /// Returns the fixed legend domain, if one is configured.
    #[must_use]
    pub fn fixed_domain(&self) -> Option<LegendDomain> {
        self.fixed_domain.map(|[min, max]| LegendDomain::new(min, max))
    }
}
