//! Legend domain policy and legend tick labels.
//!
//! The rounding rules here are a contract with the rendering layer:
//! identical input data must produce identical bucket boundaries, so the
//! rules are pinned by golden tests below.

use school_map_metrics_models::{
    LegendClass, LegendDomain, LegendTick, MetricDefinition, group_thousands,
};

/// Number of labelled ticks under the legend ramp.
pub const LEGEND_TICKS: usize = 3;

/// Computes the legend/color domain for `def` over the current values.
///
/// A metric's fixed domain always wins. Otherwise:
///
/// | class | domain |
/// |---|---|
/// | percent, demographic percent | `[0, ceil(max / 10) * 10]` with `max` floored at 0 |
/// | dollars | `[floor(min / 1000) * 1000, ceil(max / 1000) * 1000]` |
/// | score, default numeric | `[min, max]` |
///
/// Non-finite values are ignored. Returns `None` only when the policy
/// depends on the data extent and there are no values.
#[must_use]
pub fn legend_domain(
    def: &MetricDefinition,
    values: impl IntoIterator<Item = f64>,
) -> Option<LegendDomain> {
    if let Some(fixed) = def.fixed_domain() {
        return Some(fixed);
    }

    let values = values.into_iter().filter(|v| v.is_finite());

    match def.legend {
        LegendClass::Percent | LegendClass::DemographicPercent => {
            let max = values.fold(0.0_f64, f64::max);
            Some(LegendDomain::new(0.0, (max / 10.0).ceil() * 10.0))
        }
        LegendClass::Dollars => {
            let (min, max) = extent(values)?;
            Some(LegendDomain::new(
                (min / 1000.0).floor() * 1000.0,
                (max / 1000.0).ceil() * 1000.0,
            ))
        }
        LegendClass::Score | LegendClass::DefaultNumeric => {
            let (min, max) = extent(values)?;
            Some(LegendDomain::new(min, max))
        }
    }
}

/// Returns `(min, max)` of `values`, or `None` if empty.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Builds the minimum, midpoint, and maximum ticks for a legend.
///
/// The midpoint is rounded half-up to a whole number.
#[must_use]
pub fn legend_ticks(def: &MetricDefinition, domain: LegendDomain) -> [LegendTick; LEGEND_TICKS] {
    let mid = (f64::midpoint(domain.min, domain.max) + 0.5).floor();
    [domain.min, mid, domain.max].map(|value| LegendTick {
        value,
        label: tick_label(def.legend, value),
    })
}

fn tick_label(legend: LegendClass, value: f64) -> String {
    match legend {
        LegendClass::Percent | LegendClass::DemographicPercent => format!("{value}%"),
        LegendClass::Dollars => format!("${}", group_thousands(value)),
        LegendClass::Score | LegendClass::DefaultNumeric => format!("{value:.0}"),
    }
}
