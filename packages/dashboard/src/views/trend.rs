//! Line chart of the map metric over time.

use school_map_dashboard_models::{TrendModel, TrendPoint, TrendSeries, ViewModel};
use school_map_district_models::YearRange;
use school_map_index::district_series;
use school_map_metrics::legend_domain;

use crate::RenderContext;
use crate::views::ViewAdapter;

/// Plots the map metric across all years for each selected district.
#[derive(Debug, Default)]
pub struct TrendView {
    model: Option<TrendModel>,
}

impl ViewAdapter for TrendView {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn render(&mut self, ctx: &RenderContext<'_>) {
        self.model = Some(build_trend(ctx));
    }

    fn model(&self) -> Option<ViewModel> {
        self.model.clone().map(ViewModel::Trend)
    }
}

fn build_trend(ctx: &RenderContext<'_>) -> TrendModel {
    let def = ctx.map_metric();
    let selection = ctx.selection();
    let records = ctx.dataset().records();

    let series: Vec<TrendSeries> = selection
        .selected_districts()
        .iter()
        .map(|code| TrendSeries {
            code: code.clone(),
            name: ctx
                .district_name(code)
                .unwrap_or(code.as_str())
                .to_owned(),
            points: district_series(records, &def.column, code)
                .into_iter()
                .map(|p| TrendPoint {
                    year: p.year,
                    value: p.value,
                })
                .collect(),
            highlighted: selection.is_highlighted(code),
        })
        .collect();

    let all_points = || series.iter().flat_map(|s| s.points.iter());

    TrendModel {
        title: format!("{} over time", def.label),
        metric_key: def.key.clone(),
        y_label: def.label.clone(),
        year_extent: YearRange::from_years(all_points().map(|p| p.year)),
        y_domain: legend_domain(def, all_points().map(|p| p.value)),
        series,
    }
}
