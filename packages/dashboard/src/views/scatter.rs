//! Scatterplot of the X metric against the Y metric.

use school_map_dashboard_models::{
    AxisModel, SCATTER_EMPTY_MESSAGE, ScatterModel, ScatterPoint, ViewModel,
};
use school_map_metrics::extent;
use school_map_metrics_models::{LegendDomain, MetricDefinition};

use crate::RenderContext;
use crate::views::ViewAdapter;

/// Fraction of the data extent left as margin on each side of an axis.
const AXIS_PADDING: f64 = 0.03;

/// Plots every mapped district that has both an X and a Y value.
#[derive(Debug, Default)]
pub struct ScatterView {
    model: Option<ScatterModel>,
}

impl ViewAdapter for ScatterView {
    fn name(&self) -> &'static str {
        "scatter"
    }

    fn render(&mut self, ctx: &RenderContext<'_>) {
        self.model = Some(build_scatter(ctx));
    }

    fn model(&self) -> Option<ViewModel> {
        self.model.clone().map(ViewModel::Scatter)
    }
}

fn build_scatter(ctx: &RenderContext<'_>) -> ScatterModel {
    let x_def = ctx.x_metric();
    let y_def = ctx.y_metric();
    let y_index = ctx.y_index();
    let selection = ctx.selection();

    // Districts with no named polygon are left off: there is nothing on
    // the map to link the point to.
    let points: Vec<ScatterPoint> = ctx
        .x_index()
        .iter()
        .filter_map(|(code, x)| {
            let y = y_index.get_value(code)?;
            let name = ctx.feature_name(code)?;
            Some(ScatterPoint {
                code: code.clone(),
                name: name.to_owned(),
                x,
                y,
                x_display: x_def.format_value(Some(x)),
                y_display: y_def.format_value(Some(y)),
                highlighted: selection.is_highlighted(code),
            })
        })
        .collect();

    let empty_message = points
        .is_empty()
        .then(|| SCATTER_EMPTY_MESSAGE.to_owned());

    ScatterModel {
        title: format!("{} vs. {} ({})", x_def.label, y_def.label, selection.year()),
        year: selection.year(),
        x_axis: axis(x_def, points.iter().map(|p| p.x)),
        y_axis: axis(y_def, points.iter().map(|p| p.y)),
        points,
        empty_message,
    }
}

fn axis(def: &MetricDefinition, values: impl IntoIterator<Item = f64>) -> AxisModel {
    AxisModel {
        metric_key: def.key.clone(),
        label: def.label.clone(),
        domain: extent(values).map(|(min, max)| {
            LegendDomain::new(min * (1.0 - AXIS_PADDING), max * (1.0 + AXIS_PADDING))
        }),
    }
}
