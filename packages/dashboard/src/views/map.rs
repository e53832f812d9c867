//! Choropleth map of the map metric.

use school_map_dashboard_models::{Fill, LegendModel, MapFeature, MapModel, ViewModel};
use school_map_metrics::{QuantizeScale, legend_domain, legend_ticks};
use school_map_metrics_models::{LegendDomain, MetricDefinition};

use crate::RenderContext;
use crate::views::ViewAdapter;

/// Colors every boundary feature by its map metric value.
#[derive(Debug, Default)]
pub struct MapView {
    model: Option<MapModel>,
}

impl ViewAdapter for MapView {
    fn name(&self) -> &'static str {
        "map"
    }

    fn render(&mut self, ctx: &RenderContext<'_>) {
        self.model = Some(build_map(ctx));
    }

    fn model(&self) -> Option<ViewModel> {
        self.model.clone().map(ViewModel::Map)
    }
}

fn build_map(ctx: &RenderContext<'_>) -> MapModel {
    let def = ctx.map_metric();
    let index = ctx.map_index();
    let selection = ctx.selection();

    let domain = legend_domain(def, index.values());
    let scale = domain.map(|d| QuantizeScale::new(d, def.legend.color_scheme()));

    let features = ctx
        .features()
        .iter()
        .map(|feature| {
            let value = feature.code.as_ref().and_then(|c| index.get_value(c));
            let fill = match (value, &scale) {
                (Some(v), Some(scale)) => Fill::Bucket {
                    index: scale.bucket(v),
                    color: scale.color(v).to_owned(),
                },
                _ => Fill::NoData,
            };

            MapFeature {
                code: feature.code.clone(),
                name: feature.name.clone(),
                value,
                display_value: def.format_value(value),
                fill,
                highlighted: feature
                    .code
                    .as_ref()
                    .is_some_and(|c| selection.is_highlighted(c)),
            }
        })
        .collect();

    MapModel {
        title: format!("{}: {}", def.label, selection.year()),
        metric_key: def.key.clone(),
        year: selection.year(),
        legend: legend_model(def, domain),
        features,
        outline_features: ctx.outline_features(),
    }
}

fn legend_model(def: &MetricDefinition, domain: Option<LegendDomain>) -> LegendModel {
    let scheme = def.legend.color_scheme();

    LegendModel {
        title: def.label.clone(),
        legend_class: def.legend,
        scheme,
        colors: scheme.colors().iter().map(|&c| c.to_owned()).collect(),
        domain,
        ticks: domain.map_or_else(Vec::new, |d| legend_ticks(def, d).to_vec()),
    }
}
