//! Details of the highlighted district.

use school_map_dashboard_models::{InfoPanel, InfoRow, UNKNOWN_DISTRICT, ViewModel};
use school_map_district_models::DistrictCode;
use school_map_index::MetricIndex;
use school_map_metrics_models::MetricDefinition;

use crate::RenderContext;
use crate::views::ViewAdapter;

/// Shows the highlighted district's map, X, and Y values. Empty when
/// nothing is highlighted.
#[derive(Debug, Default)]
pub struct InfoPanelView {
    panel: Option<InfoPanel>,
    rendered: bool,
}

impl ViewAdapter for InfoPanelView {
    fn name(&self) -> &'static str {
        "info_panel"
    }

    fn render(&mut self, ctx: &RenderContext<'_>) {
        self.rendered = true;
        self.panel = ctx.selection().highlighted().map(|code| InfoPanel {
            code: code.clone(),
            name: ctx.district_name(code).unwrap_or(UNKNOWN_DISTRICT).to_owned(),
            rows: vec![
                row(ctx.map_metric(), ctx.map_index(), code, ""),
                row(ctx.x_metric(), ctx.x_index(), code, " (X)"),
                row(ctx.y_metric(), ctx.y_index(), code, " (Y)"),
            ],
        });
    }

    fn model(&self) -> Option<ViewModel> {
        self.rendered.then(|| ViewModel::InfoPanel(self.panel.clone()))
    }
}

fn row(
    def: &MetricDefinition,
    index: &MetricIndex,
    code: &DistrictCode,
    suffix: &str,
) -> InfoRow {
    InfoRow {
        label: format!("{}{suffix}", def.label),
        value: def.format_value(index.get_value(code)),
    }
}
