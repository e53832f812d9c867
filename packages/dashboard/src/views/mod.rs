//! View adapters.
//!
//! Every adapter rebuilds its model from the [`RenderContext`] on every
//! pass and keeps nothing else between passes. In particular no view
//! stores its own highlight flag: it reads the highlight from the
//! selection each time.

pub mod info;
pub mod map;
pub mod scatter;
pub mod trend;

use school_map_dashboard_models::ViewModel;

use crate::RenderContext;

pub use info::InfoPanelView;
pub use map::MapView;
pub use scatter::ScatterView;
pub use trend::TrendView;

/// A view that re-renders from the shared selection.
pub trait ViewAdapter {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rebuilds the view's model for the current selection.
    fn render(&mut self, ctx: &RenderContext<'_>);

    /// The model from the latest pass, if the view exposes one.
    fn model(&self) -> Option<ViewModel> {
        None
    }
}

/// The four built-in views in display order.
#[must_use]
pub fn standard_views() -> Vec<Box<dyn ViewAdapter>> {
    vec![
        Box::new(MapView::default()),
        Box::new(ScatterView::default()),
        Box::new(TrendView::default()),
        Box::new(InfoPanelView::default()),
    ]
}
