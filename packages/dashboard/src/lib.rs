#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard owner tying the selection, indexes, and views together.
//!
//! [`Dashboard`] is the only owner of the [`SelectionState`] and the
//! metric indexes. Every mutator validates its input, rebuilds the
//! indexes when the year or a metric changed, and re-renders all
//! registered views before returning. There is no batching: one
//! successful call is one render pass.

pub mod context;
pub mod coordinator;
pub mod views;

use std::path::PathBuf;
use std::rc::Rc;

use school_map_dashboard_models::ViewModel;
use school_map_district_models::DistrictCode;
use school_map_ingest::{Dataset, FeatureProperties, IngestError};
use school_map_metrics::{CatalogError, MetricCatalog};
use school_map_selection::{Change, SelectionError, SelectionSnapshot, SelectionState};
use serde::Serialize;
use thiserror::Error;

pub use context::{Boundaries, MetricIndexes, RenderContext};
pub use coordinator::{EventKind, ViewEvent};
pub use views::{ViewAdapter, standard_views};

/// Errors returned by dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A metric key did not resolve.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A selection change was rejected.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Input files could not be loaded.
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),
}

/// Where the input files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    /// Cleaned metric CSV.
    pub data: PathBuf,
    /// District boundary `GeoJSON`.
    pub boundaries: PathBuf,
    /// Optional state outline `GeoJSON`.
    pub outline: Option<PathBuf>,
    /// Feature properties holding the join keys.
    pub properties: FeatureProperties,
}

impl DataFiles {
    /// Loads the dataset and the boundary layers.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if any file cannot be read or parsed.
    pub fn load(&self) -> Result<(Dataset, Boundaries), IngestError> {
        let dataset = school_map_ingest::load_dataset(&self.data)?;
        let features =
            school_map_ingest::load_district_features(&self.boundaries, &self.properties)?;

        let mut boundaries = Boundaries::new(features);
        if let Some(outline) = &self.outline {
            log::info!("Loading outline layer from {}", outline.display());
            let collection = school_map_ingest::load_feature_collection(outline)?;
            boundaries = boundaries.with_outline(&collection);
        }

        Ok((dataset, boundaries))
    }
}

/// Selection plus the latest model of every view that exposes one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Current selection.
    pub selection: SelectionSnapshot,
    /// View models in registration order.
    pub views: Vec<ViewModel>,
}

/// Owns the shared state and keeps every registered view in sync with it.
pub struct Dashboard {
    dataset: Dataset,
    boundaries: Boundaries,
    selection: SelectionState,
    indexes: MetricIndexes,
    views: Vec<Box<dyn ViewAdapter>>,
    render_passes: u64,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("selection", &self.selection)
            .field(
                "views",
                &self.views.iter().map(|v| v.name()).collect::<Vec<_>>(),
            )
            .field("render_passes", &self.render_passes)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Initializes the selection from data-derived defaults and builds the
    /// first indexes. No views are registered yet.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Catalog`] if the default metrics cannot be
    /// resolved.
    pub fn new(
        catalog: Rc<MetricCatalog>,
        dataset: Dataset,
        boundaries: Boundaries,
    ) -> Result<Self, DashboardError> {
        let selection = SelectionState::from_dataset(catalog, &dataset);
        let indexes = MetricIndexes::build(&dataset, &selection)?;

        log::info!(
            "Dashboard ready: year {}, map metric {}, {} boundary features",
            selection.year(),
            selection.map_metric_key(),
            boundaries.features().len()
        );

        Ok(Self {
            dataset,
            boundaries,
            selection,
            indexes,
            views: Vec::new(),
            render_passes: 0,
        })
    }

    /// Loads `files` and builds a dashboard with the built-in views.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Ingest`] if a file cannot be loaded, or
    /// see [`Self::new`].
    pub fn load(catalog: Rc<MetricCatalog>, files: &DataFiles) -> Result<Self, DashboardError> {
        let (dataset, boundaries) = files.load()?;
        Self::with_standard_views(catalog, dataset, boundaries)
    }

    /// Like [`Self::new`], with the built-in map, scatter, trend, and info
    /// panel views registered and rendered.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn with_standard_views(
        catalog: Rc<MetricCatalog>,
        dataset: Dataset,
        boundaries: Boundaries,
    ) -> Result<Self, DashboardError> {
        let mut dashboard = Self::new(catalog, dataset, boundaries)?;
        for view in standard_views() {
            dashboard.register(view)?;
        }
        Ok(dashboard)
    }

    /// Adds a view and renders it once so it has a model immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Catalog`] if a selected metric no longer
    /// resolves.
    pub fn register(&mut self, mut view: Box<dyn ViewAdapter>) -> Result<(), DashboardError> {
        let ctx = RenderContext::new(
            &self.selection,
            &self.dataset,
            &self.boundaries,
            &self.indexes,
            Change::Initial,
        )?;
        view.render(&ctx);
        log::debug!("Registered view {}", view.name());
        self.views.push(view);
        Ok(())
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Loaded dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current metric indexes.
    #[must_use]
    pub const fn indexes(&self) -> &MetricIndexes {
        &self.indexes
    }

    /// Number of render passes run since construction.
    #[must_use]
    pub const fn render_passes(&self) -> u64 {
        self.render_passes
    }

    /// Selects `year`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Selection`] if the year is out of range.
    pub fn set_year(&mut self, year: i32) -> Result<(), DashboardError> {
        let change = self.selection.set_year(year)?;
        self.refresh(change)
    }

    /// Selects the map metric.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Selection`] for an unknown key.
    pub fn set_map_metric(&mut self, key: &str) -> Result<(), DashboardError> {
        let change = self.selection.set_map_metric(key)?;
        self.refresh(change)
    }

    /// Selects the scatterplot X metric.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Selection`] for an unknown key.
    pub fn set_x_metric(&mut self, key: &str) -> Result<(), DashboardError> {
        let change = self.selection.set_x_metric(key)?;
        self.refresh(change)
    }

    /// Selects the scatterplot Y metric.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Selection`] for an unknown key.
    pub fn set_y_metric(&mut self, key: &str) -> Result<(), DashboardError> {
        let change = self.selection.set_y_metric(key)?;
        self.refresh(change)
    }

    /// Replaces the trend view's districts.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Selection`] if a code is not in the
    /// dataset.
    pub fn set_selected_districts(
        &mut self,
        codes: impl IntoIterator<Item = DistrictCode>,
    ) -> Result<(), DashboardError> {
        let change = self.selection.set_selected_districts(codes)?;
        self.refresh(change)
    }

    /// Sets or clears the highlight directly.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Catalog`] if a selected metric no longer
    /// resolves during the re-render.
    pub fn set_highlight(&mut self, code: Option<DistrictCode>) -> Result<(), DashboardError> {
        let change = self.selection.set_highlight(code);
        self.refresh(change)
    }

    /// Applies a highlight event reported by a view.
    ///
    /// Returns whether the highlight changed. Events that change nothing,
    /// including ones whose code does not normalize, do not re-render.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Catalog`] if a selected metric no longer
    /// resolves during the re-render.
    pub fn dispatch(&mut self, event: &ViewEvent) -> Result<bool, DashboardError> {
        match coordinator::apply_event(&mut self.selection, event) {
            Some(change) => {
                self.refresh(change)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Collects the selection and every view's latest model.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            selection: self.selection.snapshot(),
            views: self.views.iter().filter_map(|v| v.model()).collect(),
        }
    }

    fn refresh(&mut self, change: Change) -> Result<(), DashboardError> {
        if change.invalidates_indexes() {
            self.indexes = MetricIndexes::build(&self.dataset, &self.selection)?;
        }

        let ctx = RenderContext::new(
            &self.selection,
            &self.dataset,
            &self.boundaries,
            &self.indexes,
            change,
        )?;

        for view in &mut self.views {
            view.render(&ctx);
        }
        self.render_passes += 1;

        log::debug!(
            "Render pass {} ({change}): {} views",
            self.render_passes,
            self.views.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use school_map_dashboard_models::{
        Fill, InfoPanel, MapModel, NO_DATA_FILL, SCATTER_EMPTY_MESSAGE, ScatterModel, TrendModel,
        ViewKind,
    };
    use school_map_district_models::{DistrictFeature, YearRange};
    use school_map_index::IndexScope;
    use school_map_ingest::boundaries::{district_features, read_feature_collection};
    use school_map_ingest::records::read_records;
    use school_map_ingest::FeatureProperties;
    use school_map_metrics_models::{ColorScheme, LegendDomain};

    use super::*;

    const CSV: &str = "\
District Code,District Name,Year,grad_# Graduated,sal_Average Salary
10000,Alpha,2020,80.0,\"$60,000\"
10000,Alpha,2021,90.0,\"$65,000\"
20000,Beta,2020,,\"$55,500\"
20000,Beta,2021,70.0,N/A
30000,Gamma,2021,50.0,\"$70,000\"
99999,Mystery,2021,60.0,\"$50,000\"
";

    fn code(raw: &str) -> DistrictCode {
        DistrictCode::parse(raw).unwrap()
    }

    fn feature(raw: &str, name: &str) -> DistrictFeature {
        DistrictFeature {
            code: DistrictCode::parse(raw).ok(),
            name: Some(name.to_owned()),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(read_records(CSV.as_bytes()).unwrap()).unwrap()
    }

    fn boundaries() -> Boundaries {
        Boundaries::new(vec![
            feature("00010000", "Alpha"),
            feature("00020000", "Beta"),
            feature("00030000", "Gamma"),
            feature("00040000", "Delta"),
            feature("LAKE", "Lake"),
            feature("00099999", "Unknown"),
        ])
    }

    fn dashboard() -> Dashboard {
        Dashboard::with_standard_views(Rc::new(MetricCatalog::builtin()), dataset(), boundaries())
            .unwrap()
    }

    fn map_model(dashboard: &Dashboard) -> MapModel {
        dashboard
            .snapshot()
            .views
            .into_iter()
            .find_map(|v| match v {
                ViewModel::Map(m) => Some(m),
                _ => None,
            })
            .unwrap()
    }

    fn scatter_model(dashboard: &Dashboard) -> ScatterModel {
        dashboard
            .snapshot()
            .views
            .into_iter()
            .find_map(|v| match v {
                ViewModel::Scatter(m) => Some(m),
                _ => None,
            })
            .unwrap()
    }

    fn trend_model(dashboard: &Dashboard) -> TrendModel {
        dashboard
            .snapshot()
            .views
            .into_iter()
            .find_map(|v| match v {
                ViewModel::Trend(m) => Some(m),
                _ => None,
            })
            .unwrap()
    }

    fn info_panel(dashboard: &Dashboard) -> Option<InfoPanel> {
        dashboard
            .snapshot()
            .views
            .into_iter()
            .find_map(|v| match v {
                ViewModel::InfoPanel(p) => Some(p),
                _ => None,
            })
            .unwrap()
    }

    fn fill_of<'a>(map: &'a MapModel, raw: &str) -> &'a Fill {
        let code = code(raw);
        &map.features
            .iter()
            .find(|f| f.code.as_ref() == Some(&code))
            .unwrap()
            .fill
    }

    type Scopes = (IndexScope, IndexScope, IndexScope);

    struct RecordingView {
        seen: Rc<RefCell<Vec<(Change, Scopes)>>>,
    }

    impl ViewAdapter for RecordingView {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn render(&mut self, ctx: &RenderContext<'_>) {
            self.seen.borrow_mut().push((
                ctx.change(),
                (
                    ctx.map_index().scope().clone(),
                    ctx.x_index().scope().clone(),
                    ctx.y_index().scope().clone(),
                ),
            ));
        }
    }

    #[test]
    fn initial_render_uses_defaults() {
        let dashboard = dashboard();
        let snapshot = dashboard.snapshot();

        assert_eq!(snapshot.selection.year, 2021);
        assert_eq!(snapshot.selection.map_metric, "grad");
        assert_eq!(snapshot.selection.x_metric, "grad");
        assert_eq!(snapshot.selection.y_metric, "salary");
        assert_eq!(
            snapshot.selection.selected_districts,
            [code("10000"), code("20000")]
        );
        assert_eq!(
            snapshot.views.iter().map(ViewModel::kind).collect::<Vec<_>>(),
            [
                ViewKind::Map,
                ViewKind::Scatter,
                ViewKind::Trend,
                ViewKind::InfoPanel
            ]
        );
        assert_eq!(dashboard.render_passes(), 0);
        assert_eq!(map_model(&dashboard).title, "Graduation Rate: 2021");
    }

    #[test]
    fn every_view_reads_indexes_for_the_same_year_and_metric() {
        let mut dashboard = dashboard();
        let seen = Rc::new(RefCell::new(Vec::new()));
        dashboard
            .register(Box::new(RecordingView { seen: seen.clone() }))
            .unwrap();

        dashboard.set_year(2020).unwrap();
        dashboard.set_map_metric("salary").unwrap();

        let seen = seen.borrow();
        assert_eq!(
            seen.iter().map(|(change, _)| *change).collect::<Vec<_>>(),
            [Change::Initial, Change::Year, Change::MapMetric]
        );

        let (_, (map, x, y)) = seen.last().unwrap();
        assert_eq!(
            map,
            &IndexScope {
                metric_key: "salary".to_owned(),
                column: "sal_Average Salary".to_owned(),
                year: 2020,
            }
        );
        assert_eq!(x.year, 2020);
        assert_eq!(y.year, 2020);
        assert_eq!(dashboard.indexes().map.scope(), map);

        let map_model = map_model(&dashboard);
        assert_eq!(map_model.title, "Average Salary: 2020");
        assert_eq!(map_model.year, 2020);
        assert_eq!(scatter_model(&dashboard).year, 2020);
        assert_eq!(trend_model(&dashboard).metric_key, "salary");
    }

    #[test]
    fn absent_value_never_shares_minimum_fill() {
        let dashboard = dashboard();
        let map = map_model(&dashboard);

        // Gamma sits exactly on the fixed domain minimum.
        let minimum = fill_of(&map, "30000");
        assert_eq!(
            minimum,
            &Fill::Bucket {
                index: 0,
                color: ColorScheme::Blues.colors()[0].to_owned(),
            }
        );

        let absent = fill_of(&map, "40000");
        assert_eq!(absent, &Fill::NoData);
        assert_ne!(absent.color(), minimum.color());

        let unjoined = map.features.iter().find(|f| f.code.is_none()).unwrap();
        assert_eq!(unjoined.fill.color(), NO_DATA_FILL);
        assert_eq!(unjoined.display_value, "N/A");
    }

    #[test]
    fn missing_cell_renders_as_no_data() {
        let mut dashboard = dashboard();
        dashboard.set_year(2020).unwrap();

        let map = map_model(&dashboard);
        assert_eq!(fill_of(&map, "20000"), &Fill::NoData);
        assert!(matches!(fill_of(&map, "10000"), Fill::Bucket { .. }));
    }

    #[test]
    fn map_legend_follows_metric() {
        let mut dashboard = dashboard();
        let legend = map_model(&dashboard).legend;
        assert_eq!(legend.domain, Some(LegendDomain::new(50.0, 100.0)));
        assert_eq!(
            legend.ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
            ["50%", "75%", "100%"]
        );

        dashboard.set_map_metric("salary").unwrap();
        let legend = map_model(&dashboard).legend;
        assert_eq!(legend.scheme, ColorScheme::Greens);
        assert_eq!(legend.domain, Some(LegendDomain::new(50_000.0, 70_000.0)));
    }

    #[test]
    fn scatter_plots_only_named_districts_with_both_values() {
        let dashboard = dashboard();
        let scatter = scatter_model(&dashboard);

        assert_eq!(scatter.title, "Graduation Rate vs. Average Salary (2021)");
        assert_eq!(
            scatter.points.iter().map(|p| p.code.clone()).collect::<Vec<_>>(),
            [code("10000"), code("30000")]
        );
        assert_eq!(scatter.points[0].name, "Alpha");
        assert_eq!(scatter.points[0].y_display, "$65,000");
        assert_eq!(scatter.empty_message, None);

        let x_domain = scatter.x_axis.domain.unwrap();
        assert!((x_domain.min - 48.5).abs() < 1e-9);
        assert!((x_domain.max - 92.7).abs() < 1e-9);
    }

    #[test]
    fn scatter_without_points_shows_message() {
        let mut dashboard = dashboard();
        dashboard.set_y_metric("mcas_ela").unwrap();

        let scatter = scatter_model(&dashboard);
        assert!(scatter.points.is_empty());
        assert_eq!(scatter.empty_message.as_deref(), Some(SCATTER_EMPTY_MESSAGE));
        assert_eq!(scatter.x_axis.domain, None);
        assert_eq!(scatter.y_axis.label, "MCAS ELA");
    }

    #[test]
    fn trend_series_follow_selection_order() {
        let mut dashboard = dashboard();
        dashboard
            .set_selected_districts([code("20000"), code("10000"), code("20000")])
            .unwrap();

        let trend = trend_model(&dashboard);
        assert_eq!(trend.title, "Graduation Rate over time");
        assert_eq!(
            trend.series.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            ["Beta", "Alpha"]
        );
        assert_eq!(trend.series[0].points.len(), 1);
        assert_eq!(trend.series[1].points.len(), 2);
        assert_eq!(
            trend.year_extent,
            Some(YearRange {
                min: 2020,
                max: 2021
            })
        );
        assert_eq!(trend.y_domain, Some(LegendDomain::new(50.0, 100.0)));
    }

    #[test]
    fn unknown_trend_district_is_rejected() {
        let mut dashboard = dashboard();
        let err = dashboard
            .set_selected_districts([code("10000"), code("40000")])
            .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Selection(SelectionError::UnknownDistrict { .. })
        ));
        assert_eq!(
            dashboard.selection().selected_districts(),
            [code("10000"), code("20000")]
        );
    }

    #[test]
    fn hover_highlights_the_district_in_every_view() {
        let mut dashboard = dashboard();
        let changed = dashboard
            .dispatch(&ViewEvent::hover(ViewKind::Scatter, "10000"))
            .unwrap();
        assert!(changed);

        let map = map_model(&dashboard);
        let highlighted: Vec<_> = map
            .features
            .iter()
            .filter(|f| f.highlighted)
            .filter_map(|f| f.code.clone())
            .collect();
        assert_eq!(highlighted, [code("10000")]);

        let scatter = scatter_model(&dashboard);
        assert!(scatter.points.iter().all(|p| p.highlighted == (p.code == code("10000"))));

        let trend = trend_model(&dashboard);
        assert!(trend.series[0].highlighted);
        assert!(!trend.series[1].highlighted);

        assert_eq!(info_panel(&dashboard).unwrap().name, "Alpha");
    }

    #[test]
    fn info_panel_shows_formatted_values() {
        let mut dashboard = dashboard();
        assert_eq!(info_panel(&dashboard), None);

        dashboard
            .dispatch(&ViewEvent::click(ViewKind::Map, "20000"))
            .unwrap();
        let panel = info_panel(&dashboard).unwrap();

        assert_eq!(panel.code, code("20000"));
        assert_eq!(
            panel
                .rows
                .iter()
                .map(|r| (r.label.as_str(), r.value.as_str()))
                .collect::<Vec<_>>(),
            [
                ("Graduation Rate", "70.0%"),
                ("Graduation Rate (X)", "70.0%"),
                ("Average Salary (Y)", "N/A"),
            ]
        );

        dashboard
            .dispatch(&ViewEvent::click(ViewKind::Map, "00020000"))
            .unwrap();
        assert_eq!(info_panel(&dashboard), None);
    }

    #[test]
    fn clicking_a_hovered_district_keeps_it_after_the_pointer_leaves() {
        let mut dashboard = dashboard();
        let hover = ViewEvent::hover(ViewKind::Map, "10000");
        let click = ViewEvent::click(ViewKind::Map, "10000");
        let leave = ViewEvent::leave(ViewKind::Map, "10000");

        assert!(dashboard.dispatch(&hover).unwrap());
        assert!(dashboard.dispatch(&click).unwrap());
        assert!(!dashboard.dispatch(&leave).unwrap());
        assert_eq!(info_panel(&dashboard).unwrap().name, "Alpha");

        let other = ViewEvent::hover(ViewKind::Scatter, "20000");
        assert!(!dashboard.dispatch(&other).unwrap());
        assert_eq!(info_panel(&dashboard).unwrap().name, "Alpha");
        assert!(dashboard.selection().is_highlight_pinned());
    }

    #[test]
    fn info_panel_names_unmapped_districts() {
        let mut dashboard = dashboard();

        dashboard.set_highlight(Some(code("99999"))).unwrap();
        assert_eq!(info_panel(&dashboard).unwrap().name, "Mystery");

        dashboard.set_highlight(Some(code("77777777"))).unwrap();
        assert_eq!(info_panel(&dashboard).unwrap().name, "Unknown District");
    }

    #[test]
    fn ignored_events_do_not_render() {
        let mut dashboard = dashboard();

        assert!(!dashboard.dispatch(&ViewEvent::click(ViewKind::Map, "BAD")).unwrap());
        assert!(!dashboard.dispatch(&ViewEvent::leave(ViewKind::Map, "10000")).unwrap());
        assert_eq!(dashboard.render_passes(), 0);

        assert!(dashboard.dispatch(&ViewEvent::click(ViewKind::Map, "10000")).unwrap());
        assert_eq!(dashboard.render_passes(), 1);
    }

    #[test]
    fn rejected_changes_leave_state_untouched() {
        let mut dashboard = dashboard();

        let err = dashboard.set_year(1999).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Selection(SelectionError::YearOutOfRange { year: 1999, .. })
        ));

        let err = dashboard.set_map_metric("nope").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Selection(SelectionError::Catalog(CatalogError::UnknownMetric { .. }))
        ));

        assert_eq!(dashboard.selection().year(), 2021);
        assert_eq!(dashboard.selection().map_metric_key(), "grad");
        assert_eq!(dashboard.render_passes(), 0);
    }

    #[test]
    fn highlight_changes_keep_indexes() {
        let mut dashboard = dashboard();
        let before = dashboard.indexes().map.clone();

        dashboard.set_highlight(Some(code("10000"))).unwrap();
        assert_eq!(dashboard.indexes().map, before);
        assert_eq!(dashboard.render_passes(), 1);
    }

    #[test]
    fn boundaries_from_geojson() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "ORG8CODE": 10000, "DISTRICT_N": "Alpha" }
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "ORG8CODE": "00030000", "DISTRICT_N": "Gamma" }
                }
            ]
        }"#;
        let collection = read_feature_collection(geojson.as_bytes()).unwrap();
        let features = district_features(&collection, &FeatureProperties::default());
        let boundaries = Boundaries::new(features).with_outline(&collection);

        let dashboard = Dashboard::with_standard_views(
            Rc::new(MetricCatalog::builtin()),
            dataset(),
            boundaries,
        )
        .unwrap();
        let map = map_model(&dashboard);

        assert_eq!(map.features.len(), 2);
        assert_eq!(map.outline_features, 2);
        assert_eq!(map.features[0].display_value, "90.0%");
    }
}
