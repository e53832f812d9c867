#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for inspecting school district metrics.
//!
//! Loads the metric CSV and boundary files, then prints the catalog,
//! available years, a single metric index, a district's history, or a
//! full dashboard snapshot as JSON on stdout. Logs go to stderr and are
//! controlled with `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};
use school_map_dashboard::{DataFiles, Dashboard, ViewEvent};
use school_map_dashboard_models::ViewKind;
use school_map_district_models::{DistrictCode, YearRange};
use school_map_index::{IndexScope, MetricIndex, YearValue, district_series};
use school_map_ingest::{Dataset, FeatureProperties};
use school_map_ingest::boundaries::{DEFAULT_CODE_PROPERTY, DEFAULT_NAME_PROPERTY};
use school_map_metrics::{MetricCatalog, legend_domain};
use school_map_metrics_models::LegendDomain;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "school_map", about = "School district metrics dashboard tool")]
struct Cli {
    /// Cleaned metric CSV
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// District boundary `GeoJSON`
    #[arg(long, global = true)]
    boundaries: Option<PathBuf>,
    /// State outline `GeoJSON` drawn under the districts
    #[arg(long, global = true)]
    outline: Option<PathBuf>,
    /// Boundary feature property holding the district code
    #[arg(long, global = true, default_value = DEFAULT_CODE_PROPERTY)]
    code_property: String,
    /// Boundary feature property holding the district name
    #[arg(long, global = true, default_value = DEFAULT_NAME_PROPERTY)]
    name_property: String,
    /// Metric catalog TOML replacing the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the metric catalog
    Metrics,
    /// List the years present in the metric data
    Years,
    /// Print one metric's values for one year, keyed by district code
    Index {
        /// Metric key (e.g., "salary")
        #[arg(long)]
        metric: String,
        /// School year. Defaults to the latest year in the data.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Print one district's history for a metric
    Series {
        /// Metric key (e.g., "grad")
        #[arg(long)]
        metric: String,
        /// District code, padded or not (e.g., "350000")
        #[arg(long)]
        district: String,
    },
    /// Build the dashboard, apply selections in order, and print every view
    Snapshot {
        /// School year
        #[arg(long)]
        year: Option<i32>,
        /// Map metric key
        #[arg(long)]
        metric: Option<String>,
        /// Scatterplot X metric key
        #[arg(long)]
        x: Option<String>,
        /// Scatterplot Y metric key
        #[arg(long)]
        y: Option<String>,
        /// Comma-separated district codes for the trend view
        #[arg(long, value_delimiter = ',')]
        districts: Option<Vec<String>>,
        /// District code to highlight
        #[arg(long)]
        highlight: Option<String>,
        /// Map clicks to replay after the other selections (repeatable)
        #[arg(long)]
        click: Vec<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct YearsOutput<'a> {
    years: &'a [i32],
    min: i32,
    max: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexOutput<'a> {
    scope: &'a IndexScope,
    label: &'a str,
    domain: Option<LegendDomain>,
    values: Vec<IndexEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry<'a> {
    code: &'a DistrictCode,
    name: Option<&'a str>,
    value: f64,
    display_value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesOutput<'a> {
    metric_key: &'a str,
    code: &'a DistrictCode,
    name: Option<&'a str>,
    points: Vec<YearValue>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let catalog = Rc::new(load_catalog(cli.catalog.as_deref())?);

    match &cli.command {
        Commands::Metrics => print_json(&catalog.metrics())?,
        Commands::Years => {
            let dataset = load_data(&cli)?;
            let range = dataset.year_range();
            print_json(&YearsOutput {
                years: dataset.years(),
                min: range.min,
                max: range.max,
            })?;
        }
        Commands::Index { metric, year } => {
            let dataset = load_data(&cli)?;
            let def = catalog.get(metric)?;
            let year = resolve_year(dataset.year_range(), *year)?;
            let index = MetricIndex::build(dataset.records(), def, year);

            print_json(&IndexOutput {
                scope: index.scope(),
                label: &def.label,
                domain: legend_domain(def, index.values()),
                values: index
                    .iter()
                    .map(|(code, value)| IndexEntry {
                        code,
                        name: dataset.district_name(code),
                        value,
                        display_value: def.format_value(Some(value)),
                    })
                    .collect(),
            })?;
        }
        Commands::Series { metric, district } => {
            let dataset = load_data(&cli)?;
            let def = catalog.get(metric)?;
            let code = DistrictCode::parse(district)?;

            print_json(&SeriesOutput {
                metric_key: &def.key,
                code: &code,
                name: dataset.district_name(&code),
                points: district_series(dataset.records(), &def.column, &code),
            })?;
        }
        Commands::Snapshot {
            year,
            metric,
            x,
            y,
            districts,
            highlight,
            click,
        } => {
            let files = DataFiles {
                data: required(cli.data.as_deref(), "--data")?.to_path_buf(),
                boundaries: required(cli.boundaries.as_deref(), "--boundaries")?.to_path_buf(),
                outline: cli.outline.clone(),
                properties: FeatureProperties {
                    code: cli.code_property.clone(),
                    name: cli.name_property.clone(),
                },
            };
            let mut dashboard = Dashboard::load(catalog, &files)?;

            if let Some(year) = year {
                dashboard.set_year(*year)?;
            }
            if let Some(key) = metric {
                dashboard.set_map_metric(key)?;
            }
            if let Some(key) = x {
                dashboard.set_x_metric(key)?;
            }
            if let Some(key) = y {
                dashboard.set_y_metric(key)?;
            }
            if let Some(districts) = districts {
                let codes = districts
                    .iter()
                    .map(|raw| DistrictCode::parse(raw))
                    .collect::<Result<Vec<_>, _>>()?;
                dashboard.set_selected_districts(codes)?;
            }
            if let Some(raw) = highlight {
                dashboard.set_highlight(Some(DistrictCode::parse(raw)?))?;
            }
            for raw in click {
                dashboard.dispatch(&ViewEvent::click(ViewKind::Map, raw.as_str()))?;
            }

            log::info!("Snapshot after {} render passes", dashboard.render_passes());
            print_json(&dashboard.snapshot())?;
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<MetricCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(MetricCatalog::builtin());
    };
    log::info!("Loading metric catalog from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Ok(MetricCatalog::from_toml(&text)?)
}

fn load_data(cli: &Cli) -> Result<Dataset, Box<dyn std::error::Error>> {
    Ok(school_map_ingest::load_dataset(required(
        cli.data.as_deref(),
        "--data",
    )?)?)
}

fn required<'a>(path: Option<&'a Path>, flag: &str) -> Result<&'a Path, String> {
    path.ok_or_else(|| format!("{flag} is required for this command"))
}

fn resolve_year(range: YearRange, year: Option<i32>) -> Result<i32, String> {
    let Some(year) = year else {
        return Ok(range.max);
    };
    if !range.contains(year) {
        return Err(format!(
            "Year {year} is outside the available range {}-{}",
            range.min, range.max
        ));
    }
    Ok(year)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
