mod chart;
mod export;
mod list;
mod recommend;
mod share;
mod tco;

use std::path::PathBuf;

use cellar::{
    catalog::Catalog,
    chart::{ChartConfig, ChartType},
    filter::{Bounds, FilterConfig},
    metric::Metric,
    prelude::*,
    score::WeightedCriteria,
    share::ShareableState,
};
use clap::{Parser, Subcommand};

use crate::cli::{
    chart::ChartArgs,
    export::ExportArgs,
    list::ListArgs,
    recommend::RecommendArgs,
    share::ShareArgs,
    tco::TcoArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        match self.command {
            Command::List(args) => args.run(),
            Command::Recommend(args) => args.run(),
            Command::Tco(args) => args.run(),
            Command::Chart(args) => args.run(),
            Command::Share(args) => args.run(),
            Command::Export(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Compare the batteries side by side.
    List(Box<ListArgs>),

    /// Recommend the best batteries for an application.
    Recommend(Box<RecommendArgs>),

    /// Project the total cost of ownership.
    Tco(Box<TcoArgs>),

    /// Print the chart data points.
    Chart(Box<ChartArgs>),

    /// Encode, decode, or link the shareable state.
    Share(Box<ShareArgs>),

    /// Export the batteries as CSV.
    Export(Box<ExportArgs>),
}

#[must_use]
#[derive(Parser)]
pub struct CatalogArgs {
    /// Battery catalog file, `.json` or `.toml`. Defaults to the built-in reference catalog.
    #[clap(long = "catalog", env = "CELLAR_CATALOG")]
    path: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self) -> Result<Catalog> {
        match &self.path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::reference(),
        }
    }
}

#[must_use]
#[derive(Parser)]
pub struct FilterArgs {
    /// Minimum pack price, ₹/kWh.
    #[clap(long, default_value = "0", env = "CELLAR_MIN_COST")]
    min_cost: f64,

    /// Maximum pack price, ₹/kWh.
    #[clap(long, default_value = "50000", env = "CELLAR_MAX_COST")]
    max_cost: f64,

    #[clap(long, default_value = "0", env = "CELLAR_MIN_CYCLE_LIFE")]
    min_cycle_life: f64,

    #[clap(long, default_value = "15000", env = "CELLAR_MAX_CYCLE_LIFE")]
    max_cycle_life: f64,

    /// Keep the batteries serving any of these applications.
    #[clap(long = "application", value_delimiter = ',', env = "CELLAR_APPLICATIONS")]
    applications: Vec<String>,

    /// Minimum safety rating out of 10.
    #[clap(long, default_value = "0", env = "CELLAR_MIN_SAFETY")]
    min_safety: f64,

    /// Minimum round-trip efficiency, percent.
    #[clap(long, default_value = "0", env = "CELLAR_MIN_EFFICIENCY")]
    min_efficiency: f64,
}

impl From<&FilterArgs> for FilterConfig {
    fn from(args: &FilterArgs) -> Self {
        Self {
            cost_range: Bounds::new(args.min_cost, args.max_cost),
            cycle_life_range: Bounds::new(args.min_cycle_life, args.max_cycle_life),
            applications: args.applications.clone(),
            safety_min: args.min_safety,
            efficiency_min: args.min_efficiency,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct WeightArgs {
    #[clap(
        long = "energy-density-weight",
        default_value = "0.2",
        env = "CELLAR_ENERGY_DENSITY_WEIGHT"
    )]
    energy_density: f64,

    #[clap(long = "cycle-life-weight", default_value = "0.2", env = "CELLAR_CYCLE_LIFE_WEIGHT")]
    cycle_life: f64,

    #[clap(long = "cost-weight", default_value = "0.2", env = "CELLAR_COST_WEIGHT")]
    cost: f64,

    #[clap(long = "safety-weight", default_value = "0.2", env = "CELLAR_SAFETY_WEIGHT")]
    safety: f64,

    #[clap(
        long = "charge-time-weight",
        default_value = "0.1",
        env = "CELLAR_CHARGE_TIME_WEIGHT"
    )]
    charge_time: f64,

    #[clap(long = "efficiency-weight", default_value = "0.1", env = "CELLAR_EFFICIENCY_WEIGHT")]
    efficiency: f64,
}

impl From<WeightArgs> for WeightedCriteria {
    fn from(args: WeightArgs) -> Self {
        Self {
            energy_density: args.energy_density,
            cycle_life: args.cycle_life,
            cost: args.cost,
            safety: args.safety,
            charge_time: args.charge_time,
            efficiency: args.efficiency,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct ChartConfigArgs {
    #[clap(long, value_enum, default_value = "energy-density", env = "CELLAR_X_AXIS")]
    x_axis: Metric,

    #[clap(long, value_enum, default_value = "cost", env = "CELLAR_Y_AXIS")]
    y_axis: Metric,

    #[clap(long, value_enum, default_value = "cycle-life", env = "CELLAR_BUBBLE_SIZE")]
    bubble_size: Metric,

    #[clap(long, value_enum, default_value = "bubble", env = "CELLAR_CHART_TYPE")]
    chart_type: ChartType,
}

impl From<ChartConfigArgs> for ChartConfig {
    fn from(args: ChartConfigArgs) -> Self {
        Self {
            x_axis: args.x_axis,
            y_axis: args.y_axis,
            bubble_size: args.bubble_size,
            chart_type: args.chart_type,
        }
    }
}

/// Shared link state overriding the filter, the weights, and the selection.
#[must_use]
#[derive(Parser)]
pub struct StateArgs {
    /// Shareable state token, as printed by `share encode`.
    #[clap(long = "state", env = "CELLAR_STATE")]
    token: Option<String>,
}

impl StateArgs {
    /// Decoded state, if any. A malformed token falls back to the defaults.
    pub fn decode(&self) -> Option<ShareableState> {
        self.token.as_deref().map(ShareableState::decode_or_default)
    }
}
