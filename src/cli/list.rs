use cellar::{
    compare::{Selection, SortKey, SortOrder, sort_batteries},
    filter::{FilterConfig, filter},
    metric::Metric,
    prelude::*,
    score::WeightedCriteria,
};
use clap::Parser;
use enumset::EnumSet;

use crate::{
    cli::{CatalogArgs, FilterArgs, StateArgs, WeightArgs},
    tables::build_comparison_table,
};

#[derive(Parser)]
pub struct ListArgs {
    #[clap(flatten)]
    catalog: CatalogArgs,

    #[clap(flatten)]
    filter: FilterArgs,

    #[clap(flatten)]
    weights: WeightArgs,

    #[clap(flatten)]
    state: StateArgs,

    /// `name` or a metric key, for example `cost_INRperkWh`.
    #[clap(long, default_value = "name", env = "CELLAR_SORT")]
    sort: SortKey,

    #[clap(long, value_enum, default_value = "ascending", env = "CELLAR_SORT_ORDER")]
    order: SortOrder,

    /// Metric columns to display.
    #[clap(
        long = "metrics",
        value_enum,
        value_delimiter = ',',
        num_args = 1..,
        default_value = "energy-density,cycle-life,cost,safety,charge-time,efficiency",
        env = "CELLAR_METRICS",
    )]
    metrics: Vec<Metric>,

    /// Select the batteries by name.
    #[clap(long = "select", value_delimiter = ',')]
    selected: Vec<String>,

    /// Show only the selected batteries.
    #[clap(long)]
    compare: bool,
}

impl ListArgs {
    pub fn run(self) -> Result {
        let catalog = self.catalog.load()?;
        let (filter_config, weights, mut selection) = match self.state.decode() {
            Some(state) => (state.filter, state.weights, Selection::from(state.selected)),
            None => (
                FilterConfig::from(&self.filter),
                WeightedCriteria::from(self.weights),
                Selection::default(),
            ),
        };
        for name in self.selected {
            selection.select(name);
        }

        let mut batteries = filter(&catalog, &filter_config);
        if self.compare {
            batteries = selection.retain_selected(&batteries);
        }
        sort_batteries(&mut batteries, self.sort, self.order);
        info!(n_batteries = batteries.len(), n_selected = selection.names().len(), "listing");

        let metrics: EnumSet<Metric> = self.metrics.into_iter().collect();
        println!("{}", build_comparison_table(&batteries, metrics, &weights, &selection));
        Ok(())
    }
}
