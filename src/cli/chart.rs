use cellar::{
    chart::{ChartConfig, padded_domain},
    filter::{FilterConfig, filter},
    prelude::*,
};
use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::{CatalogArgs, ChartConfigArgs, FilterArgs},
    tables::build_chart_table,
};

#[derive(Parser)]
pub struct ChartArgs {
    #[clap(flatten)]
    catalog: CatalogArgs,

    #[clap(flatten)]
    filter: FilterArgs,

    #[clap(flatten)]
    chart: ChartConfigArgs,
}

impl ChartArgs {
    pub fn run(self) -> Result {
        let catalog = self.catalog.load()?;
        let config = ChartConfig::from(self.chart);
        let batteries = filter(&catalog, &FilterConfig::from(&self.filter));
        let points = config.points(&batteries);

        let x_domain = padded_domain(&points.iter().map(|point| point.x).collect_vec());
        let y_domain = padded_domain(&points.iter().map(|point| point.y).collect_vec());
        info!(chart_type = ?config.chart_type, ?x_domain, ?y_domain, "plotted");

        println!("{}", build_chart_table(&config, &points));
        if let (Some((x_min, x_max)), Some((y_min, y_max))) = (x_domain, y_domain) {
            println!("{}: {x_min} to {x_max}", config.x_axis);
            println!("{}: {y_min} to {y_max}", config.y_axis);
        }
        Ok(())
    }
}
