use cellar::{
    prelude::*,
    recommend::{DEFAULT_TOP_N, recommend},
    score::WeightedCriteria,
};
use clap::Parser;

use crate::{
    cli::{CatalogArgs, WeightArgs},
    tables::build_recommendation_table,
};

#[derive(Parser)]
pub struct RecommendArgs {
    #[clap(flatten)]
    catalog: CatalogArgs,

    #[clap(flatten)]
    weights: WeightArgs,

    /// Application to look for, case-insensitively. For example: `EV` or `solar`.
    #[clap(long, env = "CELLAR_APPLICATION")]
    application: String,

    /// Maximum number of recommendations.
    #[clap(long = "top", default_value_t = DEFAULT_TOP_N, env = "CELLAR_TOP")]
    top_n: usize,
}

impl RecommendArgs {
    pub fn run(self) -> Result {
        let catalog = self.catalog.load()?;
        let weights = WeightedCriteria::from(self.weights);
        let recommendations = recommend(&catalog, &self.application, &weights, self.top_n);
        if recommendations.is_empty() {
            warn!(application = %self.application, "no battery serves the application");
        } else {
            println!("{}", build_recommendation_table(&recommendations));
        }
        Ok(())
    }
}
