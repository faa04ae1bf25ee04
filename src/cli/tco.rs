use cellar::{
    prelude::*,
    quantity::{
        cost::{Rupees, RupeesPerKilowattHour, RupeesPerYear},
        energy::KilowattHours,
        time::Years,
    },
    tco::{TcoInput, UsagePattern, calculate_tco},
};
use clap::Parser;

use crate::{cli::CatalogArgs, tables::build_tco_table};

#[derive(Parser)]
pub struct TcoArgs {
    #[clap(flatten)]
    catalog: CatalogArgs,

    /// Batteries to project, by name. Defaults to the entire catalog.
    #[clap(long = "battery", value_delimiter = ',')]
    batteries: Vec<String>,

    #[clap(long = "usage", value_enum, default_value = "daily", env = "CELLAR_USAGE")]
    usage_pattern: UsagePattern,

    /// Energy drawn from the battery per day.
    #[clap(long = "daily-energy-kwh", default_value = "10", env = "CELLAR_DAILY_ENERGY_KWH")]
    daily_energy: KilowattHours,

    /// Electricity tariff, ₹/kWh.
    #[clap(long = "electricity-rate", default_value = "8", env = "CELLAR_ELECTRICITY_RATE")]
    electricity_rate: RupeesPerKilowattHour,

    /// Projection horizon.
    #[clap(long, default_value = "5", env = "CELLAR_YEARS")]
    years: Years,

    /// Cost of a single replacement. Defaults to 80 % of the initial cost.
    #[clap(long, env = "CELLAR_REPLACEMENT_COST")]
    replacement_cost: Option<Rupees>,

    #[clap(long, default_value = "500", env = "CELLAR_MAINTENANCE_PER_YEAR")]
    maintenance_per_year: RupeesPerYear,
}

impl TcoArgs {
    pub fn run(self) -> Result {
        let catalog = self.catalog.load()?;
        let input = TcoInput::builder()
            .usage_pattern(self.usage_pattern)
            .daily_energy(self.daily_energy)
            .electricity_rate(self.electricity_rate)
            .years(self.years)
            .maybe_replacement_cost(self.replacement_cost)
            .maintenance_per_year(self.maintenance_per_year)
            .build()?;

        let batteries = if self.batteries.is_empty() {
            catalog.all()
        } else {
            self.batteries
                .iter()
                .map(|name| catalog.get(name).with_context(|| format!("unknown battery `{name}`")))
                .collect::<Result<_>>()?
        };
        let breakdowns = batteries
            .into_iter()
            .map(|battery| calculate_tco(battery, &input).map(|breakdown| (battery, breakdown)))
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", build_tco_table(&breakdowns));
        Ok(())
    }
}
