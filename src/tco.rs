//! Total cost of ownership over a usage scenario.

use bon::bon;
use serde::Serialize;

use crate::{
    battery::Battery,
    prelude::*,
    quantity::{
        Quantity,
        cost::{Rupees, RupeesPerKilowattHour, RupeesPerYear},
        energy::KilowattHours,
        time::Years,
    },
};

/// Lead-acid price the payback period is measured against.
pub const LEAD_ACID_REFERENCE_COST: RupeesPerKilowattHour = Quantity(10_400.0);

/// Share of the initial cost a replacement costs unless stated explicitly.
const DEFAULT_REPLACEMENT_SHARE: f64 = 0.8;

const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UsagePattern {
    /// One full cycle a day.
    Daily,

    /// One full cycle a week.
    Weekly,

    /// One full cycle a month.
    Occasional,
}

impl UsagePattern {
    #[must_use]
    pub const fn cycles_per_year(self) -> f64 {
        match self {
            Self::Daily => 365.0,
            Self::Weekly => 52.0,
            Self::Occasional => 12.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TcoError {
    #[error("`{field}` must be {expected}, got {value}")]
    InvalidInput { field: &'static str, expected: &'static str, value: f64 },

    #[error("`{0}` has zero depth of discharge and cannot deliver any energy")]
    NoUsableCapacity(String),
}

/// Validated usage scenario, built with [`TcoInput::builder`].
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoInput {
    usage_pattern: UsagePattern,
    daily_energy: KilowattHours,
    electricity_rate: RupeesPerKilowattHour,
    years: Years,

    /// Cost of a single replacement, defaults to 80 % of the initial cost.
    replacement_cost: Option<Rupees>,

    maintenance_per_year: RupeesPerYear,
}

#[bon]
impl TcoInput {
    #[builder]
    pub fn new(
        usage_pattern: UsagePattern,
        daily_energy: KilowattHours,
        electricity_rate: RupeesPerKilowattHour,
        years: Years,
        replacement_cost: Option<Rupees>,
        #[builder(default)] maintenance_per_year: RupeesPerYear,
    ) -> Result<Self, TcoError> {
        let this = Self {
            usage_pattern,
            daily_energy,
            electricity_rate,
            years,
            replacement_cost,
            maintenance_per_year,
        };
        this.validate()?;
        Ok(this)
    }
}

impl TcoInput {
    fn validate(&self) -> Result<(), TcoError> {
        ensure_positive("daily_energy", self.daily_energy.0)?;
        ensure_non_negative("electricity_rate", self.electricity_rate.0)?;
        ensure_positive("years", self.years.0)?;
        ensure_non_negative("maintenance_per_year", self.maintenance_per_year.0)?;
        if let Some(replacement_cost) = self.replacement_cost {
            ensure_non_negative("replacement_cost", replacement_cost.0)?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn usage_pattern(&self) -> UsagePattern {
        self.usage_pattern
    }

    #[must_use]
    pub const fn daily_energy(&self) -> KilowattHours {
        self.daily_energy
    }

    #[must_use]
    pub const fn electricity_rate(&self) -> RupeesPerKilowattHour {
        self.electricity_rate
    }

    #[must_use]
    pub const fn years(&self) -> Years {
        self.years
    }

    #[must_use]
    pub const fn replacement_cost(&self) -> Option<Rupees> {
        self.replacement_cost
    }

    #[must_use]
    pub const fn maintenance_per_year(&self) -> RupeesPerYear {
        self.maintenance_per_year
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), TcoError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TcoError::InvalidInput { field, expected: "finite and positive", value })
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), TcoError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TcoError::InvalidInput { field, expected: "finite and non-negative", value })
    }
}

/// Number of replacements over the horizon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum Replacements {
    Count { count: u32 },

    /// The battery has no rated cycles, so it is replaced on every use. The count is capped at the
    /// number of uses over the horizon, minus the initial pack.
    Unbounded { capped_at: u32 },
}

impl Replacements {
    #[must_use]
    pub const fn count(self) -> u32 {
        match self {
            Self::Count { count } => count,
            Self::Unbounded { capped_at } => capped_at,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn estimate(battery_life: Years, horizon: Years, usage_pattern: UsagePattern) -> Self {
        // `as` saturates, and the value is at least zero:
        let minus_initial = |n_packs: f64| (n_packs.floor() - 1.0).max(0.0) as u32;
        if battery_life.0 > 0.0 {
            Self::Count { count: minus_initial(horizon.0 / battery_life.0) }
        } else {
            let n_uses = horizon.0 * usage_pattern.cycles_per_year();
            Self::Unbounded { capped_at: minus_initial(n_uses) }
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoBreakdown {
    /// Nominal capacity needed to deliver the daily energy within the depth of discharge.
    pub capacity_needed: KilowattHours,

    pub battery_life: Years,
    pub replacements: Replacements,

    pub initial_cost: Rupees,

    /// Charging losses paid for over the horizon.
    pub operating_cost: Rupees,

    pub maintenance_cost: Rupees,

    /// Total cost of all the replacements.
    pub replacement_cost: Rupees,

    pub total_cost: Rupees,
    pub cost_per_kwh: RupeesPerKilowattHour,

    /// Time to recoup the initial cost from the savings against lead-acid. `None` unless the
    /// battery is cheaper than [`LEAD_ACID_REFERENCE_COST`].
    pub payback_period: Option<Years>,
}

#[instrument(skip_all, fields(battery = %battery.name, years = input.years.0))]
pub fn calculate_tco(battery: &Battery, input: &TcoInput) -> Result<TcoBreakdown, TcoError> {
    input.validate()?;
    if battery.depth_of_discharge <= 0.0 {
        return Err(TcoError::NoUsableCapacity(battery.name.clone()));
    }
    let price = RupeesPerKilowattHour::from(battery.cost);
    let capacity_needed = input.daily_energy / (battery.depth_of_discharge / 100.0);
    let initial_cost = price * capacity_needed;

    let yearly_energy = input.daily_energy * DAYS_PER_YEAR;
    let yearly_losses = yearly_energy * (1.0 - battery.efficiency / 100.0);
    let operating_cost = input.electricity_rate * yearly_losses * input.years.0;
    let maintenance_cost = input.maintenance_per_year * input.years;

    let battery_life = Years::from(battery.cycle_life / input.usage_pattern.cycles_per_year());
    let replacements = Replacements::estimate(battery_life, input.years, input.usage_pattern);
    if let Replacements::Unbounded { capped_at } = replacements {
        warn!(capped_at, "the battery has no rated cycles, replacing it on every use");
    }
    let unit_replacement_cost = input
        .replacement_cost
        .filter(|cost| cost.0 > 0.0)
        .unwrap_or(initial_cost * DEFAULT_REPLACEMENT_SHARE);
    let replacement_cost = unit_replacement_cost * f64::from(replacements.count());

    let total_cost = initial_cost + operating_cost + maintenance_cost + replacement_cost;
    let cost_per_kwh = total_cost / (yearly_energy * input.years.0);

    let savings = (LEAD_ACID_REFERENCE_COST - price) * capacity_needed;
    let payback_period = (savings.0 > 0.0).then(|| initial_cost / (savings / input.years));

    debug!(
        total_cost = %total_cost,
        replacements = replacements.count(),
        payback_period = ?payback_period.map(|years| years.0),
        "calculated",
    );
    Ok(TcoBreakdown {
        capacity_needed,
        battery_life,
        replacements,
        initial_cost,
        operating_cost,
        maintenance_cost,
        replacement_cost,
        total_cost,
        cost_per_kwh,
        payback_period,
    })
}
