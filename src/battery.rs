use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// Battery technology record.
///
/// Field names on the wire follow the established dataset keys, so the existing data files load
/// unchanged and exported CSV headers stay familiar.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub name: String,

    #[serde(rename = "energyDensity_Whkg")]
    pub energy_density: f64,

    #[serde(rename = "cycleLife_cycles")]
    pub cycle_life: f64,

    #[serde(rename = "chargeTime_hours")]
    pub charge_time: f64,

    #[serde(rename = "selfDischarge_pctPerMonth")]
    pub self_discharge: f64,

    /// Safety rating, `0..=10`.
    #[serde(rename = "safety_rating10")]
    pub safety: f64,

    /// Pack price per kilowatt-hour of nominal capacity.
    #[serde(rename = "cost_INRperkWh")]
    pub cost: f64,

    #[serde(rename = "tempRange_spanC")]
    pub temperature_span: f64,

    /// Display token, never used in calculations.
    #[serde(default)]
    pub color: String,

    /// Comma-separated application tags.
    #[serde(default)]
    pub applications: String,

    #[serde(default, rename = "marketShare")]
    pub market_share: String,

    /// Round-trip efficiency, percent.
    #[serde(rename = "efficiency_pct")]
    pub efficiency: f64,

    #[serde(rename = "powerDensity_Wkg")]
    pub power_density: f64,

    #[serde(rename = "depthOfDischarge_pct")]
    pub depth_of_discharge: f64,

    #[serde(rename = "operatingTemp_min")]
    pub operating_temp_min: f64,

    #[serde(rename = "operatingTemp_max")]
    pub operating_temp_max: f64,

    #[serde(default, rename = "indianManufacturers")]
    pub manufacturers: String,

    #[serde(default)]
    pub advantages: String,

    #[serde(default)]
    pub disadvantages: String,
}

impl Battery {
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::EnergyDensity => self.energy_density,
            Metric::CycleLife => self.cycle_life,
            Metric::ChargeTime => self.charge_time,
            Metric::SelfDischarge => self.self_discharge,
            Metric::Safety => self.safety,
            Metric::Cost => self.cost,
            Metric::TemperatureSpan => self.temperature_span,
            Metric::Efficiency => self.efficiency,
            Metric::PowerDensity => self.power_density,
            Metric::DepthOfDischarge => self.depth_of_discharge,
        }
    }

    /// Check whether the application text mentions `application`, case-insensitively.
    ///
    /// This is a plain substring match: `"EV"` matches `"Next-gen EVs"`,
    /// but not `"Electric vehicles"`.
    #[must_use]
    pub fn serves(&self, application: &str) -> bool {
        self.applications.to_lowercase().contains(&application.to_lowercase())
    }

    /// Individual application tags, trimmed.
    pub fn application_tags(&self) -> impl Iterator<Item = &str> {
        self.applications.split(',').map(str::trim).filter(|tag| !tag.is_empty())
    }

    pub(crate) fn numeric_fields(&self) -> [(&'static str, f64); 12] {
        [
            ("energyDensity_Whkg", self.energy_density),
            ("cycleLife_cycles", self.cycle_life),
            ("chargeTime_hours", self.charge_time),
            ("selfDischarge_pctPerMonth", self.self_discharge),
            ("safety_rating10", self.safety),
            ("cost_INRperkWh", self.cost),
            ("tempRange_spanC", self.temperature_span),
            ("efficiency_pct", self.efficiency),
            ("powerDensity_Wkg", self.power_density),
            ("depthOfDischarge_pct", self.depth_of_discharge),
            ("operatingTemp_min", self.operating_temp_min),
            ("operatingTemp_max", self.operating_temp_max),
        ]
    }
}
