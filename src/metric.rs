//! Metric registry: static metadata for every comparable battery metric.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{fmt::Grouped, quantity::cost::Rupees};

#[derive(Debug, Hash, Serialize, Deserialize, clap::ValueEnum, enumset::EnumSetType)]
pub enum Metric {
    #[serde(rename = "energyDensity_Whkg")]
    EnergyDensity,

    #[serde(rename = "cycleLife_cycles")]
    CycleLife,

    #[serde(rename = "chargeTime_hours")]
    ChargeTime,

    #[serde(rename = "selfDischarge_pctPerMonth")]
    SelfDischarge,

    #[serde(rename = "safety_rating10")]
    Safety,

    #[serde(rename = "cost_INRperkWh")]
    Cost,

    #[serde(rename = "tempRange_spanC")]
    TemperatureSpan,

    #[serde(rename = "efficiency_pct")]
    Efficiency,

    #[serde(rename = "powerDensity_Wkg")]
    PowerDensity,

    #[serde(rename = "depthOfDischarge_pct")]
    DepthOfDischarge,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MetricInfo {
    pub label: &'static str,

    /// Display unit, may be empty.
    pub unit: &'static str,

    /// Maximum number of fraction digits when displayed.
    pub precision: usize,

    pub higher_is_better: bool,
}

impl MetricInfo {
    const fn new(
        label: &'static str,
        unit: &'static str,
        precision: usize,
        higher_is_better: bool,
    ) -> Self {
        Self { label, unit, precision, higher_is_better }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown metric `{key}`")]
pub struct MetricNotFound {
    pub key: String,
}

impl Metric {
    pub fn all() -> EnumSet<Self> {
        EnumSet::all()
    }

    /// Dataset key of the metric, the same one used on the wire.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::EnergyDensity => "energyDensity_Whkg",
            Self::CycleLife => "cycleLife_cycles",
            Self::ChargeTime => "chargeTime_hours",
            Self::SelfDischarge => "selfDischarge_pctPerMonth",
            Self::Safety => "safety_rating10",
            Self::Cost => "cost_INRperkWh",
            Self::TemperatureSpan => "tempRange_spanC",
            Self::Efficiency => "efficiency_pct",
            Self::PowerDensity => "powerDensity_Wkg",
            Self::DepthOfDischarge => "depthOfDischarge_pct",
        }
    }

    pub const fn info(self) -> MetricInfo {
        match self {
            Self::EnergyDensity => MetricInfo::new("Energy Density", "Wh/kg", 0, true),
            Self::CycleLife => MetricInfo::new("Cycle Life", "cycles", 0, true),
            Self::ChargeTime => MetricInfo::new("Charge Time", "hours", 1, false),
            Self::SelfDischarge => MetricInfo::new("Self-Discharge", "%/month", 1, false),
            Self::Safety => MetricInfo::new("Safety Rating", "/10", 1, true),
            Self::Cost => MetricInfo::new("Cost", "₹/kWh", 0, false),
            Self::TemperatureSpan => MetricInfo::new("Temperature Range", "°C", 0, true),
            Self::Efficiency => MetricInfo::new("Efficiency", "%", 0, true),
            Self::PowerDensity => MetricInfo::new("Power Density", "W/kg", 0, true),
            Self::DepthOfDischarge => MetricInfo::new("Depth of Discharge", "%", 0, true),
        }
    }
}

impl FromStr for Metric {
    type Err = MetricNotFound;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|metric| metric.key() == key)
            .ok_or_else(|| MetricNotFound { key: key.to_owned() })
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().label)
    }
}

/// Render the value with the registry precision, digit grouping, and unit: `13,300 ₹/kWh`.
#[must_use]
pub fn format_value(value: f64, metric: Metric) -> String {
    let info = metric.info();
    let number = Grouped::new(value, info.precision);
    if info.unit.is_empty() { number.to_string() } else { format!("{number} {}", info.unit) }
}

/// Same as [`format_value`], but an unknown key renders the raw value instead of failing.
#[must_use]
pub fn format_value_by_key(value: f64, key: &str) -> String {
    key.parse().map_or_else(|_| value.to_string(), |metric| format_value(value, metric))
}

/// Whole rupees: `₹1,30,000`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    Rupees::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key() {
        assert_eq!("cost_INRperkWh".parse::<Metric>().unwrap(), Metric::Cost);
        assert_eq!("depthOfDischarge_pct".parse::<Metric>().unwrap(), Metric::DepthOfDischarge);
        let error = "color".parse::<Metric>().unwrap_err();
        assert_eq!(error.key, "color");
        assert_eq!(error.to_string(), "unknown metric `color`");
    }

    #[test]
    fn test_keys_round_trip() {
        for metric in Metric::all() {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), metric);
            assert_eq!(serde_json::to_value(metric).unwrap(), metric.key());
        }
        assert_eq!(Metric::all().len(), 10);
    }

    #[test]
    fn test_polarity() {
        assert!(Metric::EnergyDensity.info().higher_is_better);
        assert!(!Metric::Cost.info().higher_is_better);
        assert!(!Metric::ChargeTime.info().higher_is_better);
        assert!(!Metric::SelfDischarge.info().higher_is_better);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(13_300.0, Metric::Cost), "13,300 ₹/kWh");
        assert_eq!(format_value(1.25, Metric::ChargeTime), "1.3 hours");
        assert_eq!(format_value(9.5, Metric::Safety), "9.5 /10");
        assert_eq!(format_value(12_500.0, Metric::CycleLife), "12,500 cycles");
    }

    #[test]
    fn test_format_value_by_unknown_key() {
        assert_eq!(format_value_by_key(62.5, "energyDensity_Whkg"), "63 Wh/kg");
        assert_eq!(format_value_by_key(62.5, "mystery"), "62.5");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(130_000.0), "₹1,30,000");
        assert_eq!(format_currency(999.6), "₹1,000");
    }
}
