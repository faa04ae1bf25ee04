//! Weighted multi-criteria scoring.
//!
//! Each criterion is normalised against a fixed reference ceiling. Metrics where lower is better
//! are inverted: `1 - value / ceiling`. Values beyond the ceiling are **not** clamped, so outliers
//! show up as contributions below zero or above one.

use std::cmp::Reverse;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{battery::Battery, metric::Metric, prelude::*};

/// Non-negative criterion weights. They need not sum to one: the score scales with them.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeightedCriteria {
    pub energy_density: f64,
    pub cycle_life: f64,
    pub cost: f64,
    pub safety: f64,
    pub charge_time: f64,
    pub efficiency: f64,
}

impl Default for WeightedCriteria {
    fn default() -> Self {
        Self {
            energy_density: 0.2,
            cycle_life: 0.2,
            cost: 0.2,
            safety: 0.2,
            charge_time: 0.1,
            efficiency: 0.1,
        }
    }
}

impl WeightedCriteria {
    pub const fn equal(weight: f64) -> Self {
        Self {
            energy_density: weight,
            cycle_life: weight,
            cost: weight,
            safety: weight,
            charge_time: weight,
            efficiency: weight,
        }
    }

    #[must_use]
    pub const fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::EnergyDensity => self.energy_density,
            Criterion::CycleLife => self.cycle_life,
            Criterion::Cost => self.cost,
            Criterion::Safety => self.safety,
            Criterion::ChargeTime => self.charge_time,
            Criterion::Efficiency => self.efficiency,
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            energy_density: self.energy_density * factor,
            cycle_life: self.cycle_life * factor,
            cost: self.cost * factor,
            safety: self.safety * factor,
            charge_time: self.charge_time * factor,
            efficiency: self.efficiency * factor,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Criterion {
    EnergyDensity,
    CycleLife,
    Cost,
    Safety,
    ChargeTime,
    Efficiency,
}

impl Criterion {
    /// Summation order of the final score.
    pub const ALL: [Self; 6] = [
        Self::EnergyDensity,
        Self::CycleLife,
        Self::Cost,
        Self::Safety,
        Self::ChargeTime,
        Self::Efficiency,
    ];

    pub const fn metric(self) -> Metric {
        match self {
            Self::EnergyDensity => Metric::EnergyDensity,
            Self::CycleLife => Metric::CycleLife,
            Self::Cost => Metric::Cost,
            Self::Safety => Metric::Safety,
            Self::ChargeTime => Metric::ChargeTime,
            Self::Efficiency => Metric::Efficiency,
        }
    }

    /// Reference ceiling the raw value is divided by.
    #[must_use]
    pub const fn ceiling(self) -> f64 {
        match self {
            Self::EnergyDensity => 300.0,
            Self::CycleLife => 12_500.0,
            Self::Cost => 40_000.0,
            Self::Safety => 10.0,
            Self::ChargeTime => 12.0,
            Self::Efficiency => 100.0,
        }
    }

    /// Normalised value, nominally `0..=1`, not clamped.
    #[must_use]
    pub fn normalize(self, battery: &Battery) -> f64 {
        let metric = self.metric();
        let ratio = battery.metric(metric) / self.ceiling();
        if metric.info().higher_is_better { ratio } else { 1.0 - ratio }
    }
}

/// Per-criterion normalised values of a single battery.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalized([f64; 6]);

impl Normalized {
    pub fn of(battery: &Battery) -> Self {
        Self(Criterion::ALL.map(|criterion| criterion.normalize(battery)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.into_iter().zip(self.0)
    }

    /// Weighted sum, scaled to the nominal `0..=100` range.
    #[must_use]
    pub fn weighted(&self, weights: &WeightedCriteria) -> f64 {
        let mut score = 0.0;
        for (criterion, value) in self.iter() {
            score += value * weights.weight(criterion);
        }
        score * 100.0
    }
}

/// Score the battery: `Σ normalised × weight × 100`.
#[must_use]
pub fn score(battery: &Battery, weights: &WeightedCriteria) -> f64 {
    Normalized::of(battery).weighted(weights)
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scored<'a> {
    pub battery: &'a Battery,
    pub score: f64,
}

/// Score the batteries and sort them by descending score. Ties keep their original order.
#[instrument(skip_all, fields(n_batteries = batteries.len()))]
pub fn rank<'a>(batteries: &[&'a Battery], weights: &WeightedCriteria) -> Vec<Scored<'a>> {
    batteries
        .iter()
        .map(|&battery| Scored { battery, score: score(battery, weights) })
        .inspect(|scored| trace!(name = %scored.battery.name, score = scored.score, "scored"))
        .sorted_by_key(|scored| Reverse(OrderedFloat(scored.score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::{battery::tests::battery, catalog::Catalog};

    #[test]
    fn test_zero_weights_yield_zero() {
        for battery in Catalog::reference().unwrap().iter() {
            assert_eq!(score(battery, &WeightedCriteria::equal(0.0)), 0.0);
        }
    }

    #[test]
    fn test_linear_in_weights() {
        let catalog = Catalog::reference().unwrap();
        let weights = WeightedCriteria::default();
        for battery in catalog.iter() {
            assert_relative_eq!(
                score(battery, &weights.scale(3.0)),
                3.0 * score(battery, &weights),
                max_relative = 1e-12,
            );
        }
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let battery = Battery { safety: 10.0, ..battery("Safe") };
        let weights = WeightedCriteria { safety: 2.0, ..WeightedCriteria::equal(0.0) };
        assert_abs_diff_eq!(score(&battery, &weights), 200.0);
    }

    #[test]
    fn test_inverted_criteria() {
        let battery = Battery { cost: 10_000.0, charge_time: 3.0, ..battery("Cheap") };
        assert_abs_diff_eq!(Criterion::Cost.normalize(&battery), 0.75);
        assert_abs_diff_eq!(Criterion::ChargeTime.normalize(&battery), 0.75);
    }

    #[test]
    fn test_out_of_ceiling_values_are_not_clamped() {
        let battery = Battery { cost: 50_000.0, energy_density: 450.0, ..battery("Outlier") };
        assert_abs_diff_eq!(Criterion::Cost.normalize(&battery), -0.25);
        assert_abs_diff_eq!(Criterion::EnergyDensity.normalize(&battery), 1.5);
    }

    #[test]
    fn test_negative_weights_are_tolerated() {
        let battery = Battery { safety: 5.0, ..battery("Meh") };
        let weights = WeightedCriteria { safety: -1.0, ..WeightedCriteria::equal(0.0) };
        assert_abs_diff_eq!(score(&battery, &weights), -50.0);
    }

    #[test]
    fn test_reference_score() {
        let catalog = Catalog::reference().unwrap();
        let lfp = catalog.get("LFP").unwrap();
        // 125/300, 3500/12500, 1 - 16600/40000, 9/10, 1 - 1.5/12, 96/100:
        let expected = 0.2 * (125.0 / 300.0)
            + 0.2 * 0.28
            + 0.2 * 0.585
            + 0.2 * 0.9
            + 0.1 * 0.875
            + 0.1 * 0.96;
        assert_abs_diff_eq!(
            score(lfp, &WeightedCriteria::default()),
            expected * 100.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_deterministic() {
        let catalog = Catalog::reference().unwrap();
        let weights = WeightedCriteria::default();
        for battery in catalog.iter() {
            assert_eq!(score(battery, &weights).to_bits(), score(battery, &weights).to_bits());
        }
    }

    #[test]
    fn test_rank_is_stable() {
        let batteries =
            [battery("First"), battery("Second"), Battery { safety: 1.0, ..battery("Third") }];
        let batteries: Vec<_> = batteries.iter().collect();
        let ranked = rank(&batteries, &WeightedCriteria::default());
        let names: Vec<_> = ranked.iter().map(|scored| scored.battery.name.as_str()).collect();
        assert_eq!(names, ["Third", "First", "Second"]);
    }
}
