use serde::{Deserialize, Serialize};

use crate::{battery::Battery, prelude::*};

/// Inclusive `[min, max]` range, serialized as a two-element array.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds(pub f64, pub f64);

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self(min, max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.0 <= value && value <= self.1
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    pub cost_range: Bounds,
    pub cycle_life_range: Bounds,

    /// Requested application substrings, any of them suffices. Empty means «any application».
    pub applications: Vec<String>,

    pub safety_min: f64,
    pub efficiency_min: f64,
}

impl Default for FilterConfig {
    /// The full range of the comparison sliders: ₹0 to ₹50,000 per kWh and 0 to 15,000 cycles.
    ///
    /// This is not an identity filter. Batteries beyond either ceiling are excluded, as are
    /// negative safety ratings and efficiencies.
    fn default() -> Self {
        Self {
            cost_range: Bounds::new(0.0, 50_000.0),
            cycle_life_range: Bounds::new(0.0, 15_000.0),
            applications: Vec::new(),
            safety_min: 0.0,
            efficiency_min: 0.0,
        }
    }
}

impl FilterConfig {
    #[must_use]
    pub fn matches(&self, battery: &Battery) -> bool {
        self.cost_range.contains(battery.cost)
            && self.cycle_life_range.contains(battery.cycle_life)
            && battery.safety >= self.safety_min
            && battery.efficiency >= self.efficiency_min
            && (self.applications.is_empty()
                || self.applications.iter().any(|application| battery.serves(application)))
    }
}

/// Select the matching batteries, preserving their order.
#[instrument(skip_all, fields(n_batteries = batteries.len()))]
pub fn filter<'a>(batteries: &'a [Battery], config: &FilterConfig) -> Vec<&'a Battery> {
    let matching: Vec<_> = batteries.iter().filter(|battery| config.matches(battery)).collect();
    debug!(n_matching = matching.len(), "filtered");
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{battery::tests::battery, catalog::Catalog};

    fn names<'a>(batteries: &[&'a Battery]) -> Vec<&'a str> {
        batteries.iter().map(|battery| battery.name.as_str()).collect()
    }

    #[test]
    fn test_default_config_keeps_reference_catalog() {
        let catalog = Catalog::reference().unwrap();
        let filtered = filter(&catalog, &FilterConfig::default());
        assert_eq!(filtered, catalog.all());
    }

    #[test]
    fn test_default_config_ceilings() {
        let config = FilterConfig::default();
        let affordable = Battery { cost: 50_000.0, ..battery("Affordable") };
        assert!(config.matches(&affordable));
        assert!(!config.matches(&Battery { cost: 60_000.0, ..battery("Pricey") }));
        assert!(!config.matches(&Battery { cycle_life: 20_000.0, ..battery("Durable") }));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter(&[], &FilterConfig::default()).is_empty());
    }

    #[test]
    fn test_cost_ceiling() {
        let catalog = Catalog::reference().unwrap();
        let config = FilterConfig {
            cost_range: Bounds::new(0.0, 15_000.0),
            cycle_life_range: Bounds::new(0.0, 15_000.0),
            ..FilterConfig::default()
        };
        let filtered = filter(&catalog, &config);
        assert!(filtered.iter().all(|battery| battery.cost <= 15_000.0));
        assert_eq!(names(&filtered), ["Lead-Acid", "Li-ion (NMC)", "Zinc-Air"]);
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let batteries = [Battery { cost: 100.0, cycle_life: 500.0, ..battery("A") }];
        let config = FilterConfig {
            cost_range: Bounds::new(100.0, 100.0),
            cycle_life_range: Bounds::new(500.0, 500.0),
            ..FilterConfig::default()
        };
        assert_eq!(filter(&batteries, &config).len(), 1);
    }

    #[test]
    fn test_thresholds() {
        let catalog = Catalog::reference().unwrap();
        let config = FilterConfig { safety_min: 9.0, efficiency_min: 90.0, ..Default::default() };
        assert_eq!(names(&filter(&catalog, &config)), ["LFP", "Solid-State"]);
    }

    #[test]
    fn test_applications_are_or_matched() {
        let catalog = Catalog::reference().unwrap();
        let config = FilterConfig {
            applications: vec!["GRID".to_owned(), "railways".to_owned()],
            ..Default::default()
        };
        assert_eq!(
            names(&filter(&catalog, &config)),
            ["NiCd", "LFP", "Zinc-Air", "Flow Battery"],
        );
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let catalog = Catalog::reference().unwrap();
        let config = FilterConfig { safety_min: 7.0, ..Default::default() };
        let filtered = filter(&catalog, &config);
        let positions: Vec<_> = filtered
            .iter()
            .map(|battery| catalog.iter().position(|other| other == *battery).unwrap())
            .collect();
        assert!(positions.is_sorted());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"safetyMin": 8}"#).unwrap();
        assert_eq!(config.safety_min, 8.0);
        assert_eq!(config.cost_range, Bounds::new(0.0, 50_000.0));
    }
}
