use crate::{
    battery::Battery,
    metric::format_value,
    prelude::*,
    score::{Criterion, Normalized, WeightedCriteria, rank},
};

pub const DEFAULT_TOP_N: usize = 3;

/// Normalised values at or above this are called out as reasons.
const STRENGTH_THRESHOLD: f64 = 0.7;

/// Normalised values below this are called out as trade-offs.
const WEAKNESS_THRESHOLD: f64 = 0.4;

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation<'a> {
    pub battery: &'a Battery,
    pub score: f64,
    pub reasons: Vec<String>,
    pub tradeoffs: Vec<String>,
}

impl<'a> Recommendation<'a> {
    fn new(battery: &'a Battery, score: f64, weights: &WeightedCriteria) -> Self {
        let mut reasons = Vec::new();
        let mut tradeoffs = Vec::new();
        for (criterion, value) in Normalized::of(battery).iter() {
            // Criteria the user does not care about explain nothing:
            if weights.weight(criterion) <= 0.0 {
                continue;
            }
            if value >= STRENGTH_THRESHOLD {
                reasons.push(describe(battery, criterion));
            } else if value < WEAKNESS_THRESHOLD {
                tradeoffs.push(describe(battery, criterion));
            }
        }
        Self { battery, score, reasons, tradeoffs }
    }
}

fn describe(battery: &Battery, criterion: Criterion) -> String {
    let metric = criterion.metric();
    format!("{metric}: {}", format_value(battery.metric(metric), metric))
}

/// Rank the batteries serving the application and keep the best `top_n`.
///
/// Zero matches is not an error, the result is simply empty.
#[instrument(skip_all, fields(application = application, top_n = top_n))]
pub fn recommend<'a>(
    batteries: &'a [Battery],
    application: &str,
    weights: &WeightedCriteria,
    top_n: usize,
) -> Vec<Recommendation<'a>> {
    let suitable: Vec<_> = batteries.iter().filter(|battery| battery.serves(application)).collect();
    debug!(n_suitable = suitable.len(), "selected suitable batteries");
    rank(&suitable, weights)
        .into_iter()
        .take(top_n)
        .map(|scored| Recommendation::new(scored.battery, scored.score, weights))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{battery::tests::battery, catalog::Catalog, score::score};

    #[test]
    fn test_ev_recommendation() {
        let catalog = Catalog::reference().unwrap();
        let weights = WeightedCriteria::equal(1.0 / 6.0);
        let recommendations = recommend(&catalog, "EV", &weights, 3);

        assert_eq!(recommendations.len(), 3);
        assert!(recommendations.iter().all(|recommendation| recommendation.battery.serves("ev")));
        assert!(
            recommendations
                .windows(2)
                .all(|pair| pair[0].score >= pair[1].score)
        );
        for recommendation in &recommendations {
            assert_eq!(recommendation.score, score(recommendation.battery, &weights));
        }
        let names: Vec<_> = recommendations
            .iter()
            .map(|recommendation| recommendation.battery.name.as_str())
            .collect();
        assert_eq!(names, ["Solid-State", "Li-ion (NMC)", "LFP"]);
    }

    #[test]
    fn test_fewer_matches_than_requested() {
        let catalog = Catalog::reference().unwrap();
        let recommendations = recommend(&catalog, "railways", &WeightedCriteria::default(), 3);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].battery.name, "NiCd");
    }

    #[test]
    fn test_no_matches() {
        let catalog = Catalog::reference().unwrap();
        assert!(recommend(&catalog, "submarine", &WeightedCriteria::default(), 3).is_empty());
        assert!(recommend(&[], "EV", &WeightedCriteria::default(), 3).is_empty());
    }

    #[test]
    fn test_top_n_zero() {
        let catalog = Catalog::reference().unwrap();
        assert!(recommend(&catalog, "grid", &WeightedCriteria::default(), 0).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let batteries = [
            Battery { applications: "Drones".to_owned(), ..battery("Alpha") },
            Battery { applications: "drones".to_owned(), ..battery("Beta") },
        ];
        let recommendations = recommend(&batteries, "DRONES", &WeightedCriteria::default(), 3);
        assert_eq!(recommendations[0].battery.name, "Alpha");
        assert_eq!(recommendations[1].battery.name, "Beta");
    }

    #[test]
    fn test_reasons_and_tradeoffs() {
        let catalog = Catalog::reference().unwrap();
        let recommendations =
            recommend(&catalog, "grid stabilization", &WeightedCriteria::default(), 1);
        let flow = &recommendations[0];
        assert_eq!(flow.battery.name, "Flow Battery");
        assert!(flow.reasons.contains(&"Cycle Life: 12,500 cycles".to_owned()));
        assert!(flow.reasons.contains(&"Safety Rating: 9.5 /10".to_owned()));
        assert!(flow.tradeoffs.contains(&"Energy Density: 35 Wh/kg".to_owned()));
        assert!(flow.tradeoffs.contains(&"Cost: 37,400 ₹/kWh".to_owned()));
    }

    #[test]
    fn test_ignored_criteria_are_not_explained() {
        let catalog = Catalog::reference().unwrap();
        let weights = WeightedCriteria { safety: 1.0, ..WeightedCriteria::equal(0.0) };
        let recommendations = recommend(&catalog, "grid stabilization", &weights, 1);
        assert_eq!(recommendations[0].reasons, ["Safety Rating: 9.5 /10"]);
        assert!(recommendations[0].tradeoffs.is_empty());
    }
}
