use serde::{Deserialize, Serialize};

use crate::{
    battery::Battery,
    metric::{Metric, format_value},
};

/// Share of the data span added on each side of an axis.
const DOMAIN_PADDING: f64 = 0.12;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bubble,
    Scatter,
    Bar,
    Radar,
    Comparison,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub x_axis: Metric,
    pub y_axis: Metric,
    pub bubble_size: Metric,
    pub chart_type: ChartType,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_axis: Metric::EnergyDensity,
            y_axis: Metric::Cost,
            bubble_size: Metric::CycleLife,
            chart_type: ChartType::Bubble,
        }
    }
}

/// Single plotted battery with its tooltip texts.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint<'a> {
    pub name: &'a str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: &'a str,
    pub x_formatted: String,
    pub y_formatted: String,
}

impl ChartConfig {
    pub fn points<'a>(&self, batteries: &[&'a Battery]) -> Vec<ChartPoint<'a>> {
        batteries
            .iter()
            .map(|&battery| {
                let x = battery.metric(self.x_axis);
                let y = battery.metric(self.y_axis);
                ChartPoint {
                    name: &battery.name,
                    x,
                    y,
                    z: battery.metric(self.bubble_size),
                    color: &battery.color,
                    x_formatted: format_value(x, self.x_axis),
                    y_formatted: format_value(y, self.y_axis),
                }
            })
            .collect()
    }
}

/// Axis domain with some breathing room around the data, rounded outwards to whole numbers.
///
/// When all the values are equal, the padding is taken from the value itself.
#[must_use]
pub fn padded_domain(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values.iter().fold(None, |bounds, &value| match bounds {
        None => Some((value, value)),
        Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
    })?;
    let span = max - min;
    let padding = if span > 0.0 {
        span * DOMAIN_PADDING
    } else if max == 0.0 {
        DOMAIN_PADDING
    } else {
        max * DOMAIN_PADDING
    };
    Some(((min - padding).floor(), (max + padding).ceil()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_points() {
        let catalog = Catalog::reference().unwrap();
        let points = ChartConfig::default().points(&catalog.all());
        assert_eq!(points.len(), 8);
        let nmc = points.iter().find(|point| point.name == "Li-ion (NMC)").unwrap();
        assert_eq!(nmc.x, 200.0);
        assert_eq!(nmc.y, 13_300.0);
        assert_eq!(nmc.z, 2000.0);
        assert_eq!(nmc.color, "#3B82F6");
        assert_eq!(nmc.x_formatted, "200 Wh/kg");
        assert_eq!(nmc.y_formatted, "13,300 ₹/kWh");
    }

    #[test]
    fn test_padded_domain() {
        assert_eq!(padded_domain(&[]), None);
        // Span 260, padding 31.2:
        assert_eq!(padded_domain(&[40.0, 300.0, 125.0]), Some((8.0, 332.0)));
        assert_eq!(padded_domain(&[50.0, 50.0]), Some((44.0, 56.0)));
        assert_eq!(padded_domain(&[0.0]), Some((-1.0, 1.0)));
    }

    #[test]
    fn test_partial_config() {
        let config: ChartConfig = serde_json::from_str(r#"{"yAxis": "safety_rating10"}"#).unwrap();
        assert_eq!(config.x_axis, Metric::EnergyDensity);
        assert_eq!(config.y_axis, Metric::Safety);
        assert_eq!(config.chart_type, ChartType::Bubble);
    }
}
