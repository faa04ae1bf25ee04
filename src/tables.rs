use cellar::{
    battery::Battery,
    chart::{ChartConfig, ChartPoint},
    compare::Selection,
    metric::{Metric, format_value},
    recommend::Recommendation,
    score::{WeightedCriteria, score},
    tco::{Replacements, TcoBreakdown},
};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use enumset::EnumSet;
use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

/// Best and worst value of the metric among the batteries, taking its polarity into account.
fn best_and_worst(batteries: &[&Battery], metric: Metric) -> Option<(f64, f64)> {
    match batteries.iter().map(|battery| OrderedFloat(battery.metric(metric))).minmax() {
        MinMaxResult::NoElements | MinMaxResult::OneElement(_) => None,
        MinMaxResult::MinMax(min, max) if min == max => None,
        MinMaxResult::MinMax(min, max) if metric.info().higher_is_better => Some((max.0, min.0)),
        MinMaxResult::MinMax(min, max) => Some((min.0, max.0)),
    }
}

pub fn build_comparison_table(
    batteries: &[&Battery],
    metrics: EnumSet<Metric>,
    weights: &WeightedCriteria,
    selection: &Selection,
) -> Table {
    let extremes = metrics.iter().map(|metric| best_and_worst(batteries, metric)).collect_vec();

    let mut table = new_table();
    table.set_header(
        ["", "Name"]
            .into_iter()
            .map(Cell::new)
            .chain(metrics.iter().map(|metric| Cell::new(metric.info().label)))
            .chain([Cell::new("Score"), Cell::new("Applications")]),
    );
    for battery in batteries {
        let marker = if selection.contains(&battery.name) { "●" } else { "" };
        let metric_cells = metrics.iter().zip(&extremes).map(|(metric, extremes)| {
            let value = battery.metric(metric);
            let color = match extremes {
                Some((best, _)) if value == *best => Color::Green,
                Some((_, worst)) if value == *worst => Color::Red,
                _ => Color::Reset,
            };
            Cell::new(format_value(value, metric)).set_alignment(CellAlignment::Right).fg(color)
        });
        let name = Cell::new(&battery.name).add_attribute(Attribute::Bold);
        table.add_row(
            [Cell::new(marker).fg(Color::Cyan), name]
                .into_iter()
                .chain(metric_cells)
                .chain([
                    Cell::new(format!("{:.1}", score(battery, weights)))
                        .set_alignment(CellAlignment::Right),
                    Cell::new(&battery.applications).add_attribute(Attribute::Dim),
                ]),
        );
    }
    table
}

pub fn build_recommendation_table(recommendations: &[Recommendation<'_>]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Name", "Score", "Reasons", "Trade-offs"]);
    for (rank, recommendation) in recommendations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).add_attribute(Attribute::Dim),
            Cell::new(&recommendation.battery.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", recommendation.score)).set_alignment(CellAlignment::Right),
            Cell::new(recommendation.reasons.join("\n")).fg(Color::Green),
            Cell::new(recommendation.tradeoffs.join("\n")).fg(Color::Red),
        ]);
    }
    table
}

pub fn build_tco_table(breakdowns: &[(&Battery, TcoBreakdown)]) -> Table {
    let cheapest = breakdowns.iter().map(|(_, breakdown)| breakdown.total_cost.ordered()).min();

    let mut table = new_table();
    table.set_header(vec![
        "Name",
        "Capacity",
        "Life",
        "Replacements",
        "Initial",
        "Operating",
        "Maintenance",
        "Replacement",
        "Total",
        "Per kWh",
        "Payback",
    ]);
    for (battery, breakdown) in breakdowns {
        let replacements = match breakdown.replacements {
            Replacements::Count { count } => Cell::new(count),
            Replacements::Unbounded { capped_at } => {
                Cell::new(format!("every use ({capped_at})")).fg(Color::Red)
            }
        };
        let payback = breakdown
            .payback_period
            .map_or_else(|| Cell::new("n/a").add_attribute(Attribute::Dim), Cell::new);
        table.add_row(vec![
            Cell::new(&battery.name).add_attribute(Attribute::Bold),
            Cell::new(breakdown.capacity_needed).set_alignment(CellAlignment::Right),
            Cell::new(breakdown.battery_life).set_alignment(CellAlignment::Right),
            replacements.set_alignment(CellAlignment::Right),
            Cell::new(breakdown.initial_cost).set_alignment(CellAlignment::Right),
            Cell::new(breakdown.operating_cost).set_alignment(CellAlignment::Right),
            Cell::new(breakdown.maintenance_cost).set_alignment(CellAlignment::Right),
            Cell::new(breakdown.replacement_cost).set_alignment(CellAlignment::Right),
            Cell::new(breakdown.total_cost).set_alignment(CellAlignment::Right).fg(
                if Some(breakdown.total_cost.ordered()) == cheapest {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
            Cell::new(breakdown.cost_per_kwh).set_alignment(CellAlignment::Right),
            payback.set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_chart_table(config: &ChartConfig, points: &[ChartPoint<'_>]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Name"),
        Cell::new(config.x_axis),
        Cell::new(config.y_axis),
        Cell::new(config.bubble_size),
        Cell::new("Color"),
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.name).add_attribute(Attribute::Bold),
            Cell::new(&point.x_formatted).set_alignment(CellAlignment::Right),
            Cell::new(&point.y_formatted).set_alignment(CellAlignment::Right),
            Cell::new(format_value(point.z, config.bubble_size))
                .set_alignment(CellAlignment::Right),
            Cell::new(point.color).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
