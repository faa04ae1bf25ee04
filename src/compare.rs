//! Comparison view: sorting and selection over a battery list.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    battery::Battery,
    metric::{Metric, MetricNotFound},
    prelude::*,
};

/// Column the comparison is sorted by.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Metric(Metric),
}

impl SortKey {
    #[must_use]
    pub fn compare(self, lhs: &Battery, rhs: &Battery) -> Ordering {
        match self {
            Self::Name => lhs.name.to_lowercase().cmp(&rhs.name.to_lowercase()),
            Self::Metric(metric) => lhs.metric(metric).total_cmp(&rhs.metric(metric)),
        }
    }
}

impl FromStr for SortKey {
    type Err = MetricNotFound;

    /// `name` or any metric key.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key == "name" { Ok(Self::Name) } else { key.parse().map(Self::Metric) }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Metric(metric) => f.write_str(metric.key()),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort the batteries in place. Equal entries keep their relative order.
#[instrument(skip_all, fields(key = %key, order = ?order))]
pub fn sort_batteries(batteries: &mut [&Battery], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => batteries.sort_by(|lhs, rhs| key.compare(lhs, rhs)),
        SortOrder::Descending => batteries.sort_by(|lhs, rhs| key.compare(rhs, lhs)),
    }
}

/// Battery names picked for side-by-side comparison, in the order they were picked.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl From<Vec<String>> for Selection {
    fn from(names: Vec<String>) -> Self {
        let mut selection = Self::default();
        for name in names {
            selection.select(name);
        }
        selection
    }
}

impl Selection {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|selected| selected == name)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Select the battery unless already selected.
    pub fn select(&mut self, name: String) {
        if !self.contains(&name) {
            self.0.push(name);
        }
    }

    fn remove(&mut self, name: &str) {
        self.0.retain(|selected| selected != name);
    }

    /// Select the battery if it is not selected, deselect it otherwise.
    ///
    /// Returns whether the battery ended up selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.contains(name) {
            self.remove(name);
            false
        } else {
            self.0.push(name.to_owned());
            true
        }
    }

    /// Select or deselect all the visible batteries at once, leaving the rest untouched.
    pub fn set_all(&mut self, visible: &[&Battery], on: bool) {
        for battery in visible {
            if on {
                self.select(battery.name.clone());
            } else {
                self.remove(&battery.name);
            }
        }
    }

    #[must_use]
    pub fn all_selected(&self, visible: &[&Battery]) -> bool {
        !visible.is_empty() && visible.iter().all(|battery| self.contains(&battery.name))
    }

    /// Compare mode: only the selected batteries, or everything while nothing is selected.
    #[must_use]
    pub fn retain_selected<'a>(&self, batteries: &[&'a Battery]) -> Vec<&'a Battery> {
        if self.is_empty() {
            return batteries.to_vec();
        }
        batteries.iter().copied().filter(|battery| self.contains(&battery.name)).collect()
    }
}
