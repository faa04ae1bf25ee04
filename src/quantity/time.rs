use std::fmt::{Display, Formatter};

use crate::{fmt::Grouped, quantity::Quantity};

pub type Years = Quantity<0, 1, 0>;

impl Display for Years {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} yr", Grouped::new(self.0, 1))
    }
}
