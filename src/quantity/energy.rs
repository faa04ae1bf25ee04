use std::fmt::{Display, Formatter};

use crate::{fmt::Grouped, quantity::Quantity};

pub type KilowattHours = Quantity<1, 0, 0>;

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kWh", Grouped::new(self.0, 2))
    }
}
