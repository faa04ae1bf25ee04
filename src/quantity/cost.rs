use std::{
    fmt::{Display, Formatter},
    ops::{Div, Mul},
};

use crate::{
    fmt::Grouped,
    quantity::{Quantity, energy::KilowattHours, time::Years},
};

/// Indian rupees.
pub type Rupees = Quantity<0, 0, 1>;

/// Rupees per kilowatt-hour: both the pack price and the electricity tariff.
pub type RupeesPerKilowattHour = Quantity<-1, 0, 1>;

pub type RupeesPerYear = Quantity<0, -1, 1>;

impl Display for Rupees {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", Grouped::new(self.0, 0))
    }
}

impl Display for RupeesPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}/kWh", Grouped::new(self.0, 2))
    }
}

impl Display for RupeesPerYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}/yr", Grouped::new(self.0, 0))
    }
}

impl Mul<KilowattHours> for RupeesPerKilowattHour {
    type Output = Rupees;

    fn mul(self, rhs: KilowattHours) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Div<KilowattHours> for Rupees {
    type Output = RupeesPerKilowattHour;

    fn div(self, rhs: KilowattHours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

impl Mul<Years> for RupeesPerYear {
    type Output = Rupees;

    fn mul(self, rhs: Years) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Div<Years> for Rupees {
    type Output = RupeesPerYear;

    fn div(self, rhs: Years) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

impl Div<RupeesPerYear> for Rupees {
    type Output = Years;

    fn div(self, rhs: RupeesPerYear) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}
