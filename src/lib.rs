//! Battery technology comparison engine: filtering, weighted scoring, recommendations,
//! total cost of ownership, and a shareable state codec.

pub mod battery;
pub mod catalog;
pub mod chart;
pub mod compare;
pub mod export;
pub mod filter;
pub mod fmt;
pub mod metric;
pub mod prelude;
pub mod quantity;
pub mod recommend;
pub mod score;
pub mod share;
pub mod tco;
