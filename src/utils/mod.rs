pub mod rounding;

pub use rounding::{round_currency, round_tenths, round_to};
