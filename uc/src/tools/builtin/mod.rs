//! Built-in conversion tools

mod currency;
mod distance;
mod temperature;

pub use currency::{CurrencyTool, convert_currency};
pub use distance::{DistanceTool, DistanceUnit, convert_distance};
pub use temperature::{TemperatureTool, TemperatureUnit, convert_temperature};

/// Round to 6 decimal places, the precision every tool reports
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
