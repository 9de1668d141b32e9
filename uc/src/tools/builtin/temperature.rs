//! convert_temperature tool - celsius, fahrenheit and kelvin

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::debug;

use super::round6;
use crate::tools::{Param, Tool, ToolArgs, ToolContext, ToolError, ToolResult};

/// Accepted temperature scales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + 273.15,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(Self::Celsius),
            "fahrenheit" | "f" => Ok(Self::Fahrenheit),
            "kelvin" | "k" => Ok(Self::Kelvin),
            _ => Err(ToolError::UnsupportedTemperatureUnit(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
            Self::Kelvin => "kelvin",
        };
        f.write_str(s)
    }
}

/// Convert a temperature between scales, via Celsius
pub fn convert_temperature(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ToolError> {
    debug!(%value, %from_unit, %to_unit, "convert_temperature: called");
    let from: TemperatureUnit = from_unit.parse()?;
    let to: TemperatureUnit = to_unit.parse()?;
    Ok(round6(to.from_celsius(from.to_celsius(value))))
}

const PARAMS: &[Param] = &[
    Param::float("value", "Temperature to convert"),
    Param::string("from_unit", "Source unit: celsius/c, fahrenheit/f or kelvin/k"),
    Param::string("to_unit", "Target unit: celsius/c, fahrenheit/f or kelvin/k"),
];

/// Temperature conversion tool
pub struct TemperatureTool;

#[async_trait]
impl Tool for TemperatureTool {
    fn name(&self) -> &'static str {
        "convert_temperature"
    }

    fn description(&self) -> &'static str {
        "Converts a temperature from one unit to another (celsius, fahrenheit, kelvin), using Celsius as the base."
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    async fn execute(&self, args: ToolArgs, _ctx: &ToolContext) -> ToolResult {
        ToolResult::from_conversion(convert_args(&args))
    }
}

fn convert_args(args: &ToolArgs) -> Result<f64, ToolError> {
    convert_temperature(args.float("value")?, args.text("from_unit")?, args.text("to_unit")?)
}
