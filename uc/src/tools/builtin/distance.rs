//! convert_distance tool - metric and imperial lengths

use async_trait::async_trait;
use tracing::debug;

use super::round6;
use crate::tools::{Param, Tool, ToolArgs, ToolContext, ToolError, ToolResult};

/// Canonical distance units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Millimetre,
    Centimetre,
    Metre,
    Kilometre,
    Inch,
    Foot,
    Yard,
    Mile,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 8] = [
        Self::Millimetre,
        Self::Centimetre,
        Self::Metre,
        Self::Kilometre,
        Self::Inch,
        Self::Foot,
        Self::Yard,
        Self::Mile,
    ];

    /// Resolve a spelling, plural or abbreviation to its canonical unit
    pub fn from_alias(raw: &str) -> Option<Self> {
        let unit = match raw.trim().to_lowercase().as_str() {
            "millimeter" | "millimetre" | "millimeters" | "millimetres" | "mm" => Self::Millimetre,
            "centimeter" | "centimetre" | "centimeters" | "centimetres" | "cm" => Self::Centimetre,
            "meter" | "metre" | "meters" | "metres" | "m" => Self::Metre,
            "kilometer" | "kilometre" | "kilometers" | "kilometres" | "km" | "kms" => Self::Kilometre,
            "inch" | "inches" | "in" => Self::Inch,
            "foot" | "feet" | "ft" => Self::Foot,
            "yard" | "yards" | "yd" => Self::Yard,
            "mile" | "miles" | "mi" => Self::Mile,
            _ => return None,
        };
        Some(unit)
    }

    /// Canonical short name
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimetre => "mm",
            Self::Centimetre => "cm",
            Self::Metre => "m",
            Self::Kilometre => "km",
            Self::Inch => "inch",
            Self::Foot => "foot",
            Self::Yard => "yard",
            Self::Mile => "mile",
        }
    }

    /// Metres per one of this unit
    pub fn metres(self) -> f64 {
        match self {
            Self::Millimetre => 1e-3,
            Self::Centimetre => 1e-2,
            Self::Metre => 1.0,
            Self::Kilometre => 1e3,
            Self::Inch => 0.0254,
            Self::Foot => 0.3048,
            Self::Yard => 0.9144,
            Self::Mile => 1609.34,
        }
    }
}

/// Convert a distance between units, via metres
pub fn convert_distance(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ToolError> {
    debug!(%value, %from_unit, %to_unit, "convert_distance: called");
    match (DistanceUnit::from_alias(from_unit), DistanceUnit::from_alias(to_unit)) {
        (Some(from), Some(to)) => Ok(round6(value * from.metres() / to.metres())),
        (from, to) => Err(ToolError::UnsupportedDistance {
            from: display_name(from, from_unit),
            to: display_name(to, to_unit),
        }),
    }
}

// Unrecognized units are reported as the normalized raw text
fn display_name(unit: Option<DistanceUnit>, raw: &str) -> String {
    match unit {
        Some(u) => u.symbol().to_string(),
        None => raw.trim().to_lowercase(),
    }
}

const PARAMS: &[Param] = &[
    Param::float("value", "Distance to convert"),
    Param::string("from_unit", "Source unit, e.g. mm, cm, m, km, inch, foot, yard, mile"),
    Param::string("to_unit", "Target unit, e.g. mm, cm, m, km, inch, foot, yard, mile"),
];

/// Distance conversion tool
pub struct DistanceTool;

#[async_trait]
impl Tool for DistanceTool {
    fn name(&self) -> &'static str {
        "convert_distance"
    }

    fn description(&self) -> &'static str {
        "Converts a distance from one unit to another using meters as the base. Supports mm, cm, m, km, inch, foot, yard and mile, including common spellings and plurals."
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    async fn execute(&self, args: ToolArgs, _ctx: &ToolContext) -> ToolResult {
        ToolResult::from_conversion(convert_args(&args))
    }
}

fn convert_args(args: &ToolArgs) -> Result<f64, ToolError> {
    convert_distance(args.float("value")?, args.text("from_unit")?, args.text("to_unit")?)
}
