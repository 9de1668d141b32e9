//! convert_currency tool - live exchange rates

use async_trait::async_trait;
use tracing::debug;

use super::round6;
use crate::rates::RateProvider;
use crate::tools::{Param, Tool, ToolArgs, ToolContext, ToolError, ToolResult};

/// Convert an amount between currency codes using the provider's current rates
pub async fn convert_currency(
    value: f64,
    from_code: &str,
    to_code: &str,
    rates: &dyn RateProvider,
) -> Result<f64, ToolError> {
    let from_code = from_code.trim().to_uppercase();
    let to_code = to_code.trim().to_uppercase();
    debug!(%value, %from_code, %to_code, "convert_currency: called");

    let table = rates.lookup(&from_code).await?;
    let rate = table.get(&to_code).ok_or(ToolError::UnsupportedCurrency(to_code))?;
    Ok(round6(value * rate))
}

const PARAMS: &[Param] = &[
    Param::float("value", "Amount of money to convert"),
    Param::string("from_code", "ISO 4217 code of the source currency, e.g. USD"),
    Param::string("to_code", "ISO 4217 code of the target currency, e.g. EUR"),
];

/// Currency conversion tool
pub struct CurrencyTool;

#[async_trait]
impl Tool for CurrencyTool {
    fn name(&self) -> &'static str {
        "convert_currency"
    }

    fn description(&self) -> &'static str {
        "Converts an amount from one currency to another using current exchange rates."
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> ToolResult {
        ToolResult::from_conversion(convert_args(&args, ctx.rates()).await)
    }
}

async fn convert_args(args: &ToolArgs, rates: &dyn RateProvider) -> Result<f64, ToolError> {
    convert_currency(args.float("value")?, args.text("from_code")?, args.text("to_code")?, rates).await
}
